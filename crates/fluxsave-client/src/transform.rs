//! Delivery-time image transform URLs
//!
//! Transform parameters are an open mapping; the server interprets them, the
//! client only serializes. Insertion order is preserved because the service
//! treats differently ordered query strings as cache-distinct.

use std::fmt;

use url::form_urlencoded;

/// A scalar transform parameter value
#[derive(Clone, Debug, PartialEq)]
pub enum TransformValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for TransformValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for TransformValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for TransformValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i32> for TransformValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<i64> for TransformValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for TransformValue {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for TransformValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for TransformValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Ordered transform parameters (width, height, format, quality, ...)
///
/// Keys keep the position of their first insertion; setting an existing key
/// replaces its value in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransformOptions {
    options: Vec<(String, TransformValue)>,
}

impl TransformOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, preserving insertion order
    pub fn set(mut self, key: impl Into<String>, value: impl Into<TransformValue>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.options.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.options.push((key, value)),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, TransformValue)> {
        self.options.iter()
    }
}

/// Build a delivery URL for a file, serializing options in insertion order.
pub fn file_url(endpoint: &str, file_id: &str, options: &TransformOptions) -> String {
    let base = format!("{}/api/v1/files/{}", endpoint.trim_end_matches('/'), file_id);
    if options.is_empty() {
        return base;
    }

    let mut query = form_urlencoded::Serializer::new(String::new());
    for (key, value) in options.iter() {
        query.append_pair(key, &value.to_string());
    }
    format!("{}?{}", base, query.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ENDPOINT: &str = "https://api.fluxsave.test";

    #[test]
    fn test_no_options_no_query_string() {
        assert_eq!(
            file_url(ENDPOINT, "f1", &TransformOptions::new()),
            "https://api.fluxsave.test/api/v1/files/f1"
        );
    }

    #[test]
    fn test_insertion_order_preserved() {
        let wh = TransformOptions::new().set("width", 800).set("height", 600);
        let hw = TransformOptions::new().set("height", 600).set("width", 800);

        let wh_url = file_url(ENDPOINT, "f1", &wh);
        let hw_url = file_url(ENDPOINT, "f1", &hw);

        assert_eq!(wh_url, "https://api.fluxsave.test/api/v1/files/f1?width=800&height=600");
        assert_eq!(hw_url, "https://api.fluxsave.test/api/v1/files/f1?height=600&width=800");
        assert_ne!(wh_url, hw_url);

        // Different order, same option set
        let decode = |url: &str| -> HashSet<(String, String)> {
            let query = url.split_once('?').unwrap().1.to_string();
            form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect()
        };
        assert_eq!(decode(&wh_url), decode(&hw_url));
    }

    #[test]
    fn test_replacing_key_keeps_position() {
        let options = TransformOptions::new()
            .set("width", 800)
            .set("quality", 80)
            .set("width", 400);

        assert_eq!(
            file_url(ENDPOINT, "f1", &options),
            "https://api.fluxsave.test/api/v1/files/f1?width=400&quality=80"
        );
    }

    #[test]
    fn test_scalar_values_serialized_canonically() {
        let options = TransformOptions::new()
            .set("format", "webp")
            .set("quality", 82)
            .set("dpr", 1.5)
            .set("progressive", true);

        assert_eq!(
            file_url(ENDPOINT, "f1", &options),
            "https://api.fluxsave.test/api/v1/files/f1?format=webp&quality=82&dpr=1.5&progressive=true"
        );
    }

    #[test]
    fn test_values_percent_encoded() {
        let options = TransformOptions::new().set("fit", "crop center");
        assert_eq!(
            file_url(ENDPOINT, "f1", &options),
            "https://api.fluxsave.test/api/v1/files/f1?fit=crop+center"
        );
    }

    #[test]
    fn test_trailing_slash_endpoint_handled() {
        assert_eq!(
            file_url("https://api.fluxsave.test/", "f1", &TransformOptions::new()),
            "https://api.fluxsave.test/api/v1/files/f1"
        );
    }
}
