//! Multipart/form-data encoding for file uploads
//!
//! Uploads carry one or more files plus a shared set of scalar fields in a
//! single boundary-delimited body. Encoding is deterministic for a fixed
//! boundary, which keeps wire-level tests byte-exact.

use bytes::{BufMut, Bytes, BytesMut};
use uuid::Uuid;

use crate::{ClientError, Result};

/// One file to be encoded as a form part
#[derive(Clone, Debug)]
pub struct FilePart {
    /// Form field name (`file` for single uploads, `files` for batches)
    pub field_name: String,
    /// File name reported to the server
    pub file_name: String,
    /// MIME type of the content
    pub mime_type: String,
    /// File content
    pub content: Bytes,
}

impl FilePart {
    pub fn new(
        field_name: impl Into<String>,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            content: content.into(),
        }
    }
}

/// An encoded multipart request body
#[derive(Clone, Debug)]
pub struct MultipartBody {
    /// The full request body
    pub body: Bytes,
    /// Value for the `Content-Type` request header
    pub content_type: String,
    boundary: String,
}

impl MultipartBody {
    /// Encode files and scalar fields with a freshly generated boundary.
    ///
    /// The boundary is derived from a v4 UUID, so a collision with payload
    /// bytes is statistically negligible.
    pub fn encode(files: &[FilePart], fields: &[(String, String)]) -> Result<Self> {
        let boundary = format!("fluxsave-{}", Uuid::new_v4().simple());
        Self::encode_with_boundary(files, fields, &boundary)
    }

    /// Encode with a caller-supplied boundary. Same inputs and boundary
    /// produce byte-identical output.
    pub fn encode_with_boundary(
        files: &[FilePart],
        fields: &[(String, String)],
        boundary: &str,
    ) -> Result<Self> {
        if files.is_empty() {
            return Err(ClientError::Encoding(
                "multipart body requires at least one file".to_string(),
            ));
        }

        let mut buf = BytesMut::new();

        for (name, value) in fields {
            buf.put_slice(format!("--{}\r\n", boundary).as_bytes());
            buf.put_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
            );
            buf.put_slice(value.as_bytes());
            buf.put_slice(b"\r\n");
        }

        for part in files {
            buf.put_slice(format!("--{}\r\n", boundary).as_bytes());
            buf.put_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                    part.field_name, part.file_name
                )
                .as_bytes(),
            );
            buf.put_slice(format!("Content-Type: {}\r\n\r\n", part.mime_type).as_bytes());
            buf.put_slice(&part.content);
            buf.put_slice(b"\r\n");
        }

        buf.put_slice(format!("--{}--\r\n", boundary).as_bytes());

        Ok(Self {
            body: buf.freeze(),
            content_type: format!("multipart/form-data; boundary={}", boundary),
            boundary: boundary.to_string(),
        })
    }

    /// The boundary token used by this body
    pub fn boundary(&self) -> &str {
        &self.boundary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_file() -> FilePart {
        FilePart::new("file", "photo.png", "image/png", &b"not-really-a-png"[..])
    }

    fn sample_fields() -> Vec<(String, String)> {
        vec![
            ("name".to_string(), "hero".to_string()),
            ("compression".to_string(), "low".to_string()),
        ]
    }

    #[test]
    fn test_empty_file_list_rejected() {
        let err = MultipartBody::encode(&[], &sample_fields()).unwrap_err();
        assert!(matches!(err, ClientError::Encoding(_)));
    }

    #[test]
    fn test_deterministic_for_fixed_boundary() {
        let a =
            MultipartBody::encode_with_boundary(&[sample_file()], &sample_fields(), "b-123")
                .unwrap();
        let b =
            MultipartBody::encode_with_boundary(&[sample_file()], &sample_fields(), "b-123")
                .unwrap();

        assert_eq!(a.body, b.body);
        assert_eq!(a.content_type, b.content_type);
    }

    #[test]
    fn test_content_type_carries_boundary() {
        let encoded = MultipartBody::encode(&[sample_file()], &[]).unwrap();
        assert_eq!(
            encoded.content_type,
            format!("multipart/form-data; boundary={}", encoded.boundary())
        );
    }

    #[test]
    fn test_fresh_boundaries_differ() {
        let a = MultipartBody::encode(&[sample_file()], &[]).unwrap();
        let b = MultipartBody::encode(&[sample_file()], &[]).unwrap();
        assert_ne!(a.boundary(), b.boundary());
    }

    #[test]
    fn test_exact_wire_layout() {
        let encoded =
            MultipartBody::encode_with_boundary(&[sample_file()], &sample_fields(), "B").unwrap();

        let expected = "--B\r\n\
            Content-Disposition: form-data; name=\"name\"\r\n\r\n\
            hero\r\n\
            --B\r\n\
            Content-Disposition: form-data; name=\"compression\"\r\n\r\n\
            low\r\n\
            --B\r\n\
            Content-Disposition: form-data; name=\"file\"; filename=\"photo.png\"\r\n\
            Content-Type: image/png\r\n\r\n\
            not-really-a-png\r\n\
            --B--\r\n";

        assert_eq!(encoded.body, Bytes::from(expected));
    }

    #[test]
    fn test_round_trip_recovers_files_and_fields() {
        let files = vec![
            FilePart::new("files", "a.txt", "text/plain", &b"alpha"[..]),
            FilePart::new("files", "b.bin", "application/octet-stream", &b"beta"[..]),
        ];
        let fields = sample_fields();
        let encoded = MultipartBody::encode_with_boundary(&files, &fields, "rt-1").unwrap();

        let (decoded_fields, decoded_files) = decode(&encoded.body, "rt-1");

        assert_eq!(decoded_fields, fields);
        assert_eq!(decoded_files.len(), 2);
        for (decoded, original) in decoded_files.iter().zip(&files) {
            assert_eq!(decoded.0, original.field_name);
            assert_eq!(decoded.1, original.file_name);
            assert_eq!(decoded.2, original.mime_type);
            assert_eq!(decoded.3, original.content);
        }
    }

    // Minimal decoder, just enough to verify the round-trip law.
    fn decode(
        body: &Bytes,
        boundary: &str,
    ) -> (Vec<(String, String)>, Vec<(String, String, String, Bytes)>) {
        let text = body.to_vec();
        let delimiter = format!("--{}\r\n", boundary);
        let terminator = format!("--{}--\r\n", boundary);

        let mut fields = Vec::new();
        let mut files = Vec::new();

        let raw = String::from_utf8(text).expect("test payloads are utf-8");
        let raw = raw.strip_suffix(&terminator).expect("terminator present");

        for part in raw.split(&delimiter).filter(|p| !p.is_empty()) {
            let (header, value) = part.split_once("\r\n\r\n").expect("part header");
            let value = value.strip_suffix("\r\n").expect("part trailer");

            let name = extract(header, "name=\"");
            if let Some(file_name) = try_extract(header, "filename=\"") {
                let mime = header
                    .lines()
                    .find_map(|l| l.strip_prefix("Content-Type: "))
                    .expect("file part content type")
                    .to_string();
                files.push((name, file_name, mime, Bytes::from(value.to_string())));
            } else {
                fields.push((name, value.to_string()));
            }
        }

        (fields, files)
    }

    fn extract(header: &str, prefix: &str) -> String {
        try_extract(header, prefix).expect("attribute present")
    }

    fn try_extract(header: &str, prefix: &str) -> Option<String> {
        let start = header.find(prefix)? + prefix.len();
        let end = header[start..].find('"')? + start;
        Some(header[start..end].to_string())
    }
}
