//! Client error types and API error decoding

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// Invalid configuration or bad call arguments; raised before any network I/O
    #[error("configuration error: {0}")]
    Config(String),

    /// Local payload construction failure (multipart encoding, file reads)
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The transport gave up before a response arrived
    #[error("request timed out")]
    Timeout,

    /// The server responded with an error payload
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Transport-level failure other than a timeout
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// A 2xx response whose body did not match the expected envelope
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

/// Machine-readable error codes returned by the Fluxsave API
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// 413: file exceeds the plan's maximum file size
    FileTooLarge,
    /// 413: total storage quota exceeded
    StorageLimit,
    /// 403: plan's file count limit reached
    FileCountLimit,
    /// 415: file type blocked by the plan
    MimeTypeNotAllowed,
    /// 403: compression level not permitted by the plan
    CompressionNotAllowed,
    /// 402: subscription is not active
    SubscriptionInactive,
    /// 403: plan's folder count limit reached
    FolderCountLimit,
    /// 400: duplicate email on registration
    EmailAlreadyRegistered,
    /// 403: login attempted before verifying email
    EmailNotVerified,
    /// 400: wrong email or password
    InvalidCredentials,
    /// 400: bad or expired verification code
    InvalidOtp,
    /// 401
    Unauthorized,
    /// 404
    NotFound,
    /// Anything else
    Unknown,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FileTooLarge => "FILE_TOO_LARGE",
            Self::StorageLimit => "STORAGE_LIMIT",
            Self::FileCountLimit => "FILE_COUNT_LIMIT",
            Self::MimeTypeNotAllowed => "MIME_TYPE_NOT_ALLOWED",
            Self::CompressionNotAllowed => "COMPRESSION_NOT_ALLOWED",
            Self::SubscriptionInactive => "SUBSCRIPTION_INACTIVE",
            Self::FolderCountLimit => "FOLDER_COUNT_LIMIT",
            Self::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
            Self::EmailNotVerified => "EMAIL_NOT_VERIFIED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidOtp => "INVALID_OTP",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotFound => "NOT_FOUND",
            Self::Unknown => "UNKNOWN",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        Some(match value {
            "FILE_TOO_LARGE" => Self::FileTooLarge,
            "STORAGE_LIMIT" => Self::StorageLimit,
            "FILE_COUNT_LIMIT" => Self::FileCountLimit,
            "MIME_TYPE_NOT_ALLOWED" => Self::MimeTypeNotAllowed,
            "COMPRESSION_NOT_ALLOWED" => Self::CompressionNotAllowed,
            "SUBSCRIPTION_INACTIVE" => Self::SubscriptionInactive,
            "FOLDER_COUNT_LIMIT" => Self::FolderCountLimit,
            "EMAIL_ALREADY_REGISTERED" => Self::EmailAlreadyRegistered,
            "EMAIL_NOT_VERIFIED" => Self::EmailNotVerified,
            "INVALID_CREDENTIALS" => Self::InvalidCredentials,
            "INVALID_OTP" => Self::InvalidOtp,
            "UNAUTHORIZED" => Self::Unauthorized,
            "NOT_FOUND" => Self::NotFound,
            "UNKNOWN" => Self::Unknown,
            _ => return None,
        })
    }

    /// Resolve a code from the status and message when the body carries no
    /// recognized code. The 413/403/400 statuses are ambiguous on their own,
    /// so the message text disambiguates them.
    fn resolve(status: u16, message: &str) -> Self {
        let m = message.to_lowercase();
        match status {
            413 if m.contains("storage limit") => Self::StorageLimit,
            413 => Self::FileTooLarge,
            415 => Self::MimeTypeNotAllowed,
            402 => Self::SubscriptionInactive,
            403 if m.contains("compression") => Self::CompressionNotAllowed,
            403 if m.contains("folder") => Self::FolderCountLimit,
            403 if m.contains("file") || m.contains("maximum") => Self::FileCountLimit,
            403 if m.contains("email") => Self::EmailNotVerified,
            400 if m.contains("already registered") => Self::EmailAlreadyRegistered,
            400 if m.contains("invalid email or password") || m.contains("invalid credentials") => {
                Self::InvalidCredentials
            }
            400 if m.contains("otp") => Self::InvalidOtp,
            401 => Self::Unauthorized,
            404 => Self::NotFound,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error response from the Fluxsave API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{status} [{code}]: {message}")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,
    /// HTTP status code
    pub status: u16,
    /// Human-readable error description from the API
    pub message: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
}

impl ApiError {
    /// Decode an error response. An explicit `code` field wins when it names
    /// a known code; otherwise the status and message resolve one. A body
    /// that is not JSON still yields an error value, never a decode failure.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let parsed: Option<ErrorBody> = serde_json::from_slice(body).ok();

        let message = parsed
            .as_ref()
            .and_then(|b| b.message.clone())
            .or_else(|| {
                let text = String::from_utf8_lossy(body).trim().to_string();
                if text.is_empty() {
                    None
                } else {
                    Some(text)
                }
            })
            .unwrap_or_else(|| canonical_reason(status));

        let code = parsed
            .as_ref()
            .and_then(|b| b.code.as_deref())
            .and_then(ErrorCode::parse)
            .unwrap_or_else(|| ErrorCode::resolve(status, &message));

        Self {
            code,
            status,
            message,
        }
    }
}

fn canonical_reason(status: u16) -> String {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("unknown error")
        .to_string()
}
