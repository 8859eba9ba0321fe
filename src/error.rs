use std::fmt::Display;

use http::StatusCode;
use serde::de;

/// Errors returned while decoding query values into a record.
///
/// Every error is the caller's fault, so [`Error::status`] is always
/// `400 Bad Request`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The input contained a key that no field of the record consumed.
    #[error("unknown query: {0:?}")]
    UnknownKey(String),

    /// The values supplied for `key` could not be decoded.
    #[error("value {key:?}: {reason}")]
    Value { key: String, reason: Reason },
}

/// Why the values of a single key were rejected.
///
/// Field and scalar decoders return a bare `Reason`; the walker attaches the
/// key it was decoding.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Reason {
    #[error("missing value")]
    MissingValue,
    #[error("multiple values")]
    MultipleValues,
    #[error("boolean must not have value")]
    BooleanWithValue,
    #[error("must be an integer")]
    Integer,
    #[error("must be a number")]
    Number,
    #[error("must be a boolean")]
    Boolean,
    #[error("must be a character")]
    Character,
    #[error("must be a time duration")]
    Duration,
    #[error("must be a UUID")]
    Uuid,
    #[error("unsupported type {0:?}")]
    Unsupported(String),
    #[error("{0}")]
    Custom(String),

    /// Element `index` of a delimited list was rejected.
    #[error("element {index}: {reason}")]
    Element { index: usize, reason: Box<Reason> },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Attach `key` to `reason`.
    ///
    /// List element failures are reported against the element, so
    /// `Reason::Element { index: 1, .. }` on `tags` becomes key `tags[1]`.
    pub fn value(key: &str, reason: Reason) -> Self {
        let mut key = key.to_owned();
        let mut reason = reason;
        while let Reason::Element { index, reason: inner } = reason {
            let mut buffer = itoa::Buffer::new();
            key.push('[');
            key.push_str(buffer.format(index));
            key.push(']');
            reason = *inner;
        }
        Error::Value { key, reason }
    }

    /// The HTTP status a request rejected with this error should carry.
    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    /// The key the error refers to.
    pub fn key(&self) -> &str {
        match self {
            Error::UnknownKey(key) | Error::Value { key, .. } => key,
        }
    }
}

impl Reason {
    /// Wrap the error of a custom hook.
    pub fn custom<T: Display>(msg: T) -> Self {
        Reason::Custom(msg.to_string())
    }

    pub(crate) fn element(index: usize, reason: Reason) -> Self {
        Reason::Element {
            index,
            reason: Box::new(reason),
        }
    }
}

impl de::Error for Reason {
    fn custom<T>(msg: T) -> Self
    where
        T: Display,
    {
        Reason::Custom(msg.to_string())
    }
}
