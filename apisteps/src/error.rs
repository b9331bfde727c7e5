use std::{fmt::Display, io, sync};

#[derive(Debug)]
pub enum Error {
    TemplateResolution(String),
    Deserialization(String),
    Transport(Box<dyn std::error::Error + Send + Sync>),
    InvalidRequest(String),
    PathResolution {
        expression: String,
        causes: Vec<String>,
    },
    CacheMiss(String),
    TypeMismatch(String),
    NoResponse,
    AssertionFailed(String),
    UnsupportedValue(String),
    InvalidArgument(String),
    SchemaValidation(String),
    IoError(io::Error),
    PoisonedLock,
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::TemplateResolution(key) => write!(
                f,
                "Template error: no value saved under the key \"{}\"",
                key
            ),
            Error::Deserialization(e) => write!(f, "Deserialization error: {}", e),
            Error::Transport(e) => write!(f, "HTTP transport error: {}", e),
            Error::InvalidRequest(e) => write!(f, "Invalid HTTP request: {}", e),
            Error::PathResolution { expression, causes } => write!(
                f,
                "Could not resolve node \"{}\": {}",
                expression,
                causes.join("; ")
            ),
            Error::CacheMiss(key) => write!(f, "Nothing is saved under the key \"{}\"", key),
            Error::TypeMismatch(e) => write!(f, "Type mismatch: {}", e),
            Error::NoResponse => write!(f, "No HTTP request has been sent yet"),
            Error::AssertionFailed(e) => write!(f, "Assertion failed: {}", e),
            Error::UnsupportedValue(e) => write!(f, "Unsupported value: {}", e),
            Error::InvalidArgument(e) => write!(f, "Invalid argument: {}", e),
            Error::SchemaValidation(e) => write!(f, "Schema validation failed: {}", e),
            Error::IoError(e) => write!(f, "IoError: {}", e),
            Error::PoisonedLock => write!(f, "The lock was poisoned"),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::IoError(e)
    }
}

impl<T> From<sync::PoisonError<T>> for Error {
    fn from(_: sync::PoisonError<T>) -> Self {
        Error::PoisonedLock
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(Box::new(e))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Deserialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Deserialization(e.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(e: quick_xml::Error) -> Self {
        Error::Deserialization(e.to_string())
    }
}

impl From<quick_xml::DeError> for Error {
    fn from(e: quick_xml::DeError) -> Self {
        Error::Deserialization(e.to_string())
    }
}
