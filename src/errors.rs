use std::{io, str::Utf8Error};

use quick_xml::events::attributes::AttrError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("attribute error: {0}")]
    Attr(#[from] AttrError),

    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] Utf8Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// An `id`, `lat`, `lon` or `ref` value that is not a number of the expected type.
    #[error("malformed {attribute} {value:?} on <{element}>")]
    MalformedNumber {
        element: String,
        attribute: String,
        value: String,
    },

    #[error("{0}")]
    Message(String),
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Message(value.to_string())
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Message(value)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
