use std::string::FromUtf8Error;

use thiserror::Error;

pub type Result<R> = std::result::Result<R, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Error parsing incoming JSON context {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("I/O error when writing report {0}")]
    IoError(#[from] std::io::Error),
    #[error("Error serializing report document {0}")]
    XmlError(#[from] quick_xml::Error),
    #[error("Report output was not valid UTF-8 {0}")]
    Utf8Error(#[from] FromUtf8Error),
}
