use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP {0}")]
    Http(u16),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Invalid attribute: {0}")]
    InvalidAttribute(String),

    #[error("Unknown wood type: {0}")]
    UnknownWoodType(String),

    #[error("Amount out of range: {0}")]
    AmountOutOfRange(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
