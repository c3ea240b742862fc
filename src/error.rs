use thiserror::Error;

use crate::window::MAX_WINDOW_BITS;
use crate::MAX_ZETA_TABLES;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("window width {0} is outside 1..={}", MAX_WINDOW_BITS)]
    WindowWidth(u8),
    #[error("zeta parameter must be a positive integer")]
    ZetaParameter,
    #[error("zeta parameter {0} is configured more than once")]
    DuplicateZeta(u32),
    #[error("{0} zeta tables requested, at most {}", MAX_ZETA_TABLES)]
    TooManyTables(usize),
}

/// Errors produced while loading a packed table file.
#[derive(Error, Debug)]
pub enum PackedError {
    #[error("I/O error while reading packed tables")]
    Io(#[from] std::io::Error),
    #[error("bad magic, not a packed table file")]
    BadMagic,
    #[error("invalid configuration in packed file: {0}")]
    Config(#[from] ConfigError),
    #[error("unknown code tag {0}")]
    UnknownCode(u8),
    #[error("{0} table appears more than once")]
    DuplicateTable(String),
    #[error("{0} table is missing")]
    MissingTable(String),
    #[error("unexpected data after the last table")]
    TrailingData,
    #[error("entry {index} of {code} table is inconsistent: value {value}, length {len}")]
    BadEntry {
        code: String,
        index: usize,
        value: u16,
        len: u8,
    },
}

impl From<ConfigError> for std::io::Error {
    fn from(err: ConfigError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string())
    }
}

impl From<PackedError> for std::io::Error {
    fn from(err: PackedError) -> Self {
        match err {
            PackedError::Io(e) => e,
            _ => std::io::Error::new(std::io::ErrorKind::InvalidData, err.to_string()),
        }
    }
}
