//! sealstream 错误类型
//!
//! 每一种失败都有独立的判别值；I/O 错误额外携带所处步骤与底层原因。

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SealStreamError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: failed to {context}")]
    Io {
        context: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("invalid file format: {0}")]
    Format(#[from] FormatError),

    #[error("corrupted file: {0}")]
    Corruption(#[from] CorruptionError),

    #[error("authentication failed at chunk {ordinal}")]
    Authentication { ordinal: u32 },

    #[error("encryption failed at chunk {ordinal}")]
    Encryption { ordinal: u32 },

    #[error("chunk counter exhausted: a file may hold at most 2^32 chunks")]
    CounterExhausted,

    #[error("secure random source unavailable")]
    Entropy(#[from] rand::Error),
}

impl SealStreamError {
    /// 为 I/O 错误附加步骤描述
    pub(crate) fn io(context: &'static str, source: io::Error) -> Self {
        Self::Io { context, source }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("key length must be 16, 24, or 32 bytes, got {len}")]
    InvalidKeyLength { len: usize },

    #[error("key size must be 16, 24, or 32 bytes, got {size}")]
    InvalidKeySize { size: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("file too short: {len} bytes, header needs {expected}")]
    TooShort { len: u64, expected: usize },

    #[error("magic bytes mismatch: expected {expected:?}, found {found:?}")]
    MagicMismatch { expected: [u8; 4], found: [u8; 4] },

    #[error("unsupported version: expected {expected}, found {found}")]
    UnsupportedVersion { expected: u8, found: u8 },

    #[error("unsupported algorithm: expected {expected:?}, found {found:?}")]
    UnsupportedAlgorithm { expected: [u8; 4], found: [u8; 4] },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CorruptionError {
    #[error("chunk {ordinal} has zero length")]
    ZeroLength { ordinal: u32 },

    #[error("chunk {ordinal} declares {length} bytes, limit is {max}")]
    Oversized { ordinal: u32, length: u32, max: usize },

    #[error("chunk {ordinal} length prefix cut off after {actual} bytes")]
    TruncatedLength { ordinal: u32, actual: usize },

    #[error("chunk {ordinal} truncated: expected {expected} bytes, found {actual}")]
    Truncated {
        ordinal: u32,
        expected: usize,
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, SealStreamError>;
