//! sealstream AEAD 算法模块。
//!
//! 文件格式只有一个算法标识（AES-GCM），具体强度由密钥长度决定。

use crate::error::ConfigError;

/// 允许的密钥长度（字节）
pub const ALLOWED_KEY_SIZES: [usize; 3] = [16, 24, 32];

/// AES-GCM 的三种强度。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AesGcmVariant {
    Aes128Gcm,
    Aes192Gcm,
    Aes256Gcm,
}

impl AesGcmVariant {
    pub fn from_key_len(len: usize) -> Option<Self> {
        match len {
            16 => Some(Self::Aes128Gcm),
            24 => Some(Self::Aes192Gcm),
            32 => Some(Self::Aes256Gcm),
            _ => None,
        }
    }

    pub fn key_len(self) -> usize {
        match self {
            Self::Aes128Gcm => 16,
            Self::Aes192Gcm => 24,
            Self::Aes256Gcm => 32,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Aes128Gcm => "AES-128-GCM",
            Self::Aes192Gcm => "AES-192-GCM",
            Self::Aes256Gcm => "AES-256-GCM",
        }
    }
}

/// 校验调用方提供的密钥长度
pub fn check_key(key: &[u8]) -> Result<AesGcmVariant, ConfigError> {
    AesGcmVariant::from_key_len(key.len())
        .ok_or(ConfigError::InvalidKeyLength { len: key.len() })
}
