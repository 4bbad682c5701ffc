//! sealstream 单个 chunk 的 AEAD 加解密
//!
//! 每个 chunk 使用独立的 12 字节 nonce（由 `format::nonce` 派生），
//! 输出为 `ciphertext || tag`，tag 固定 16 字节。
//!
//! 安全约束：
//! - 认证失败时不返回任何明文
//! - 明文长度上限由调用方保证，本模块不做检查

use aes_gcm::{
    Aes128Gcm, Aes256Gcm, AesGcm, KeyInit, Nonce,
    aead::{Aead, consts::U12},
    aes::Aes192,
};

use crate::algorithm::{self, AesGcmVariant};
use crate::error::{ConfigError, Result, SealStreamError};
use crate::format::nonce::NONCE_SIZE;

/// AES-192-GCM（aes-gcm 未直接导出该别名）
pub type Aes192Gcm = AesGcm<Aes192, U12>;

/// AEAD 认证标签长度
pub const TAG_SIZE: usize = 16;

/// 按密钥长度选定的 AES-GCM 实例
pub enum ChunkCipher {
    Aes128(Aes128Gcm),
    Aes192(Aes192Gcm),
    Aes256(Aes256Gcm),
}

impl ChunkCipher {
    /// 根据密钥长度构造对应强度的 cipher
    ///
    /// 密钥长度不在 {16, 24, 32} 时返回 `ConfigError`。
    pub fn new(key: &[u8]) -> Result<Self> {
        let variant = algorithm::check_key(key)?;

        // 长度已校验，new_from_slice 不会失败
        let invalid = |_| SealStreamError::from(ConfigError::InvalidKeyLength { len: key.len() });

        Ok(match variant {
            AesGcmVariant::Aes128Gcm => Self::Aes128(Aes128Gcm::new_from_slice(key).map_err(invalid)?),
            AesGcmVariant::Aes192Gcm => Self::Aes192(Aes192Gcm::new_from_slice(key).map_err(invalid)?),
            AesGcmVariant::Aes256Gcm => Self::Aes256(Aes256Gcm::new_from_slice(key).map_err(invalid)?),
        })
    }

    pub fn variant(&self) -> AesGcmVariant {
        match self {
            Self::Aes128(_) => AesGcmVariant::Aes128Gcm,
            Self::Aes192(_) => AesGcmVariant::Aes192Gcm,
            Self::Aes256(_) => AesGcmVariant::Aes256Gcm,
        }
    }

    /// 加密一个 chunk，返回 `ciphertext || tag`
    ///
    /// `ordinal` 仅用于错误诊断。
    pub fn seal(&self, ordinal: u32, nonce: &[u8; NONCE_SIZE], plaintext: &[u8]) -> Result<Vec<u8>> {
        let nonce = Nonce::<U12>::from_slice(nonce);

        let sealed = match self {
            Self::Aes128(cipher) => cipher.encrypt(nonce, plaintext),
            Self::Aes192(cipher) => cipher.encrypt(nonce, plaintext),
            Self::Aes256(cipher) => cipher.encrypt(nonce, plaintext),
        };

        sealed.map_err(|_| SealStreamError::Encryption { ordinal })
    }

    /// 解密并校验一个 chunk
    ///
    /// tag 校验失败（篡改、密钥错误、数据损坏）时返回 `Authentication`。
    pub fn open(&self, ordinal: u32, nonce: &[u8; NONCE_SIZE], ciphertext: &[u8]) -> Result<Vec<u8>> {
        let nonce = Nonce::<U12>::from_slice(nonce);

        let opened = match self {
            Self::Aes128(cipher) => cipher.decrypt(nonce, ciphertext),
            Self::Aes192(cipher) => cipher.decrypt(nonce, ciphertext),
            Self::Aes256(cipher) => cipher.decrypt(nonce, ciphertext),
        };

        opened.map_err(|_| SealStreamError::Authentication { ordinal })
    }
}
