//! sealstream 密钥生成
//!
//! 密钥由调用方保存和传入，文件中不记录任何密钥材料。
//! 生成的密钥包裹在 `Zeroizing` 中，离开作用域后自动清零。

use rand::{RngCore, rngs::OsRng};
use zeroize::Zeroizing;

use crate::algorithm::AesGcmVariant;
use crate::error::{ConfigError, Result};

/// 生成指定长度的随机密钥
///
/// `size` 必须为 16、24 或 32，否则返回 `ConfigError::InvalidKeySize`。
pub fn generate_key(size: usize) -> Result<Zeroizing<Vec<u8>>> {
    let variant =
        AesGcmVariant::from_key_len(size).ok_or(ConfigError::InvalidKeySize { size })?;

    let mut key = Zeroizing::new(vec![0u8; variant.key_len()]);
    OsRng.try_fill_bytes(&mut key[..])?;

    tracing::debug!(algorithm = variant.name(), "generated key");

    Ok(key)
}
