//! sealstream：大文件的分块流式认证加密
//!
//! 文件布局：
//!
//! ```text
//! Header (21 字节): magic(4) | version(1) | algorithm(4) | base_nonce(12)
//! Chunk*:           length(4, 小端) | ciphertext + tag(length 字节)
//! ```
//!
//! 对外只提供四个操作：`encrypt`、`decrypt`、`validate`、`generate_key`。
//! 加密和解密的输出都先写入临时文件，成功后原子替换目标路径。

mod decrypt;
mod encrypt;
mod validate;

pub mod algorithm;
pub mod crypto;
pub mod error;
pub mod format;
pub mod fs;

pub use algorithm::{ALLOWED_KEY_SIZES, AesGcmVariant};
pub use error::{ConfigError, CorruptionError, FormatError, Result, SealStreamError};

use std::io::Read;
use std::path::Path;

use zeroize::Zeroizing;

/// 加密 `input` 到 `output`，密钥长度须为 16、24 或 32 字节
pub fn encrypt(input: &Path, output: &Path, key: &[u8]) -> Result<()> {
    encrypt::encrypt_file(input, output, key)
}

/// 解密 `input` 到 `output`
pub fn decrypt(input: &Path, output: &Path, key: &[u8]) -> Result<()> {
    decrypt::decrypt_file(input, output, key)
}

/// 加密任意字节源
pub fn encrypt_reader<R: Read>(reader: R, output: &Path, key: &[u8]) -> Result<()> {
    encrypt::encrypt_reader(reader, output, key)
}

/// 解密任意字节源
pub fn decrypt_reader<R: Read>(reader: R, output: &Path, key: &[u8]) -> Result<()> {
    decrypt::decrypt_reader(reader, output, key)
}

/// 仅校验 Header，不读取任何 chunk
pub fn validate(path: &Path) -> Result<()> {
    validate::validate_file(path).map(|_| ())
}

/// 生成随机密钥，`size` 须为 16、24 或 32
pub fn generate_key(size: usize) -> Result<Zeroizing<Vec<u8>>> {
    crypto::key::generate_key(size)
}
