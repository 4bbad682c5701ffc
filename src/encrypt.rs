//! sealstream 加密流程实现
//!
//! 加密流程（严格顺序）：
//! 1. 校验密钥长度
//! 2. 打开输入，在目标目录创建临时文件
//! 3. 生成 base_nonce 并写入 Header
//! 4. 使用 StreamEncryptor 对输入进行流式加密
//! 5. fsync 后原子替换目标文件
//!
//! 任一步骤失败都会删除临时文件，目标路径保持原状。

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::crypto::aead::ChunkCipher;
use crate::error::{Result, SealStreamError};
use crate::format::header::Header;
use crate::format::stream::{CHUNK_SIZE, StreamEncryptor};
use crate::fs::atomic::write_atomic;

/// 使用调用方提供的密钥加密文件
pub fn encrypt_file(input_path: &Path, output_path: &Path, key: &[u8]) -> Result<()> {
    let cipher = ChunkCipher::new(key)?;

    let input = File::open(input_path).map_err(|e| SealStreamError::io("open input", e))?;
    let reader = BufReader::with_capacity(CHUNK_SIZE, input);

    encrypt_with(cipher, reader, output_path)
}

/// 加密任意字节源，输出同样原子写入 `output_path`
pub fn encrypt_reader<R: Read>(reader: R, output_path: &Path, key: &[u8]) -> Result<()> {
    let cipher = ChunkCipher::new(key)?;
    encrypt_with(cipher, reader, output_path)
}

fn encrypt_with<R: Read>(cipher: ChunkCipher, reader: R, output_path: &Path) -> Result<()> {
    let algorithm = cipher.variant().name();
    let header = Header::generate()?;

    let chunks = write_atomic(output_path, |writer| {
        header.write(&mut *writer)?;
        StreamEncryptor::new(cipher, header.base_nonce).encrypt(reader, writer)
    })?;

    tracing::debug!(
        output = %output_path.display(),
        algorithm,
        chunks,
        "encrypted stream"
    );

    Ok(())
}
