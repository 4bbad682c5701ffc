//! sealstream 解密流程实现
//!
//! 解密流程（严格顺序）：
//! 1. 校验密钥长度
//! 2. 读取并校验 Header（失败时不会创建任何输出）
//! 3. 初始化 StreamDecryptor，流式解密到临时文件
//! 4. 全部 chunk 校验通过后原子替换目标文件
//!
//! 注意：
//! - 任一 chunk 校验失败必须立即报错，临时文件被删除
//! - 目标路径上永远不会出现部分解密的内容

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::crypto::aead::ChunkCipher;
use crate::error::{Result, SealStreamError};
use crate::format::header::Header;
use crate::format::stream::{MAX_RECORD_LEN, StreamDecryptor};
use crate::fs::atomic::write_atomic;

/// 使用调用方提供的密钥解密文件
pub fn decrypt_file(input_path: &Path, output_path: &Path, key: &[u8]) -> Result<()> {
    let cipher = ChunkCipher::new(key)?;

    let input = File::open(input_path).map_err(|e| SealStreamError::io("open input", e))?;
    let reader = BufReader::with_capacity(MAX_RECORD_LEN, input);

    decrypt_with(cipher, reader, output_path)
}

/// 解密任意字节源，输出同样原子写入 `output_path`
pub fn decrypt_reader<R: Read>(reader: R, output_path: &Path, key: &[u8]) -> Result<()> {
    let cipher = ChunkCipher::new(key)?;
    decrypt_with(cipher, reader, output_path)
}

fn decrypt_with<R: Read>(cipher: ChunkCipher, mut reader: R, output_path: &Path) -> Result<()> {
    // ---------- 读取并校验 Header ----------
    let header = Header::read(&mut reader)?;

    // ---------- Stream 解密 ----------
    let chunks = write_atomic(output_path, |writer| {
        StreamDecryptor::new(cipher, header.base_nonce).decrypt(reader, writer)
    })?;

    tracing::debug!(output = %output_path.display(), chunks, "decrypted stream");

    Ok(())
}
