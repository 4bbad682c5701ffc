//! sealstream v1 Stream 实现
//!
//! 职责范围：
//! - 将任意大小的输入按 64 KiB 分割为多个 chunk
//! - 每个 chunk 使用派生 nonce 独立加密与认证
//! - 按 v1 格式顺序写出：`length(u32, 小端) || ciphertext || tag`
//! - 解密时严格校验长度字段，再按相同顺序重建 nonce
//!
//! 流的结束以 chunk 边界处没有更多字节为准，没有显式结束记录。
//!
//! 本模块不负责 Header、原子写入和路径处理。

use std::io::{self, Read, Write};

use crate::crypto::aead::{ChunkCipher, TAG_SIZE};
use crate::error::{CorruptionError, Result, SealStreamError};
use crate::format::nonce::{NONCE_SIZE, NonceSequence};

/// 每个明文 chunk 的大小：64 KiB
pub const CHUNK_SIZE: usize = 64 * 1024;

/// 每个 chunk 前的长度字段大小（u32，小端）
pub const LEN_SIZE: usize = 4;

/// 长度字段允许的最大值（明文 chunk + tag）
pub const MAX_RECORD_LEN: usize = CHUNK_SIZE + TAG_SIZE;

/// 流式加密器
pub struct StreamEncryptor {
    cipher: ChunkCipher,
    nonces: NonceSequence,
    buffer: Vec<u8>,
}

impl StreamEncryptor {
    /// - cipher: 由调用方密钥构造的 chunk cipher
    /// - base_nonce: Header 中写入的 base nonce
    pub fn new(cipher: ChunkCipher, base_nonce: [u8; NONCE_SIZE]) -> Self {
        Self::with_sequence(cipher, NonceSequence::new(base_nonce))
    }

    pub(crate) fn with_sequence(cipher: ChunkCipher, nonces: NonceSequence) -> Self {
        Self {
            cipher,
            nonces,
            buffer: vec![0u8; CHUNK_SIZE],
        }
    }

    /// 从 reader 读取明文，加密后写入 writer，返回写出的 chunk 数
    ///
    /// 除最后一个 chunk 外，每个 chunk 都是满的 64 KiB；空输入不产生任何 chunk。
    pub fn encrypt<R: Read, W: Write>(&mut self, mut reader: R, mut writer: W) -> Result<u64> {
        loop {
            let read_len = read_full(&mut reader, &mut self.buffer)
                .map_err(|e| SealStreamError::io("read plaintext", e))?;
            if read_len == 0 {
                break;
            }

            let (ordinal, nonce) = self.nonces.advance()?;
            let sealed = self.cipher.seal(ordinal, &nonce, &self.buffer[..read_len])?;

            // sealed.len() <= MAX_RECORD_LEN，必然落在 u32 范围内
            writer
                .write_all(&(sealed.len() as u32).to_le_bytes())
                .map_err(|e| SealStreamError::io("write chunk length", e))?;
            writer
                .write_all(&sealed)
                .map_err(|e| SealStreamError::io("write chunk", e))?;

            tracing::trace!(ordinal, plaintext_len = read_len, "sealed chunk");

            if read_len < CHUNK_SIZE {
                break;
            }
        }

        Ok(self.nonces.issued())
    }
}

/// 流式解密器
pub struct StreamDecryptor {
    cipher: ChunkCipher,
    nonces: NonceSequence,
    buffer: Vec<u8>,
}

impl StreamDecryptor {
    pub fn new(cipher: ChunkCipher, base_nonce: [u8; NONCE_SIZE]) -> Self {
        Self::with_sequence(cipher, NonceSequence::new(base_nonce))
    }

    pub(crate) fn with_sequence(cipher: ChunkCipher, nonces: NonceSequence) -> Self {
        Self {
            cipher,
            nonces,
            buffer: Vec::with_capacity(MAX_RECORD_LEN),
        }
    }

    /// 从 reader 读取 chunk 序列，校验并解密后写入 writer，返回 chunk 数
    ///
    /// 任一 chunk 校验失败立即返回错误，该 chunk 的明文不会写出。
    pub fn decrypt<R: Read, W: Write>(&mut self, mut reader: R, mut writer: W) -> Result<u64> {
        loop {
            let mut len_buf = [0u8; LEN_SIZE];
            let got = read_full(&mut reader, &mut len_buf)
                .map_err(|e| SealStreamError::io("read chunk length", e))?;

            // 在 chunk 边界处 EOF，视为正常结束
            if got == 0 {
                break;
            }

            let (ordinal, nonce) = self.nonces.advance()?;

            if got < LEN_SIZE {
                return Err(CorruptionError::TruncatedLength {
                    ordinal,
                    actual: got,
                }
                .into());
            }

            let length = u32::from_le_bytes(len_buf);
            if length == 0 {
                return Err(CorruptionError::ZeroLength { ordinal }.into());
            }

            // 先检查上限再分配，防止恶意长度字段
            if length as usize > MAX_RECORD_LEN {
                return Err(CorruptionError::Oversized {
                    ordinal,
                    length,
                    max: MAX_RECORD_LEN,
                }
                .into());
            }

            let length = length as usize;
            self.buffer.resize(length, 0);

            let got = read_full(&mut reader, &mut self.buffer)
                .map_err(|e| SealStreamError::io("read chunk", e))?;
            if got < length {
                return Err(CorruptionError::Truncated {
                    ordinal,
                    expected: length,
                    actual: got,
                }
                .into());
            }

            let plaintext = self.cipher.open(ordinal, &nonce, &self.buffer)?;

            writer
                .write_all(&plaintext)
                .map_err(|e| SealStreamError::io("write plaintext", e))?;

            tracing::trace!(ordinal, plaintext_len = plaintext.len(), "opened chunk");
        }

        Ok(self.nonces.issued())
    }
}

/// 尽量填满 buf，仅在 EOF 时返回小于 buf.len() 的值
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;

    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(filled)
}
