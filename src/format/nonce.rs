//! 每个 chunk 的 nonce 派生
//!
//! nonce = base_nonce 前 8 字节 || ordinal（u32，小端）
//!
//! 同一文件内 ordinal 从 0 开始严格递增，随机前缀每个文件重新生成，
//! 因此 (key, nonce) 在同一文件内不会重复。计数器用尽时报错，绝不回绕。

use crate::error::{Result, SealStreamError};

/// AES-GCM nonce 长度
pub const NONCE_SIZE: usize = 12;

/// nonce 中保持不变的随机前缀长度
pub const NONCE_PREFIX_SIZE: usize = 8;

/// 派生第 `ordinal` 个 chunk 的 nonce
pub fn derive_nonce(base_nonce: &[u8; NONCE_SIZE], ordinal: u32) -> [u8; NONCE_SIZE] {
    let mut nonce = [0u8; NONCE_SIZE];
    nonce[..NONCE_PREFIX_SIZE].copy_from_slice(&base_nonce[..NONCE_PREFIX_SIZE]);
    nonce[NONCE_PREFIX_SIZE..].copy_from_slice(&ordinal.to_le_bytes());
    nonce
}

/// 按顺序产出 (ordinal, nonce)，ordinal 超过 u32 范围时返回 `CounterExhausted`
#[derive(Debug, Clone)]
pub struct NonceSequence {
    base_nonce: [u8; NONCE_SIZE],
    next: Option<u32>,
}

impl NonceSequence {
    pub fn new(base_nonce: [u8; NONCE_SIZE]) -> Self {
        Self {
            base_nonce,
            next: Some(0),
        }
    }

    #[cfg(test)]
    pub(crate) fn starting_at(base_nonce: [u8; NONCE_SIZE], ordinal: u32) -> Self {
        Self {
            base_nonce,
            next: Some(ordinal),
        }
    }

    pub fn advance(&mut self) -> Result<(u32, [u8; NONCE_SIZE])> {
        let ordinal = self.next.ok_or(SealStreamError::CounterExhausted)?;
        self.next = ordinal.checked_add(1);
        Ok((ordinal, derive_nonce(&self.base_nonce, ordinal)))
    }

    /// 已产出的 nonce 数量
    pub fn issued(&self) -> u64 {
        match self.next {
            Some(next) => u64::from(next),
            None => u64::from(u32::MAX) + 1,
        }
    }
}
