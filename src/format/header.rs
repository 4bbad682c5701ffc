//! sealstream v1 Header 实现
//!
//! Header 的职责：
//! - 标识文件类型（magic）
//! - 指明版本号
//! - 指明 AEAD 算法（AES-GCM，强度由密钥长度决定）
//! - 提供各 chunk 派生 nonce 所需的 base_nonce
//!
//! 固定布局（21 字节）：
//!
//! ```text
//! magic(4) | version(1) | algorithm(4) | base_nonce(12)
//! ```
//!
//! 解密前必须完整读取并校验 Header，任一字段不匹配即拒绝继续处理。

use std::io::{self, Read, Write};

use rand::{RngCore, rngs::OsRng};

use crate::error::{FormatError, Result, SealStreamError};
use crate::format::nonce::{NONCE_PREFIX_SIZE, NONCE_SIZE};

/// 文件魔数（ASCII）
pub const MAGIC: [u8; 4] = *b"SYM1";

/// 当前支持的版本号
pub const VERSION: u8 = 1;

/// 算法标识：AES-GCM
pub const ALGORITHM_ID: [u8; 4] = *b"AESG";

/// base nonce 长度：8 字节随机前缀 + 4 字节计数器位
pub const BASE_NONCE_SIZE: usize = NONCE_SIZE;

/// Header 固定大小
pub const HEADER_SIZE: usize = MAGIC.len() + 1 + ALGORITHM_ID.len() + BASE_NONCE_SIZE;

const VERSION_OFFSET: usize = MAGIC.len();
const ALGORITHM_OFFSET: usize = VERSION_OFFSET + 1;
const NONCE_OFFSET: usize = ALGORITHM_OFFSET + ALGORITHM_ID.len();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub base_nonce: [u8; BASE_NONCE_SIZE],
}

impl Header {
    pub fn new(base_nonce: [u8; BASE_NONCE_SIZE]) -> Self {
        Self { base_nonce }
    }

    /// 为新文件生成 Header
    ///
    /// 前 8 字节取自系统安全随机源，后 4 字节保留给计数器，置零。
    pub fn generate() -> Result<Self> {
        let mut base_nonce = [0u8; BASE_NONCE_SIZE];
        OsRng.try_fill_bytes(&mut base_nonce[..NONCE_PREFIX_SIZE])?;
        Ok(Self::new(base_nonce))
    }

    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[..VERSION_OFFSET].copy_from_slice(&MAGIC);
        bytes[VERSION_OFFSET] = VERSION;
        bytes[ALGORITHM_OFFSET..NONCE_OFFSET].copy_from_slice(&ALGORITHM_ID);
        bytes[NONCE_OFFSET..].copy_from_slice(&self.base_nonce);
        bytes
    }

    /// 解析并校验 Header
    ///
    /// 依次检查 magic、version、algorithm，任一不匹配立即返回对应的 `FormatError`。
    pub fn decode(bytes: &[u8; HEADER_SIZE]) -> std::result::Result<Self, FormatError> {
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[..VERSION_OFFSET]);
        if magic != MAGIC {
            return Err(FormatError::MagicMismatch {
                expected: MAGIC,
                found: magic,
            });
        }

        let version = bytes[VERSION_OFFSET];
        if version != VERSION {
            return Err(FormatError::UnsupportedVersion {
                expected: VERSION,
                found: version,
            });
        }

        let mut algorithm = [0u8; 4];
        algorithm.copy_from_slice(&bytes[ALGORITHM_OFFSET..NONCE_OFFSET]);
        if algorithm != ALGORITHM_ID {
            return Err(FormatError::UnsupportedAlgorithm {
                expected: ALGORITHM_ID,
                found: algorithm,
            });
        }

        let mut base_nonce = [0u8; BASE_NONCE_SIZE];
        base_nonce.copy_from_slice(&bytes[NONCE_OFFSET..]);

        Ok(Self { base_nonce })
    }

    pub fn write<W: Write>(&self, mut writer: W) -> Result<()> {
        writer
            .write_all(&self.encode())
            .map_err(|e| SealStreamError::io("write header", e))
    }

    /// 从输入流读取并校验 Header
    ///
    /// 输入不足 21 字节时返回 `FormatError::TooShort`。
    pub fn read<R: Read>(mut reader: R) -> Result<Self> {
        let mut bytes = [0u8; HEADER_SIZE];
        let mut filled = 0;

        while filled < HEADER_SIZE {
            match reader.read(&mut bytes[filled..]) {
                Ok(0) => {
                    return Err(FormatError::TooShort {
                        len: filled as u64,
                        expected: HEADER_SIZE,
                    }
                    .into());
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(SealStreamError::io("read header", e)),
            }
        }

        Ok(Self::decode(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Header {
        Header::new([1, 2, 3, 4, 5, 6, 7, 8, 0, 0, 0, 0])
    }

    #[test]
    fn header_is_21_bytes() {
        assert_eq!(HEADER_SIZE, 21);
        let bytes = sample().encode();
        assert_eq!(&bytes[..4], b"SYM1");
        assert_eq!(bytes[4], 1);
        assert_eq!(&bytes[5..9], b"AESG");
        assert_eq!(&bytes[9..], &sample().base_nonce);
    }

    #[test]
    fn decode_accepts_encoded_header() {
        assert_eq!(Header::decode(&sample().encode()), Ok(sample()));
    }

    #[test]
    fn generated_counter_bytes_are_zero() {
        let header = Header::generate().unwrap();
        assert_eq!(&header.base_nonce[NONCE_PREFIX_SIZE..], &[0, 0, 0, 0]);
    }

    #[test]
    fn decode_rejects_bad_magic() {
        let mut bytes = sample().encode();
        bytes[0] = b'X';
        assert_eq!(
            Header::decode(&bytes),
            Err(FormatError::MagicMismatch {
                expected: MAGIC,
                found: *b"XYM1",
            })
        );
    }

    #[test]
    fn decode_rejects_bad_version() {
        let mut bytes = sample().encode();
        bytes[4] = 2;
        assert_eq!(
            Header::decode(&bytes),
            Err(FormatError::UnsupportedVersion {
                expected: 1,
                found: 2
            })
        );
    }

    #[test]
    fn decode_rejects_bad_algorithm() {
        let mut bytes = sample().encode();
        bytes[5..9].copy_from_slice(b"CHCH");
        assert_eq!(
            Header::decode(&bytes),
            Err(FormatError::UnsupportedAlgorithm {
                expected: ALGORITHM_ID,
                found: *b"CHCH",
            })
        );
    }

    #[test]
    fn read_reports_short_input() {
        let bytes = sample().encode();
        let err = Header::read(&bytes[..10]).unwrap_err();
        assert!(matches!(
            err,
            SealStreamError::Format(FormatError::TooShort { len: 10, expected: 21 })
        ));
    }
}
