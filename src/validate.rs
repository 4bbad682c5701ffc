//! 只读取 Header 的格式校验
//!
//! 不读取、不认证任何 chunk，用于在完整解密前快速拒绝明显无效的文件。

use std::fs::File;
use std::path::Path;

use crate::error::{FormatError, Result, SealStreamError};
use crate::format::header::{HEADER_SIZE, Header};

pub fn validate_file(path: &Path) -> Result<Header> {
    let file = File::open(path).map_err(|e| SealStreamError::io("open input", e))?;

    let len = file
        .metadata()
        .map_err(|e| SealStreamError::io("read file metadata", e))?
        .len();
    if len < HEADER_SIZE as u64 {
        return Err(FormatError::TooShort {
            len,
            expected: HEADER_SIZE,
        }
        .into());
    }

    Header::read(file)
}
