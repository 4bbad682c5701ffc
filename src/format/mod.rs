//! sealstream v1 文件格式：Header、nonce 派生与 chunk 流。

pub mod header;
pub mod nonce;
pub mod stream;
