//! sealstream 密码学原语：chunk AEAD 与密钥生成。

pub mod aead;
pub mod key;
