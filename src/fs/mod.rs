//! sealstream 文件系统工具。

pub mod atomic;
