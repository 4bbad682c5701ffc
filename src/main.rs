//! sealstream 命令行入口
//!
//! 用法：
//!   sealstream encrypt <input> <output> --key-file <key>
//!   sealstream decrypt <input> <output> --key-file <key>
//!   sealstream validate <file>
//!   sealstream keygen <output> [--size 16|24|32]
//!
//! 所有实际逻辑都委托给库；日志级别由 RUST_LOG 控制，默认 warn。

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

#[derive(Parser)]
#[command(name = "sealstream", version, about = "Chunked AES-GCM file encryption")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encrypt a file
    Encrypt {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, env = "SEALSTREAM_KEY_FILE")]
        key_file: PathBuf,
    },
    /// Decrypt a file
    Decrypt {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, env = "SEALSTREAM_KEY_FILE")]
        key_file: PathBuf,
    },
    /// Check the header of an encrypted file without decrypting it
    Validate { path: PathBuf },
    /// Write a new random key to a file
    Keygen {
        output: PathBuf,
        #[arg(long, default_value_t = 32)]
        size: usize,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Encrypt {
            input,
            output,
            key_file,
        } => {
            let key = read_key(&key_file)?;
            sealstream::encrypt(&input, &output, &key)
                .with_context(|| format!("encrypt {}", input.display()))?;
            println!("encrypted {} -> {}", input.display(), output.display());
        }
        Command::Decrypt {
            input,
            output,
            key_file,
        } => {
            let key = read_key(&key_file)?;
            sealstream::decrypt(&input, &output, &key)
                .with_context(|| format!("decrypt {}", input.display()))?;
            println!("decrypted {} -> {}", input.display(), output.display());
        }
        Command::Validate { path } => {
            sealstream::validate(&path)
                .with_context(|| format!("validate {}", path.display()))?;
            println!("{}: valid", path.display());
        }
        Command::Keygen { output, size } => {
            let key = sealstream::generate_key(size)?;
            sealstream::fs::atomic::write_atomic(&output, |w| {
                w.write_all(&key)
                    .map_err(|e| sealstream::SealStreamError::Io {
                        context: "write key",
                        source: e,
                    })
            })
            .with_context(|| format!("write key to {}", output.display()))?;
            println!("wrote {size}-byte key to {}", output.display());
        }
    }

    Ok(())
}

fn read_key(path: &Path) -> Result<Zeroizing<Vec<u8>>> {
    let key = std::fs::read(path)
        .with_context(|| format!("read key file {}", path.display()))?;
    Ok(Zeroizing::new(key))
}
