//! sealstream 原子写入工具。
//!
//! 提供「先写临时文件，成功后再替换目标文件」的写出语义：
//! - 成功：临时文件 flush + fsync 后 rename 到目标路径
//! - 失败：删除临时文件，目标路径保持调用前的状态

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Result, SealStreamError};

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

const WRITE_BUFFER_SIZE: usize = 128 * 1024;

/// 原子写文件。
///
/// 流程：
/// 1. 在目标所在目录创建唯一命名的临时文件；
/// 2. 调用 `write_fn` 写入完整内容；
/// 3. flush、fsync 后使用 rename 原子替换目标文件。
///
/// 任一步骤失败都会删除临时文件并返回错误。
pub fn write_atomic<T, F>(target: &Path, write_fn: F) -> Result<T>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<T>,
{
    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let tmp_path = build_tmp_path(parent, target);
    let tmp_file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|e| SealStreamError::io("create temporary output", e))?;

    tracing::debug!(tmp = %tmp_path.display(), target = %target.display(), "writing temporary output");

    match fill_and_commit(tmp_file, &tmp_path, target, write_fn) {
        Ok(value) => {
            sync_dir(parent);
            tracing::debug!(target = %target.display(), "committed output");
            Ok(value)
        }
        Err(err) => {
            if let Err(rm_err) = fs::remove_file(&tmp_path) {
                tracing::warn!(
                    tmp = %tmp_path.display(),
                    error = %rm_err,
                    "failed to remove temporary output"
                );
            }
            tracing::debug!(target = %target.display(), error = %err, "aborted output");
            Err(err)
        }
    }
}

fn fill_and_commit<T, F>(file: File, tmp_path: &Path, target: &Path, write_fn: F) -> Result<T>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<T>,
{
    let mut writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, file);
    let value = write_fn(&mut writer)?;

    writer
        .flush()
        .map_err(|e| SealStreamError::io("flush temporary output", e))?;
    let file = writer
        .into_inner()
        .map_err(|e| SealStreamError::io("flush temporary output", e.into_error()))?;
    file.sync_all()
        .map_err(|e| SealStreamError::io("sync temporary output", e))?;
    drop(file);

    fs::rename(tmp_path, target).map_err(|e| SealStreamError::io("rename output into place", e))?;

    Ok(value)
}

/// rename 之后同步目录项；失败不影响已完成的替换
#[cfg(unix)]
fn sync_dir(dir: &Path) {
    if let Err(err) = File::open(dir).and_then(|d| d.sync_all()) {
        tracing::debug!(dir = %dir.display(), error = %err, "directory sync skipped");
    }
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) {}

fn build_tmp_path(parent: &Path, target: &Path) -> PathBuf {
    let base_name = target
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("sealstream-output");

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();

    let counter = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);

    parent.join(format!(
        ".{base_name}.tmp-{}-{timestamp}-{counter}",
        std::process::id()
    ))
}
