//! 目录批量转换.
//!
//! 输入为目录时, 逐个转换其中扩展名匹配的文件. 每个文件独立处理:
//! 单个文件失败只计入失败数并继续, 不会中断整个批次,
//! 也不会污染其余文件的统计.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use mai_core::{DataType, MaiError, MaiResult};
use mai_format::{FormatId, FormatRegistry};

use crate::convert::convert_file;

/// 批量转换结果
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// 成功转换的文件数
    pub converted: u64,
    /// 失败的文件数
    pub failed: u64,
}

/// 转换目录中所有扩展名匹配源格式的文件
///
/// 输出文件落在 `out_dir` 下, 文件名与输入相同, 扩展名换成目标格式.
pub fn convert_dir(
    registry: &FormatRegistry,
    in_dir: &Path,
    out_dir: &Path,
    in_format: FormatId,
    out_format: FormatId,
    tck_datatype: DataType,
    overwrite: bool,
) -> MaiResult<BatchOutcome> {
    if out_dir.exists() {
        if !out_dir.is_dir() {
            return Err(MaiError::InvalidArgument(format!(
                "输入是目录时, 输出 '{}' 也必须是目录",
                out_dir.display()
            )));
        }
    } else {
        std::fs::create_dir_all(out_dir)?;
    }

    let mut entries: Vec<PathBuf> = std::fs::read_dir(in_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .collect();
    entries.sort();

    let mut outcome = BatchOutcome::default();
    for path in entries {
        if !path.is_file() {
            continue;
        }
        let ext_matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(in_format.extension()));
        if !ext_matches {
            continue;
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let out_path = out_dir.join(format!("{stem}.{}", out_format.extension()));

        match convert_file(
            registry,
            &path,
            &out_path,
            in_format,
            out_format,
            tck_datatype,
            overwrite,
        ) {
            Ok(stats) => {
                info!("{} -> {}: {stats}", path.display(), out_path.display());
                eprintln!("  {} -> {}: {stats}", path.display(), out_path.display());
                outcome.converted += 1;
            }
            Err(e) => {
                error!("转换 '{}' 失败: {e}", path.display());
                eprintln!("  错误: 转换 '{}' 失败: {e}", path.display());
                outcome.failed += 1;
            }
        }
    }

    Ok(outcome)
}
