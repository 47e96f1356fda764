//! 写入器实现模块.

pub mod tck;
pub mod trk;

use crate::format_id::FormatId;
use crate::registry::FormatRegistry;

/// 注册所有内置写入器
pub fn register_all_writers(registry: &mut FormatRegistry) {
    registry.register_writer(FormatId::Tck, "tck", tck::TckWriter::create);
    registry.register_writer(FormatId::Trk, "trk", trk::TrkWriter::create);
}
