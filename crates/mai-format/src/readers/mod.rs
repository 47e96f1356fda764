//! 读取器实现模块.

pub mod tck;
pub mod trk;

use crate::format_id::FormatId;
use crate::registry::FormatRegistry;

/// 注册所有内置读取器
pub fn register_all_readers(registry: &mut FormatRegistry) {
    registry.register_reader(FormatId::Tck, "tck", tck::TckReader::create);
    registry.register_reader(FormatId::Trk, "trk", trk::TrkReader::create);
    registry.register_probe(Box::new(tck::TckProbe));
    registry.register_probe(Box::new(trk::TrkProbe));
}
