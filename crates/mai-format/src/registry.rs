//! 容器格式注册表.
//!
//! 管理所有已注册的读取器/写入器, 支持按格式标识查找和自动探测.

use std::collections::HashMap;

use mai_core::{MaiError, MaiResult};

use crate::format_id::FormatId;
use crate::probe::{FormatProbe, ProbeResult};
use crate::reader::TrackReader;
use crate::writer::TrackWriter;

/// 读取器工厂函数类型
pub type ReaderFactory = fn() -> MaiResult<Box<dyn TrackReader>>;

/// 写入器工厂函数类型
pub type WriterFactory = fn() -> MaiResult<Box<dyn TrackWriter>>;

/// 容器格式注册表
pub struct FormatRegistry {
    /// 读取器工厂映射
    readers: HashMap<FormatId, ReaderEntry>,
    /// 写入器工厂映射
    writers: HashMap<FormatId, WriterEntry>,
    /// 格式探测器列表
    probes: Vec<Box<dyn FormatProbe + Send>>,
}

/// 读取器注册条目
struct ReaderEntry {
    /// 格式名称
    name: String,
    /// 工厂函数
    factory: ReaderFactory,
}

/// 写入器注册条目
struct WriterEntry {
    /// 格式名称
    name: String,
    /// 工厂函数
    factory: WriterFactory,
}

impl FormatRegistry {
    /// 创建空的注册表
    pub fn new() -> Self {
        Self {
            readers: HashMap::new(),
            writers: HashMap::new(),
            probes: Vec::new(),
        }
    }

    /// 注册一个读取器
    pub fn register_reader(
        &mut self,
        format_id: FormatId,
        name: impl Into<String>,
        factory: ReaderFactory,
    ) {
        self.readers.insert(
            format_id,
            ReaderEntry {
                name: name.into(),
                factory,
            },
        );
    }

    /// 注册一个写入器
    pub fn register_writer(
        &mut self,
        format_id: FormatId,
        name: impl Into<String>,
        factory: WriterFactory,
    ) {
        self.writers.insert(
            format_id,
            WriterEntry {
                name: name.into(),
                factory,
            },
        );
    }

    /// 注册一个格式探测器
    pub fn register_probe(&mut self, probe: Box<dyn FormatProbe + Send>) {
        self.probes.push(probe);
    }

    /// 创建指定格式的读取器实例
    pub fn create_reader(&self, format_id: FormatId) -> MaiResult<Box<dyn TrackReader>> {
        let entry = self
            .readers
            .get(&format_id)
            .ok_or_else(|| MaiError::FormatNotFound(format!("未找到 {format_id} 的读取器")))?;
        (entry.factory)()
    }

    /// 创建指定格式的写入器实例
    pub fn create_writer(&self, format_id: FormatId) -> MaiResult<Box<dyn TrackWriter>> {
        let entry = self
            .writers
            .get(&format_id)
            .ok_or_else(|| MaiError::FormatNotFound(format!("未找到 {format_id} 的写入器")))?;
        (entry.factory)()
    }

    /// 探测数据的容器格式
    ///
    /// 遍历所有已注册的探测器, 返回置信度最高的结果.
    pub fn probe(&self, data: &[u8], filename: Option<&str>) -> Option<ProbeResult> {
        let mut best: Option<ProbeResult> = None;
        for probe in &self.probes {
            if let Some(score) = probe.probe(data, filename) {
                let is_better = best.as_ref().is_none_or(|b| score > b.score);
                if is_better {
                    best = Some(ProbeResult {
                        format_id: probe.format_id(),
                        score,
                    });
                }
            }
        }
        best
    }

    /// 列出所有已注册的读取器
    pub fn list_readers(&self) -> Vec<(FormatId, String)> {
        self.readers
            .iter()
            .map(|(id, e)| (*id, e.name.clone()))
            .collect()
    }

    /// 列出所有已注册的写入器
    pub fn list_writers(&self) -> Vec<(FormatId, String)> {
        self.writers
            .iter()
            .map(|(id, e)| (*id, e.name.clone()))
            .collect()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_registry() -> FormatRegistry {
        let mut registry = FormatRegistry::new();
        crate::register_all(&mut registry);
        registry
    }

    #[test]
    fn test_创建读取器与写入器() {
        let registry = full_registry();
        assert_eq!(
            registry.create_reader(FormatId::Tck).unwrap().name(),
            "tck"
        );
        assert_eq!(
            registry.create_writer(FormatId::Trk).unwrap().name(),
            "trk"
        );
        assert_eq!(registry.list_readers().len(), 2);
        assert_eq!(registry.list_writers().len(), 2);
    }

    #[test]
    fn test_探测_魔数优先于扩展名() {
        let registry = full_registry();
        // TRK 魔数, 但扩展名是 .tck: 魔数分数更高
        let result = registry.probe(b"TRACK\0rest", Some("weird.tck")).unwrap();
        assert_eq!(result.format_id, FormatId::Trk);
    }

    #[test]
    fn test_未注册格式报错() {
        let registry = FormatRegistry::new();
        // Ok 侧的 trait 对象没有 Debug, 不能 unwrap_err
        assert!(matches!(
            registry.create_reader(FormatId::Tck).map(|_| ()),
            Err(MaiError::FormatNotFound(_))
        ));
        assert!(matches!(
            registry.create_writer(FormatId::Trk).map(|_| ()),
            Err(MaiError::FormatNotFound(_))
        ));
    }
}
