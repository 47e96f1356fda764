//! # mai-format
//!
//! Mai 纤维束数据框架容器格式库, 提供轨迹文件的读写框架.
//!
//! 本 crate 负责两种轨迹存储格式的解析与生成:
//! - **TCK 风格**: 文本头部 + 哨兵分隔的浮点流
//! - **TRK 风格**: 固定 1000 字节二进制头部 + 长度前缀的轨迹

pub mod format_id;
pub mod io;
pub mod probe;
pub mod reader;
pub mod readers;
pub mod registry;
pub mod sample;
pub mod transcode;
pub mod writer;
pub mod writers;

// 重导出常用类型
pub use format_id::FormatId;
pub use io::IoContext;
pub use probe::ProbeResult;
pub use reader::TrackReader;
pub use registry::FormatRegistry;
pub use transcode::transcode;
pub use writer::TrackWriter;

/// 注册所有内置容器格式
pub fn register_all(registry: &mut FormatRegistry) {
    readers::register_all_readers(registry);
    writers::register_all_writers(registry);
}
