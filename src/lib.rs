//! # Mai (脉)
//!
//! 纯 Rust 实现的神经纤维束追踪数据转换框架.
//!
//! Mai 在两种轨迹存储格式之间双向转换:
//! - **TCK 风格**: 文本头部 + 哨兵分隔的浮点流 (全 NaN 三元组分隔轨迹,
//!   全无穷三元组结束流)
//! - **TRK 风格**: 固定 1000 字节二进制头部 + 长度前缀的轨迹
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use mai::format::{FormatId, IoContext, transcode};
//!
//! let registry = mai::default_format_registry();
//! let mut reader = registry.create_reader(FormatId::Tck)?;
//! let mut writer = registry.create_writer(FormatId::Trk)?;
//!
//! let mut input = IoContext::open_read("input.tck")?;
//! let mut output = IoContext::open_write("output.trk")?;
//! let stats = transcode(reader.as_mut(), &mut input, writer.as_mut(), &mut output)?;
//! println!("{stats}");
//! # Ok::<(), mai::core::MaiError>(())
//! ```
//!
//! # Crate 结构
//!
//! | Crate | 功能 |
//! |-------|------|
//! | `mai-core` | 核心类型与工具 |
//! | `mai-format` | 容器格式框架 |

/// 核心类型与工具
pub use mai_core as core;

/// 容器格式框架
pub use mai_format as format;

/// 获取 Mai 版本号
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// 创建已注册所有内置容器格式的注册表
pub fn default_format_registry() -> mai_format::FormatRegistry {
    let mut registry = mai_format::FormatRegistry::new();
    mai_format::register_all(&mut registry);
    registry
}
