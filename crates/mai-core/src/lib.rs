//! # mai-core
//!
//! Mai 纤维束数据框架核心库, 提供基础类型定义、错误处理和工具函数.
//!
//! 本 crate 为整个 Mai 框架提供底层基础设施: 轨迹/采样点的数据模型,
//! 数值编码标识, 以及统一的错误类型.

pub mod datatype;
pub mod error;
pub mod track;

// 重导出常用类型
pub use datatype::DataType;
pub use error::{MaiError, MaiResult};
pub use track::{ConversionStats, Point, Track, TrackEvent};
