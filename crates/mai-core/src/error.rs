//! 统一错误类型定义.
//!
//! 所有 Mai crate 共用的错误类型, 支持跨模块传播.

use thiserror::Error;

/// Mai 框架统一错误类型
#[derive(Debug, Error)]
pub enum MaiError {
    /// 无效参数
    #[error("无效参数: {0}")]
    InvalidArgument(String),

    /// 不支持的操作或输入
    #[error("不支持: {0}")]
    Unsupported(String),

    /// I/O 错误
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 已到达流末尾
    ///
    /// 在 `read_track` 中表示正常结束; 在采样点中途出现则表示文件被截断.
    #[error("已到达流末尾")]
    Eof,

    /// 无效数据 (损坏的文件头、非法的轨迹长度等)
    #[error("无效数据: {0}")]
    InvalidData(String),

    /// 未找到指定的容器格式
    #[error("未找到容器格式: {0}")]
    FormatNotFound(String),
}

/// Mai 框架统一 Result 类型
pub type MaiResult<T> = Result<T, MaiError>;
