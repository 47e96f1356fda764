//! 采样点数值编码标识.
//!
//! TCK 风格文件在文本头部通过 `datatype` 键声明坐标数据的编码方式,
//! 共 6 种有效变体 (32/64 位浮点 x 本机/大端/小端字节序).
//! 头部未声明或声明无法识别时为 [`DataType::Unknown`].

use std::fmt;

/// 采样点数值编码
///
/// "本机字节序" 变体 ([`DataType::Float32`] / [`DataType::Float64`])
/// 在读写时按大端处理.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataType {
    /// 未知编码 (头部缺失或无法识别)
    ///
    /// 这是一个显式的退化状态: 以该编码读取采样点会立即得到正无穷,
    /// 即流结束哨兵, 从而产生零条轨迹而不是崩溃.
    #[default]
    Unknown,
    /// 32 位浮点 (本机字节序)
    Float32,
    /// 32 位浮点 (大端)
    Float32Be,
    /// 32 位浮点 (小端)
    Float32Le,
    /// 64 位浮点 (本机字节序)
    Float64,
    /// 64 位浮点 (大端)
    Float64Be,
    /// 64 位浮点 (小端)
    Float64Le,
}

impl DataType {
    /// 单个采样值的字节宽度
    ///
    /// [`DataType::Unknown`] 返回 0, 使用前必须防范除零/取模.
    pub const fn sample_size(&self) -> u64 {
        match self {
            Self::Float32 | Self::Float32Be | Self::Float32Le => 4,
            Self::Float64 | Self::Float64Be | Self::Float64Le => 8,
            Self::Unknown => 0,
        }
    }

    /// 一个采样点 (x, y, z 三个分量) 的字节宽度
    pub const fn point_size(&self) -> u64 {
        3 * self.sample_size()
    }

    /// 获取编码的规范名称 (写入头部时使用)
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Float32 => "Float32",
            Self::Float32Be => "Float32BE",
            Self::Float32Le => "Float32LE",
            Self::Float64 => "Float64",
            Self::Float64Be => "Float64BE",
            Self::Float64Le => "Float64LE",
        }
    }

    /// 按名称解析编码 (忽略大小写)
    ///
    /// 无法识别的名称返回 [`DataType::Unknown`], 不报错.
    pub fn parse(value: &str) -> DataType {
        let value = value.trim();
        if value.eq_ignore_ascii_case("float32") {
            Self::Float32
        } else if value.eq_ignore_ascii_case("float32be") {
            Self::Float32Be
        } else if value.eq_ignore_ascii_case("float32le") {
            Self::Float32Le
        } else if value.eq_ignore_ascii_case("float64") {
            Self::Float64
        } else if value.eq_ignore_ascii_case("float64be") {
            Self::Float64Be
        } else if value.eq_ignore_ascii_case("float64le") {
            Self::Float64Le
        } else {
            Self::Unknown
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
