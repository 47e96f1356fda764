//! 容器格式标识符.

use std::fmt;

/// 容器格式标识符
///
/// 标识一种轨迹存储格式.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum FormatId {
    /// TCK 风格: 文本头部 + 哨兵分隔的浮点流
    Tck,
    /// TRK 风格: 固定 1000 字节二进制头部 + 长度前缀的轨迹
    Trk,
}

impl FormatId {
    /// 获取格式的人类可读名称
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Tck => "tck",
            Self::Trk => "trk",
        }
    }

    /// 获取格式的默认文件扩展名
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Tck => "tck",
            Self::Trk => "trk",
        }
    }

    /// 根据文件扩展名推断格式
    pub fn from_extension(ext: &str) -> Option<FormatId> {
        if ext.eq_ignore_ascii_case("tck") {
            Some(Self::Tck)
        } else if ext.eq_ignore_ascii_case("trk") {
            Some(Self::Trk)
        } else {
            None
        }
    }

    /// 根据文件名推断格式
    pub fn from_filename(filename: &str) -> Option<FormatId> {
        let ext = filename.rsplit('.').next()?;
        Self::from_extension(ext)
    }
}

impl fmt::Display for FormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
