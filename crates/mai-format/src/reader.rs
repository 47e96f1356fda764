//! 轨迹读取器 trait 定义.

use mai_core::{DataType, MaiResult, Track};

use crate::format_id::FormatId;
use crate::io::IoContext;

/// 轨迹读取器 trait
///
/// 从容器格式中逐条读取轨迹. 所有格式的读取器都实现此 trait.
///
/// 使用流程:
/// 1. 调用 `open()` 解析文件头部
/// 2. 循环调用 `read_track()` 读取轨迹
pub trait TrackReader: Send {
    /// 获取格式标识
    fn format_id(&self) -> FormatId;

    /// 获取格式名称
    fn name(&self) -> &str;

    /// 打开容器并解析头部信息
    ///
    /// 头部解析完成后, 读取位置正好落在第一条轨迹数据上
    /// (TCK 风格输入还会跳过对齐冗余字节).
    fn open(&mut self, io: &mut IoContext) -> MaiResult<()>;

    /// 头部声明的采样点编码
    ///
    /// TRK 风格文件固定存储 32 位浮点, 返回 [`DataType::Float32`].
    fn datatype(&self) -> DataType;

    /// 头部声明的轨迹数量 (如果格式记录且非零)
    ///
    /// 0 在 TRK 风格头部中表示数量未知, 此时返回 `None`.
    fn track_count_hint(&self) -> Option<u64> {
        None
    }

    /// 读取下一条轨迹
    ///
    /// 返回的轨迹保证非空; 分隔符之间的空轨迹被静默丢弃.
    ///
    /// # 返回
    /// - `Ok(track)`: 成功读取一条轨迹
    /// - `Err(MaiError::Eof)`: 已到达流末尾
    fn read_track(&mut self, io: &mut IoContext) -> MaiResult<Track>;
}
