//! 轨迹写入器 trait 定义.

use mai_core::{MaiResult, Track};

use crate::format_id::FormatId;
use crate::io::IoContext;

/// 轨迹写入器 trait
///
/// 将轨迹写入容器格式. 所有格式的写入器都实现此 trait.
///
/// 使用流程:
/// 1. 调用 `write_header()` 写入容器头部
/// 2. 循环调用 `write_track()` 写入轨迹
/// 3. 调用 `finish()` 写入结束标记, 完成封装
pub trait TrackWriter: Send {
    /// 获取格式标识
    fn format_id(&self) -> FormatId;

    /// 获取格式名称
    fn name(&self) -> &str;

    /// 写入容器头部
    fn write_header(&mut self, io: &mut IoContext) -> MaiResult<()>;

    /// 写入一条轨迹
    ///
    /// 空轨迹是调用方错误, 返回 `InvalidArgument`.
    fn write_track(&mut self, io: &mut IoContext, track: &Track) -> MaiResult<()>;

    /// 写入结束标记, 完成封装
    fn finish(&mut self, io: &mut IoContext) -> MaiResult<()>;
}
