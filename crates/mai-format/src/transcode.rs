//! 轨迹转换驱动.
//!
//! 将读取器与写入器串联: 解析源头部, 写入目标头部, 逐条搬运轨迹,
//! 最后写入结束标记并返回汇总统计. 转换过程完全顺序执行,
//! 除归属于本次调用的计数器外没有跨轨迹的共享状态.

use log::info;
use mai_core::{ConversionStats, MaiError, MaiResult};

use crate::io::IoContext;
use crate::reader::TrackReader;
use crate::writer::TrackWriter;

/// 执行一次完整的轨迹转换
///
/// 流程: `reader.open()` -> `writer.write_header()` -> 循环搬运轨迹
/// -> `writer.finish()`. 任何一步失败立即中止, 已写出的部分不回滚.
///
/// # 返回
/// 本次转换的汇总统计 (轨迹数、点数).
pub fn transcode(
    reader: &mut dyn TrackReader,
    reader_io: &mut IoContext,
    writer: &mut dyn TrackWriter,
    writer_io: &mut IoContext,
) -> MaiResult<ConversionStats> {
    reader.open(reader_io)?;
    writer.write_header(writer_io)?;

    let mut stats = ConversionStats::default();
    loop {
        match reader.read_track(reader_io) {
            Ok(track) => {
                writer.write_track(writer_io, &track)?;
                stats.record(track.len());
            }
            Err(MaiError::Eof) => break,
            Err(e) => return Err(e),
        }
    }

    writer.finish(writer_io)?;

    info!(
        "转换完成: {} -> {}, {stats}",
        reader.name(),
        writer.name()
    );
    Ok(stats)
}
