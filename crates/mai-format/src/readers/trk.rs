//! TRK 风格轨迹读取器.
//!
//! 支持固定 1000 字节二进制头部 + 长度前缀轨迹的文件读取.
//!
//! 文件结构 (多字节字段均为大端):
//! ```text
//! 头部 1000 字节:  "TRACK\0" 魔数 + 几何描述字段 + 保留区
//!                 末尾三个 i32: 轨迹数 (0 = 未知) / 版本 / 头部大小
//! 轨迹数据:        每条轨迹为 i32 点数 + 点数 x (f32 x, f32 y, f32 z)
//! ```

use log::{debug, warn};
use mai_core::{DataType, MaiError, MaiResult, Point, Track};

use crate::format_id::FormatId;
use crate::io::IoContext;
use crate::probe::{FormatProbe, ProbeScore, SCORE_EXTENSION, SCORE_MAX};
use crate::reader::TrackReader;
use crate::writers::trk::{TRK_HEADER_SIZE, TRK_MAGIC, TRK_VERSION};

/// 单条轨迹预留容量的上限 (点数), 防止恶意长度前缀导致过度分配
const MAX_RESERVE_POINTS: usize = 1 << 20;

/// TRK 风格轨迹读取器
pub struct TrkReader {
    /// 头部声明的轨迹数量 (0 = 未知)
    track_count: i32,
}

impl TrkReader {
    /// 创建 TRK 读取器实例 (工厂函数)
    pub fn create() -> MaiResult<Box<dyn TrackReader>> {
        Ok(Box::new(Self::new()))
    }

    /// 创建 TRK 读取器
    pub fn new() -> Self {
        Self { track_count: 0 }
    }
}

impl Default for TrkReader {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackReader for TrkReader {
    fn format_id(&self) -> FormatId {
        FormatId::Trk
    }

    fn name(&self) -> &str {
        "trk"
    }

    fn open(&mut self, io: &mut IoContext) -> MaiResult<()> {
        let magic = io.read_bytes(TRK_MAGIC.len())?;
        if magic != TRK_MAGIC {
            return Err(MaiError::InvalidData("不是有效的 TRK 文件".into()));
        }

        // 几何描述字段不参与转换, 直接跳到头部末尾的三个 i32
        io.skip(TRK_HEADER_SIZE - TRK_MAGIC.len() as u64 - 12)?;

        self.track_count = io.read_i32_be()?;
        let version = io.read_i32_be()?;
        let header_size = io.read_i32_be()?;

        if header_size != TRK_HEADER_SIZE as i32 {
            return Err(MaiError::InvalidData(format!(
                "头部大小字段异常: {header_size} (期望 {TRK_HEADER_SIZE})"
            )));
        }
        if version != TRK_VERSION {
            warn!("TRK 版本为 {version}, 按版本 {TRK_VERSION} 的布局读取");
        }

        debug!(
            "打开 TRK 输入: 版本 {version}, 头部声明轨迹数 {}",
            self.track_count
        );
        Ok(())
    }

    fn datatype(&self) -> DataType {
        // TRK 数据区固定为 32 位浮点
        DataType::Float32
    }

    fn track_count_hint(&self) -> Option<u64> {
        // 0 表示写入端未统计数量
        (self.track_count > 0).then_some(self.track_count as u64)
    }

    fn read_track(&mut self, io: &mut IoContext) -> MaiResult<Track> {
        loop {
            // 长度前缀的第一个字节处遇到文件尾是正常结束
            // (头部轨迹数 0 表示未知, 只能读到尾); 前缀中途截断是损坏
            let first = match io.read_u8() {
                Ok(b) => b,
                Err(MaiError::Eof) => return Err(MaiError::Eof),
                Err(e) => return Err(e),
            };
            let mut rest = [0u8; 3];
            match io.read_exact(&mut rest) {
                Ok(()) => {}
                Err(MaiError::Eof) => {
                    return Err(MaiError::InvalidData(
                        "数据在轨迹长度前缀中途被截断".into(),
                    ));
                }
                Err(e) => return Err(e),
            }
            let count = i32::from_be_bytes([first, rest[0], rest[1], rest[2]]);

            if count < 0 {
                return Err(MaiError::InvalidData(format!("非法的轨迹点数: {count}")));
            }
            if count == 0 {
                // 零点轨迹: 与 TCK 侧的空轨迹一样静默丢弃
                debug!("丢弃零点轨迹");
                continue;
            }

            let count = count as usize;
            let mut track = Track::with_capacity(count.min(MAX_RESERVE_POINTS));
            for _ in 0..count {
                let x = Self::read_coord(io)?;
                let y = Self::read_coord(io)?;
                let z = Self::read_coord(io)?;
                track.points.push(Point::new(x, y, z));
            }
            return Ok(track);
        }
    }
}

impl TrkReader {
    /// 读取一个坐标分量, 文件尾视为截断错误
    fn read_coord(io: &mut IoContext) -> MaiResult<f32> {
        match io.read_f32_be() {
            Ok(v) => Ok(v),
            Err(MaiError::Eof) => Err(MaiError::InvalidData(
                "数据在轨迹中途被截断, 点数与长度前缀不符".into(),
            )),
            Err(e) => Err(e),
        }
    }
}

/// TRK 格式探测器
pub struct TrkProbe;

impl FormatProbe for TrkProbe {
    fn probe(&self, data: &[u8], filename: Option<&str>) -> Option<ProbeScore> {
        if data.starts_with(TRK_MAGIC) {
            return Some(SCORE_MAX);
        }
        let ext_matches = filename
            .and_then(FormatId::from_filename)
            .is_some_and(|f| f == FormatId::Trk);
        if ext_matches {
            return Some(SCORE_EXTENSION);
        }
        None
    }

    fn format_id(&self) -> FormatId {
        FormatId::Trk
    }
}
