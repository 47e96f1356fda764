//! TRK 风格轨迹写入器.
//!
//! 写入固定 1000 字节二进制头部 + 长度前缀的轨迹数据.
//!
//! TCK 风格输入不携带体素几何信息, 因此头部的几何字段一律写入
//! 文档规定的默认值/零值: 体素尺寸 (1, 1, 1), 其余全零.
//! 末尾的轨迹数字段恒为 0 (格式约定 0 表示数量未知, 读取端应
//! 扫描到文件尾), 写入过程不回填.

use log::debug;
use mai_core::{MaiError, MaiResult, Track};

use crate::format_id::FormatId;
use crate::io::IoContext;
use crate::writer::TrackWriter;

/// TRK 文件魔数 (6 字节, 含结尾 NUL)
pub const TRK_MAGIC: &[u8; 6] = b"TRACK\0";

/// TRK 头部总大小 (字节)
pub const TRK_HEADER_SIZE: u64 = 1000;

/// TRK 格式版本
pub const TRK_VERSION: i32 = 2;

/// TRK 风格轨迹写入器
pub struct TrkWriter {
    /// 已写出的轨迹数 (仅用于日志, 头部不回填)
    tracks_written: u64,
}

impl TrkWriter {
    /// 创建 TRK 写入器实例 (工厂函数)
    pub fn create() -> MaiResult<Box<dyn TrackWriter>> {
        Ok(Box::new(Self::new()))
    }

    /// 创建 TRK 写入器
    pub fn new() -> Self {
        Self { tracks_written: 0 }
    }
}

impl Default for TrkWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackWriter for TrkWriter {
    fn format_id(&self) -> FormatId {
        FormatId::Trk
    }

    fn name(&self) -> &str {
        "trk"
    }

    fn write_header(&mut self, io: &mut IoContext) -> MaiResult<()> {
        // 魔数
        io.write_all(TRK_MAGIC)?;

        // 体素网格维度: 未知, 写零
        for _ in 0..3 {
            io.write_i16_be(0)?;
        }

        // 体素尺寸: 默认 1x1x1
        for _ in 0..3 {
            io.write_f32_be(1.0)?;
        }

        // 原点: 规范规定恒为零
        for _ in 0..3 {
            io.write_f32_be(0.0)?;
        }

        // 每点标量: 数量 0 + 名称区 200 字节
        io.write_i16_be(0)?;
        io.write_zeros(200)?;

        // 每轨迹属性: 数量 0 + 名称区 200 字节
        io.write_i16_be(0)?;
        io.write_zeros(200)?;

        // 4x4 变换矩阵: 全零 (未记录)
        for _ in 0..16 {
            io.write_f32_be(0.0)?;
        }

        // 保留区 444 字节
        io.write_zeros(444)?;

        // 体素顺序 4 字节 + 填充 4 字节
        io.write_zeros(4)?;
        io.write_zeros(4)?;

        // 图像方向 6 x f32
        for _ in 0..6 {
            io.write_f32_be(0.0)?;
        }

        // 填充 2 字节 + 内部标志 6 字节
        io.write_zeros(2)?;
        io.write_zeros(6)?;

        // 轨迹数 (0 = 未知) / 版本 / 头部大小
        io.write_i32_be(0)?;
        io.write_i32_be(TRK_VERSION)?;
        io.write_i32_be(TRK_HEADER_SIZE as i32)?;

        self.tracks_written = 0;
        debug!("TRK 头部写入完成 ({TRK_HEADER_SIZE} 字节)");
        Ok(())
    }

    fn write_track(&mut self, io: &mut IoContext, track: &Track) -> MaiResult<()> {
        if track.is_empty() {
            return Err(MaiError::InvalidArgument("不能写入零点轨迹".into()));
        }

        io.write_i32_be(track.len() as i32)?;
        for p in &track.points {
            io.write_f32_be(p.x)?;
            io.write_f32_be(p.y)?;
            io.write_f32_be(p.z)?;
        }

        self.tracks_written += 1;
        Ok(())
    }

    fn finish(&mut self, io: &mut IoContext) -> MaiResult<()> {
        // 长度前缀格式不需要结束标记; 轨迹数字段按约定保持 0
        let _ = io;
        debug!("TRK 写入完成, 共 {} 条轨迹", self.tracks_written);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryBackend;
    use mai_core::Point;

    fn header_bytes() -> Vec<u8> {
        let mut io = IoContext::new(Box::new(MemoryBackend::new()));
        let mut writer = TrkWriter::new();
        writer.write_header(&mut io).unwrap();
        writer.finish(&mut io).unwrap();
        io.seek(std::io::SeekFrom::Start(0)).unwrap();
        let len = io.size().unwrap() as usize;
        io.read_bytes(len).unwrap()
    }

    #[test]
    fn test_头部恰好_1000_字节() {
        let data = header_bytes();
        assert_eq!(data.len(), 1000);
    }

    #[test]
    fn test_头部固定字段() {
        let data = header_bytes();
        assert_eq!(&data[0..6], TRK_MAGIC);
        // 体素尺寸 1.0 x3, 紧随维度字段之后 (偏移 12)
        assert_eq!(&data[12..16], &1.0f32.to_be_bytes());
        assert_eq!(&data[16..20], &1.0f32.to_be_bytes());
        assert_eq!(&data[20..24], &1.0f32.to_be_bytes());
        // 末尾: 轨迹数 0 / 版本 2 / 头部大小 1000
        assert_eq!(&data[988..992], &0i32.to_be_bytes());
        assert_eq!(&data[992..996], &TRK_VERSION.to_be_bytes());
        assert_eq!(&data[996..1000], &1000i32.to_be_bytes());
    }

    #[test]
    fn test_头部其余区域为零() {
        let data = header_bytes();
        // 维度
        assert!(data[6..12].iter().all(|&b| b == 0));
        // 原点到方向区之间 (含标量/属性/矩阵/保留区)
        assert!(data[24..988].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_轨迹布局() {
        let mut io = IoContext::new(Box::new(MemoryBackend::new()));
        let mut writer = TrkWriter::new();
        writer.write_header(&mut io).unwrap();
        let track = Track {
            points: vec![Point::new(1.0, 2.0, 3.0)],
        };
        writer.write_track(&mut io, &track).unwrap();
        writer.finish(&mut io).unwrap();

        io.seek(std::io::SeekFrom::Start(1000)).unwrap();
        assert_eq!(io.read_i32_be().unwrap(), 1);
        assert_eq!(io.read_f32_be().unwrap(), 1.0);
        assert_eq!(io.read_f32_be().unwrap(), 2.0);
        assert_eq!(io.read_f32_be().unwrap(), 3.0);
    }

    #[test]
    fn test_拒绝空轨迹() {
        let mut io = IoContext::new(Box::new(MemoryBackend::new()));
        let mut writer = TrkWriter::new();
        writer.write_header(&mut io).unwrap();
        let err = writer.write_track(&mut io, &Track::new()).unwrap_err();
        assert!(matches!(err, MaiError::InvalidArgument(_)));
    }
}
