//! TCK 风格轨迹写入器.
//!
//! 写入文本头部 + 哨兵分隔的浮点流. 头部声明输出编码
//! (默认 Float32BE), 每条轨迹以全 NaN 三元组收尾,
//! 整个流以全无穷三元组收尾.

use log::debug;
use mai_core::{DataType, MaiError, MaiResult, Track};

use crate::format_id::FormatId;
use crate::io::IoContext;
use crate::sample::write_sample;
use crate::writer::TrackWriter;

/// TCK 风格轨迹写入器
pub struct TckWriter {
    /// 输出采样点编码
    datatype: DataType,
    /// 已写出的轨迹数 (仅用于日志)
    tracks_written: u64,
}

impl TckWriter {
    /// 创建 TCK 写入器实例, 默认 Float32BE 编码 (工厂函数)
    pub fn create() -> MaiResult<Box<dyn TrackWriter>> {
        Ok(Box::new(Self::new()))
    }

    /// 创建 TCK 写入器, 默认 Float32BE 编码
    pub fn new() -> Self {
        Self {
            datatype: DataType::Float32Be,
            tracks_written: 0,
        }
    }

    /// 创建指定输出编码的 TCK 写入器
    pub fn with_datatype(datatype: DataType) -> MaiResult<Self> {
        if datatype == DataType::Unknown {
            return Err(MaiError::InvalidArgument(
                "输出编码不能为 Unknown".into(),
            ));
        }
        Ok(Self {
            datatype,
            tracks_written: 0,
        })
    }

    /// 写入一个哨兵三元组 (三个分量同值)
    fn write_sentinel(&self, io: &mut IoContext, value: f32) -> MaiResult<()> {
        for _ in 0..3 {
            write_sample(io, self.datatype, value)?;
        }
        Ok(())
    }
}

impl Default for TckWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackWriter for TckWriter {
    fn format_id(&self) -> FormatId {
        FormatId::Tck
    }

    fn name(&self) -> &str {
        "tck"
    }

    fn write_header(&mut self, io: &mut IoContext) -> MaiResult<()> {
        io.write_all(format!("datatype: {}\n", self.datatype).as_bytes())?;
        io.write_all(b"end\n")?;

        self.tracks_written = 0;
        debug!("TCK 头部写入完成, 输出编码 {}", self.datatype);
        Ok(())
    }

    fn write_track(&mut self, io: &mut IoContext, track: &Track) -> MaiResult<()> {
        if track.is_empty() {
            return Err(MaiError::InvalidArgument("不能写入零点轨迹".into()));
        }

        for p in &track.points {
            write_sample(io, self.datatype, p.x)?;
            write_sample(io, self.datatype, p.y)?;
            write_sample(io, self.datatype, p.z)?;
        }
        // 轨迹结束哨兵
        self.write_sentinel(io, f32::NAN)?;

        self.tracks_written += 1;
        Ok(())
    }

    fn finish(&mut self, io: &mut IoContext) -> MaiResult<()> {
        // 流结束哨兵
        self.write_sentinel(io, f32::INFINITY)?;
        debug!("TCK 写入完成, 共 {} 条轨迹", self.tracks_written);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryBackend;
    use mai_core::Point;

    fn written_bytes(datatype: DataType, tracks: &[&[(f32, f32, f32)]]) -> Vec<u8> {
        let mut io = IoContext::new(Box::new(MemoryBackend::new()));
        let mut writer = TckWriter::with_datatype(datatype).unwrap();
        writer.write_header(&mut io).unwrap();
        for pts in tracks {
            let track = Track {
                points: pts.iter().map(|&(x, y, z)| Point::new(x, y, z)).collect(),
            };
            writer.write_track(&mut io, &track).unwrap();
        }
        writer.finish(&mut io).unwrap();
        io.seek(std::io::SeekFrom::Start(0)).unwrap();
        let len = io.size().unwrap() as usize;
        io.read_bytes(len).unwrap()
    }

    #[test]
    fn test_头部与哨兵结构() {
        let data = written_bytes(DataType::Float32Be, &[&[(1.0, 2.0, 3.0)]]);

        let header = b"datatype: Float32BE\nend\n";
        assert_eq!(&data[..header.len()], header);

        // 1 个点 + NaN 三元组 + 无穷三元组 = 9 个 f32
        let body = &data[header.len()..];
        assert_eq!(body.len(), 9 * 4);

        let f32_at = |i: usize| {
            let mut b = [0u8; 4];
            b.copy_from_slice(&body[i * 4..i * 4 + 4]);
            f32::from_be_bytes(b)
        };
        assert_eq!(f32_at(0), 1.0);
        assert_eq!(f32_at(1), 2.0);
        assert_eq!(f32_at(2), 3.0);
        for i in 3..6 {
            assert!(f32_at(i).is_nan());
        }
        for i in 6..9 {
            assert!(f32_at(i).is_infinite());
        }
    }

    #[test]
    fn test_float64le_输出() {
        let data = written_bytes(DataType::Float64Le, &[&[(1.5, 2.5, 3.5)]]);
        let header = b"datatype: Float64LE\nend\n";
        assert_eq!(&data[..header.len()], header);

        let body = &data[header.len()..];
        let mut b = [0u8; 8];
        b.copy_from_slice(&body[..8]);
        assert_eq!(f64::from_le_bytes(b), 1.5);
    }

    #[test]
    fn test_拒绝未知输出编码() {
        assert!(matches!(
            TckWriter::with_datatype(DataType::Unknown).map(|_| ()),
            Err(MaiError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_拒绝空轨迹() {
        let mut io = IoContext::new(Box::new(MemoryBackend::new()));
        let mut writer = TckWriter::new();
        writer.write_header(&mut io).unwrap();
        let err = writer.write_track(&mut io, &Track::new()).unwrap_err();
        assert!(matches!(err, MaiError::InvalidArgument(_)));
    }
}
