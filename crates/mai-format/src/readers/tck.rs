//! TCK 风格轨迹读取器.
//!
//! 支持文本头部 + 哨兵分隔浮点流的轨迹文件读取.
//!
//! 文件结构:
//! ```text
//! 文本头部:  每行一个 "key: value" 对, 以单独一行 "end" 结束 (忽略大小写)
//!           唯一识别的键是 datatype, 声明采样点的数值编码
//! 对齐冗余:  头部之后可能存在少量填充字节, 使剩余长度不是点记录大小的整数倍
//! 数据区:    采样点流, 全 NaN 三元组 = 轨迹结束, 全无穷三元组 = 流结束
//! ```

use log::{debug, warn};
use mai_core::{DataType, MaiError, MaiResult, Track, TrackEvent};

use crate::format_id::FormatId;
use crate::io::IoContext;
use crate::probe::{FormatProbe, ProbeScore, SCORE_EXTENSION, SCORE_MAX};
use crate::reader::TrackReader;
use crate::sample::read_point;

/// TCK 风格轨迹读取器
pub struct TckReader {
    /// 头部声明的采样点编码
    datatype: DataType,
    /// 流结束哨兵已出现
    finished: bool,
}

impl TckReader {
    /// 创建 TCK 读取器实例 (工厂函数)
    pub fn create() -> MaiResult<Box<dyn TrackReader>> {
        Ok(Box::new(Self::new()))
    }

    /// 创建 TCK 读取器
    pub fn new() -> Self {
        Self {
            datatype: DataType::Unknown,
            finished: false,
        }
    }

    /// 读取一行头部文本
    ///
    /// 支持 LF、CR、CR+LF 三种行结束符; 单独的 CR 之后若不是 LF,
    /// 该字节留给下一次读取. 行内容按 Latin-1 处理.
    fn read_line(io: &mut IoContext) -> MaiResult<String> {
        let mut line = String::new();
        loop {
            let b = io.read_u8()?;
            match b {
                0x0A => break,
                0x0D => {
                    // CR 之后的 LF 属于本行结束符; 文件恰好在 CR 处结束也算行尾
                    match io.peek_u8() {
                        Ok(0x0A) => {
                            io.read_u8()?;
                        }
                        Ok(_) => {}
                        Err(MaiError::Eof) => {}
                        Err(e) => return Err(e),
                    }
                    break;
                }
                _ => line.push(char::from(b)),
            }
        }
        Ok(line)
    }

    /// 解析文本头部, 返回声明的采样点编码
    ///
    /// 循环只在读到 "end" 行时结束; 缺少结束行的头部会一直读到
    /// 文件尾并报 Eof (与格式约定一致, 不设行数上限).
    fn read_header(io: &mut IoContext) -> MaiResult<DataType> {
        let mut datatype = DataType::Unknown;
        loop {
            let line = Self::read_line(io)?;
            let line = line.trim();

            if line.eq_ignore_ascii_case("end") {
                return Ok(datatype);
            }

            if let Some((key, value)) = line.split_once(':') {
                if key.trim().eq_ignore_ascii_case("datatype") {
                    datatype = DataType::parse(value);
                    debug!("头部声明采样点编码: {datatype}");
                }
            }
            // 其余键和无法解析的行一律忽略
        }
    }

    /// 跳过头部与数据区之间的对齐冗余字节
    ///
    /// 剩余字节数对点记录大小取模, 多出的部分是填充, 精确跳过后
    /// 读取位置正好落在第一个点记录的边界上.
    fn skip_alignment_cruft(&self, io: &mut IoContext) -> MaiResult<()> {
        let point_size = self.datatype.point_size();
        // open() 已拒绝未知编码, 这里再防一次除零
        if point_size == 0 {
            return Err(MaiError::Unsupported(
                "采样点编码未知, 无法计算记录边界".into(),
            ));
        }

        let Some(size) = io.size() else {
            warn!("输入大小未知, 跳过对齐冗余校正");
            return Ok(());
        };

        let pos = io.position()?;
        let cruft = size.saturating_sub(pos) % point_size;
        if cruft > 0 {
            debug!("跳过 {cruft} 字节对齐冗余");
            io.skip(cruft)?;
        }
        Ok(())
    }
}

impl Default for TckReader {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackReader for TckReader {
    fn format_id(&self) -> FormatId {
        FormatId::Tck
    }

    fn name(&self) -> &str {
        "tck"
    }

    fn open(&mut self, io: &mut IoContext) -> MaiResult<()> {
        self.datatype = Self::read_header(io)?;

        if self.datatype == DataType::Unknown {
            return Err(MaiError::Unsupported(
                "头部未声明采样点编码或编码无法识别".into(),
            ));
        }

        self.skip_alignment_cruft(io)
    }

    fn datatype(&self) -> DataType {
        self.datatype
    }

    fn read_track(&mut self, io: &mut IoContext) -> MaiResult<Track> {
        if self.finished {
            return Err(MaiError::Eof);
        }

        let mut track = Track::new();
        loop {
            let point = match read_point(io, self.datatype) {
                Ok(p) => p,
                // 正常结束靠无穷哨兵; 采样点中途遇到文件尾说明输入被截断
                Err(MaiError::Eof) => {
                    return Err(MaiError::InvalidData(
                        "数据在采样点中途被截断, 未出现流结束哨兵".into(),
                    ));
                }
                Err(e) => return Err(e),
            };
            match TrackEvent::classify(point) {
                TrackEvent::Point(p) => track.points.push(p),
                TrackEvent::EndOfTrack => {
                    if track.is_empty() {
                        // 分隔符之间没有点: 静默丢弃, 继续读下一条
                        debug!("丢弃零点轨迹");
                        continue;
                    }
                    return Ok(track);
                }
                TrackEvent::EndOfStream => {
                    self.finished = true;
                    if track.is_empty() {
                        return Err(MaiError::Eof);
                    }
                    // 轨迹中途出现流结束哨兵: 收尾当前轨迹, 下次读取报 Eof
                    return Ok(track);
                }
            }
        }
    }
}

/// TCK 格式探测器
pub struct TckProbe;

impl FormatProbe for TckProbe {
    fn probe(&self, data: &[u8], filename: Option<&str>) -> Option<ProbeScore> {
        // 头部是文本行, 在前几百字节内应能同时找到 datatype 键和 end 行
        let head = &data[..data.len().min(512)];
        let text: String = head
            .iter()
            .map(|&b| char::from(b).to_ascii_lowercase())
            .collect();
        if text.contains("datatype") && text.contains("end") {
            return Some(SCORE_MAX);
        }

        let ext_matches = filename
            .and_then(FormatId::from_filename)
            .is_some_and(|f| f == FormatId::Tck);
        if ext_matches {
            return Some(SCORE_EXTENSION);
        }
        None
    }

    fn format_id(&self) -> FormatId {
        FormatId::Tck
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryBackend;

    fn io_from(data: Vec<u8>) -> IoContext {
        IoContext::new(Box::new(MemoryBackend::from_data(data)))
    }

    /// 构造 TCK 风格输入: 头部 + 大端 f32 采样值
    fn make_tck_be(header: &str, samples: &[f32]) -> Vec<u8> {
        let mut data = header.as_bytes().to_vec();
        for s in samples {
            data.extend_from_slice(&s.to_be_bytes());
        }
        data
    }

    #[test]
    fn test_头部_行结束符变体() {
        for header in [
            "datatype: Float32BE\nend\n",
            "datatype: Float32BE\rend\r",
            "datatype: Float32BE\r\nend\r\n",
        ] {
            let mut io = io_from(header.as_bytes().to_vec());
            let dt = TckReader::read_header(&mut io).unwrap();
            assert_eq!(dt, DataType::Float32Be, "头部 {header:?}");
        }
    }

    #[test]
    fn test_头部_单独_cr_后字节留给下一行() {
        // "a\rend\r" 中 CR 后面的 'e' 不属于第一行
        let mut io = io_from(b"count: 2\rend\r".to_vec());
        let dt = TckReader::read_header(&mut io).unwrap();
        assert_eq!(dt, DataType::Unknown);
    }

    #[test]
    fn test_头部_忽略未识别的键() {
        let header = "mrtrix tracks\ncount: 7\ndatatype: float64le\nfile: . 64\nEND\n";
        let mut io = io_from(header.as_bytes().to_vec());
        let dt = TckReader::read_header(&mut io).unwrap();
        assert_eq!(dt, DataType::Float64Le);
    }

    #[test]
    fn test_头部_缺少结束行报_eof() {
        let mut io = io_from(b"datatype: Float32BE\n".to_vec());
        let err = TckReader::read_header(&mut io).unwrap_err();
        assert!(matches!(err, MaiError::Eof));
    }

    #[test]
    fn test_打开_未知编码报错() {
        let mut io = io_from(b"datatype: int16\nend\n".to_vec());
        let mut reader = TckReader::new();
        let err = reader.open(&mut io).unwrap_err();
        assert!(matches!(err, MaiError::Unsupported(_)));

        let mut io = io_from(b"end\n".to_vec());
        let mut reader = TckReader::new();
        let err = reader.open(&mut io).unwrap_err();
        assert!(matches!(err, MaiError::Unsupported(_)));
    }

    #[test]
    fn test_读取_单条轨迹() {
        let nan = f32::NAN;
        let inf = f32::INFINITY;
        let data = make_tck_be(
            "datatype: Float32BE\nend\n",
            &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, nan, nan, nan, inf, inf, inf],
        );
        let mut io = io_from(data);
        let mut reader = TckReader::new();
        reader.open(&mut io).unwrap();
        assert_eq!(reader.datatype(), DataType::Float32Be);

        let track = reader.read_track(&mut io).unwrap();
        assert_eq!(track.len(), 2);
        assert_eq!(track.points[0], mai_core::Point::new(1.0, 2.0, 3.0));
        assert_eq!(track.points[1], mai_core::Point::new(4.0, 5.0, 6.0));

        let err = reader.read_track(&mut io).unwrap_err();
        assert!(matches!(err, MaiError::Eof));
    }

    #[test]
    fn test_读取_零轨迹文件() {
        let inf = f32::INFINITY;
        let data = make_tck_be("datatype: Float32BE\nend\n", &[inf, inf, inf]);
        let mut io = io_from(data);
        let mut reader = TckReader::new();
        reader.open(&mut io).unwrap();

        let err = reader.read_track(&mut io).unwrap_err();
        assert!(matches!(err, MaiError::Eof));
        // 再次读取仍然是 Eof
        let err = reader.read_track(&mut io).unwrap_err();
        assert!(matches!(err, MaiError::Eof));
    }

    #[test]
    fn test_读取_空轨迹被丢弃() {
        let nan = f32::NAN;
        let inf = f32::INFINITY;
        // 两个连续的 NaN 三元组之间是一条零点轨迹
        let data = make_tck_be(
            "datatype: Float32BE\nend\n",
            &[
                1.0, 2.0, 3.0, nan, nan, nan, nan, nan, nan, 7.0, 8.0, 9.0, nan, nan, nan, inf,
                inf, inf,
            ],
        );
        let mut io = io_from(data);
        let mut reader = TckReader::new();
        reader.open(&mut io).unwrap();

        let t1 = reader.read_track(&mut io).unwrap();
        assert_eq!(t1.len(), 1);
        let t2 = reader.read_track(&mut io).unwrap();
        assert_eq!(t2.len(), 1);
        assert_eq!(t2.points[0], mai_core::Point::new(7.0, 8.0, 9.0));
        assert!(matches!(
            reader.read_track(&mut io).unwrap_err(),
            MaiError::Eof
        ));
    }

    #[test]
    fn test_对齐冗余_精确跳过() {
        // 头部之后插入 5 字节冗余, 使剩余长度不是 12 的整数倍
        let header = "datatype: Float32BE\nend\n";
        let mut data = header.as_bytes().to_vec();
        data.extend_from_slice(&[0xAA; 5]);
        for s in [1.0f32, 2.0, 3.0, f32::NAN, f32::NAN, f32::NAN] {
            data.extend_from_slice(&s.to_be_bytes());
        }
        data.extend_from_slice(&f32::INFINITY.to_be_bytes().repeat(3));

        let mut io = io_from(data);
        let mut reader = TckReader::new();
        reader.open(&mut io).unwrap();

        let track = reader.read_track(&mut io).unwrap();
        assert_eq!(track.len(), 1);
        assert_eq!(track.points[0], mai_core::Point::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_数据截断报错() {
        // 一个点之后数据戛然而止, 没有任何哨兵
        let data = make_tck_be("datatype: Float32BE\nend\n", &[1.0, 2.0, 3.0]);
        let mut io = io_from(data);
        let mut reader = TckReader::new();
        reader.open(&mut io).unwrap();

        let err = reader.read_track(&mut io).unwrap_err();
        assert!(matches!(err, MaiError::InvalidData(_)));
    }

    #[test]
    fn test_float64le_数据() {
        let mut data = b"datatype: Float64LE\nend\n".to_vec();
        for v in [1.5f64, 2.5, 3.5] {
            data.extend_from_slice(&v.to_le_bytes());
        }
        for _ in 0..3 {
            data.extend_from_slice(&f64::NAN.to_le_bytes());
        }
        for _ in 0..3 {
            data.extend_from_slice(&f64::INFINITY.to_le_bytes());
        }

        let mut io = io_from(data);
        let mut reader = TckReader::new();
        reader.open(&mut io).unwrap();

        let track = reader.read_track(&mut io).unwrap();
        assert_eq!(track.len(), 1);
        assert_eq!(track.points[0], mai_core::Point::new(1.5, 2.5, 3.5));
    }

    #[test]
    fn test_探测() {
        let probe = TckProbe;
        let data = b"mrtrix tracks\ndatatype: Float32BE\nend\n";
        assert_eq!(probe.probe(data, None), Some(SCORE_MAX));
        assert_eq!(probe.probe(b"\x00\x01\x02", Some("a.tck")), Some(SCORE_EXTENSION));
        assert_eq!(probe.probe(b"\x00\x01\x02", Some("a.bin")), None);
    }
}
