//! 轨迹数据模型.
//!
//! 一条轨迹 (Track) 是一串有序的三维采样点, 对应一束纤维的路径.
//! TCK 风格文件不使用长度前缀, 而是用带内哨兵分隔:
//! 三个分量全为 NaN 的点表示轨迹结束, 全为无穷表示流结束.
//! 为了让调用方不必在每处重新判读浮点位模式, 读取原语返回
//! 显式标记的 [`TrackEvent`].

/// 三维采样点
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point {
    /// 创建采样点
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// 一条轨迹: 有序的采样点序列
///
/// 约定: 写入端只发出非空轨迹; 分隔符之间读到零个点的轨迹被静默丢弃.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    /// 采样点, 顺序即文件中的物理顺序
    pub points: Vec<Point>,
}

impl Track {
    /// 创建空轨迹
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建空轨迹并预留容量
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// 采样点数量
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 是否为空轨迹
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// 采样点读取事件
///
/// 将 TCK 风格的带内哨兵翻译为显式标记, 分类只在读取原语处做一次.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackEvent {
    /// 普通数据点
    Point(Point),
    /// 轨迹结束哨兵 (三个分量全为 NaN)
    EndOfTrack,
    /// 流结束哨兵 (三个分量全为无穷)
    EndOfStream,
}

impl TrackEvent {
    /// 对一个原始采样点做哨兵分类
    ///
    /// 先判无穷后判 NaN; 三个分量只有部分为 NaN/无穷的点按普通数据点处理,
    /// 格式本身约定有效数据不会同时三个分量都是哨兵值.
    pub fn classify(point: Point) -> TrackEvent {
        if point.x.is_infinite() && point.y.is_infinite() && point.z.is_infinite() {
            TrackEvent::EndOfStream
        } else if point.x.is_nan() && point.y.is_nan() && point.z.is_nan() {
            TrackEvent::EndOfTrack
        } else {
            TrackEvent::Point(point)
        }
    }
}

/// 一次转换的汇总统计
///
/// 由转换调用返回的值, 不依赖任何全局状态, 同一进程内可安全复用.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// 写出的轨迹总数
    pub tracks: u64,
    /// 写出的采样点总数
    pub points: u64,
}

impl ConversionStats {
    /// 记录一条已写出的轨迹
    pub fn record(&mut self, point_count: usize) {
        self.tracks += 1;
        self.points += point_count as u64;
    }

    /// 平均轨迹长度 (点数/轨迹数), 保留 2 位有效数字
    ///
    /// 没有轨迹时为 0.0. 仅用于人类可读的汇总输出, 不持久化.
    pub fn avg_track_len(&self) -> f64 {
        if self.tracks == 0 {
            return 0.0;
        }
        round_sig2(self.points as f64 / self.tracks as f64)
    }
}

impl std::fmt::Display for ConversionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} 条轨迹, {} 个采样点, 平均轨迹长度 {}",
            self.tracks,
            self.points,
            self.avg_track_len()
        )
    }
}

/// 四舍五入到 2 位有效数字
fn round_sig2(x: f64) -> f64 {
    if x == 0.0 || !x.is_finite() {
        return x;
    }
    let exp = x.abs().log10().floor() as i32 - 1;
    if exp >= 0 {
        let factor = 10f64.powi(exp);
        (x / factor).round() * factor
    } else {
        // 小数值改用乘后除, 避免乘以 0.1 之类引入舍入误差
        let factor = 10f64.powi(-exp);
        (x * factor).round() / factor
    }
}
