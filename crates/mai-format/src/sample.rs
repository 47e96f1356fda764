//! 采样值编解码.
//!
//! 按头部声明的数值编码读写单个 f32 采样值. 64 位变体在读取时
//! 收窄为 f32 (有损, 格式约定接受); "本机字节序" 变体按大端处理.

use mai_core::{DataType, MaiError, MaiResult, Point};

use crate::io::IoContext;

/// 按指定编码读取一个采样值, 游标前进对应的字节宽度
///
/// [`DataType::Unknown`] 不消耗任何输入, 直接返回正无穷:
/// 流读取器会把它当作流结束哨兵立即终止, 产生零条轨迹.
pub fn read_sample(io: &mut IoContext, datatype: DataType) -> MaiResult<f32> {
    match datatype {
        DataType::Float32 | DataType::Float32Be => io.read_f32_be(),
        DataType::Float32Le => io.read_f32_le(),
        DataType::Float64 | DataType::Float64Be => Ok(io.read_f64_be()? as f32),
        DataType::Float64Le => Ok(io.read_f64_le()? as f32),
        DataType::Unknown => Ok(f32::INFINITY),
    }
}

/// 按指定编码读取一个采样点 (x, y, z 三个分量)
pub fn read_point(io: &mut IoContext, datatype: DataType) -> MaiResult<Point> {
    let x = read_sample(io, datatype)?;
    let y = read_sample(io, datatype)?;
    let z = read_sample(io, datatype)?;
    Ok(Point::new(x, y, z))
}

/// 按指定编码写入一个采样值
pub fn write_sample(io: &mut IoContext, datatype: DataType, value: f32) -> MaiResult<()> {
    match datatype {
        DataType::Float32 | DataType::Float32Be => io.write_f32_be(value),
        DataType::Float32Le => io.write_f32_le(value),
        DataType::Float64 | DataType::Float64Be => io.write_f64_be(f64::from(value)),
        DataType::Float64Le => io.write_f64_le(f64::from(value)),
        DataType::Unknown => Err(MaiError::InvalidArgument(
            "无法以未知编码写入采样值".into(),
        )),
    }
}

/// 按指定编码写入一个采样点
pub fn write_point(io: &mut IoContext, datatype: DataType, point: Point) -> MaiResult<()> {
    write_sample(io, datatype, point.x)?;
    write_sample(io, datatype, point.y)?;
    write_sample(io, datatype, point.z)
}
