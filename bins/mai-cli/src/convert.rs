//! 单文件转换流程.

use std::io::Read;
use std::path::Path;

use mai_core::{ConversionStats, DataType, MaiError, MaiResult};
use mai_format::writer::TrackWriter;
use mai_format::writers::tck::TckWriter;
use mai_format::{FormatId, FormatRegistry, IoContext, transcode};

/// 确定文件的容器格式: 先看扩展名, 再做内容探测
pub fn detect_format(registry: &FormatRegistry, path: &Path) -> Option<FormatId> {
    let name = path.file_name().and_then(|n| n.to_str());
    if let Some(format) = name.and_then(FormatId::from_filename) {
        return Some(format);
    }

    // 扩展名不可用: 读取开头字节交给探测器
    let mut buf = [0u8; 512];
    let mut file = std::fs::File::open(path).ok()?;
    let n = file.read(&mut buf).ok()?;
    registry.probe(&buf[..n], name).map(|r| r.format_id)
}

/// 转换单个文件
pub fn convert_file(
    registry: &FormatRegistry,
    input: &Path,
    output: &Path,
    in_format: FormatId,
    out_format: FormatId,
    tck_datatype: DataType,
    overwrite: bool,
) -> MaiResult<ConversionStats> {
    if !overwrite && output.exists() {
        return Err(MaiError::InvalidArgument(format!(
            "输出文件已存在 '{}', 使用 -y 覆盖",
            output.display()
        )));
    }

    let mut reader = registry.create_reader(in_format)?;
    let mut writer: Box<dyn TrackWriter> = match out_format {
        FormatId::Tck => Box::new(TckWriter::with_datatype(tck_datatype)?),
        _ => registry.create_writer(out_format)?,
    };

    let mut input_io = IoContext::open_read(&input.to_string_lossy())?;
    let mut output_io = IoContext::open_write(&output.to_string_lossy())?;

    transcode(
        reader.as_mut(),
        &mut input_io,
        writer.as_mut(),
        &mut output_io,
    )
}
