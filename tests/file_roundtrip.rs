//! 端到端集成测试: 基于真实文件的转换往返.
//!
//! 使用临时目录验证文件后端: 写入 TCK 文件 -> 转换为 TRK 文件
//! -> 再转换回 TCK 文件, 校验字节级一致.

use mai::format::{FormatId, IoContext, transcode};

/// 写一个含两条轨迹的 Float32BE TCK 文件
fn write_sample_tck(path: &std::path::Path) {
    let nan = f32::NAN;
    let inf = f32::INFINITY;
    let mut data = b"datatype: Float32BE\nend\n".to_vec();
    let samples = [
        1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, nan, nan, nan, 7.0, 8.0, 9.0, nan, nan, nan, inf, inf,
        inf,
    ];
    for s in samples {
        data.extend_from_slice(&s.to_be_bytes());
    }
    std::fs::write(path, data).unwrap();
}

#[test]
fn test_文件往返() {
    let dir = tempfile::tempdir().unwrap();
    let tck_path = dir.path().join("input.tck");
    let trk_path = dir.path().join("middle.trk");
    let back_path = dir.path().join("back.tck");

    write_sample_tck(&tck_path);

    let registry = mai::default_format_registry();

    // TCK -> TRK
    let mut reader = registry.create_reader(FormatId::Tck).unwrap();
    let mut writer = registry.create_writer(FormatId::Trk).unwrap();
    let mut rio = IoContext::open_read(&tck_path.to_string_lossy()).unwrap();
    let mut wio = IoContext::open_write(&trk_path.to_string_lossy()).unwrap();
    let stats = transcode(reader.as_mut(), &mut rio, writer.as_mut(), &mut wio).unwrap();
    assert_eq!(stats.tracks, 2);
    assert_eq!(stats.points, 3);

    let trk_bytes = std::fs::read(&trk_path).unwrap();
    assert_eq!(trk_bytes.len(), 1000 + (4 + 24) + (4 + 12));
    assert_eq!(&trk_bytes[0..6], b"TRACK\0");

    // TRK -> TCK
    let mut reader = registry.create_reader(FormatId::Trk).unwrap();
    let mut writer = registry.create_writer(FormatId::Tck).unwrap();
    let mut rio = IoContext::open_read(&trk_path.to_string_lossy()).unwrap();
    let mut wio = IoContext::open_write(&back_path.to_string_lossy()).unwrap();
    let stats = transcode(reader.as_mut(), &mut rio, writer.as_mut(), &mut wio).unwrap();
    assert_eq!(stats.tracks, 2);
    assert_eq!(stats.points, 3);

    let original = std::fs::read(&tck_path).unwrap();
    let back = std::fs::read(&back_path).unwrap();
    assert_eq!(back, original);
}

#[test]
fn test_打开不存在的输入() {
    assert!(matches!(
        IoContext::open_read("/不存在/的/路径.tck").map(|_| ()),
        Err(mai::core::MaiError::Io(_))
    ));
}
