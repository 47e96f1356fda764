//! mai - 纤维束轨迹转换命令行工具
//!
//! 在 TCK 风格 (文本头部 + 哨兵分隔浮点流) 与 TRK 风格
//! (固定二进制头部 + 长度前缀轨迹) 之间双向转换.

mod batch;
mod convert;
mod logging;

use clap::Parser;
use std::path::Path;
use std::process;

use mai_core::DataType;
use mai_format::{FormatId, FormatRegistry};

#[derive(Parser, Debug)]
#[command(name = "mai", version, about = "纯 Rust 纤维束轨迹转换工具")]
struct Cli {
    /// 输入文件或目录
    #[arg(short, long)]
    input: Option<String>,

    /// 输出文件或目录
    #[arg(short, long)]
    output: Option<String>,

    /// 转换为 TRK 风格输出
    #[arg(long = "to-trk", conflicts_with = "to_tck")]
    to_trk: bool,

    /// 转换为 TCK 风格输出
    #[arg(long = "to-tck")]
    to_tck: bool,

    /// TCK 输出的采样点编码 (Float32BE/Float32LE/Float64BE/Float64LE/...)
    #[arg(long)]
    datatype: Option<String>,

    /// 覆盖输出文件
    #[arg(short = 'y', long)]
    overwrite: bool,

    /// 日志级别 (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    logging::init("mai-cli", cli.verbose);

    if cli.input.is_none() {
        print_banner();
        return;
    }
    let input_path = cli.input.as_ref().unwrap();

    if cli.output.is_none() {
        eprintln!("错误: 必须指定输出路径 (-o <输出>)");
        process::exit(1);
    }
    let output_path = cli.output.as_ref().unwrap();

    // 初始化注册表
    let mut registry = FormatRegistry::new();
    mai_format::register_all(&mut registry);

    // TCK 输出编码
    let tck_datatype = match cli.datatype.as_deref() {
        None => DataType::Float32Be,
        Some(value) => {
            let dt = DataType::parse(value);
            if dt == DataType::Unknown {
                eprintln!("错误: 无法识别的采样点编码 '{value}'");
                process::exit(1);
            }
            dt
        }
    };

    let input = Path::new(input_path);
    let output = Path::new(output_path);

    // 确定转换方向
    let out_format = resolve_out_format(&cli, &registry, input, output);
    let in_format = match out_format {
        FormatId::Trk => FormatId::Tck,
        _ => FormatId::Trk,
    };

    eprintln!(
        "mai 版本 {} -- 纯 Rust 纤维束轨迹转换工具",
        env!("CARGO_PKG_VERSION")
    );
    eprintln!("输入: {input_path} ({in_format})");
    eprintln!("输出: {output_path} ({out_format})");

    if input.is_dir() {
        // 目录批量模式
        match batch::convert_dir(
            &registry,
            input,
            output,
            in_format,
            out_format,
            tck_datatype,
            cli.overwrite,
        ) {
            Ok(outcome) => {
                eprintln!();
                eprintln!(
                    "批量转换完成: {} 个成功, {} 个失败",
                    outcome.converted, outcome.failed
                );
                if outcome.converted == 0 && outcome.failed == 0 {
                    eprintln!("警告: 目录中没有 .{} 文件", in_format.extension());
                }
                if outcome.failed > 0 {
                    process::exit(1);
                }
            }
            Err(e) => {
                eprintln!("错误: {e}");
                process::exit(1);
            }
        }
        return;
    }

    // 单文件模式: 输入格式与推断不符时提醒
    if let Some(detected) = convert::detect_format(&registry, input) {
        if detected != in_format {
            eprintln!("警告: 输入文件看起来是 {detected} 格式, 仍按 {in_format} 解析");
        }
    }

    // 输出是已存在的目录时, 文件名沿用输入, 扩展名换成目标格式
    let out_path = if output.is_dir() {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        output.join(format!("{stem}.{}", out_format.extension()))
    } else {
        output.to_path_buf()
    };

    match convert::convert_file(
        &registry,
        input,
        &out_path,
        in_format,
        out_format,
        tck_datatype,
        cli.overwrite,
    ) {
        Ok(stats) => {
            eprintln!();
            eprintln!("转换完成:");
            eprintln!("  总轨迹数   = {}", stats.tracks);
            eprintln!("  总采样点数 = {}", stats.points);
            eprintln!("  平均轨迹长度 = {}", stats.avg_track_len());
        }
        Err(e) => {
            eprintln!("错误: 转换 '{input_path}' 失败: {e}");
            process::exit(1);
        }
    }
}

/// 确定输出格式: 显式方向标志 > 输出扩展名 > 输入格式的相反方向
fn resolve_out_format(
    cli: &Cli,
    registry: &FormatRegistry,
    input: &Path,
    output: &Path,
) -> FormatId {
    if cli.to_trk {
        return FormatId::Trk;
    }
    if cli.to_tck {
        return FormatId::Tck;
    }
    if let Some(format) = output
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(FormatId::from_filename)
    {
        return format;
    }
    // 目录输入按扩展名, 文件输入还可以做内容探测
    let in_format = if input.is_dir() {
        None
    } else {
        convert::detect_format(registry, input)
    };
    match in_format {
        Some(FormatId::Tck) => FormatId::Trk,
        Some(FormatId::Trk) => FormatId::Tck,
        _ => {
            eprintln!("错误: 无法确定转换方向, 请使用 --to-trk 或 --to-tck");
            process::exit(1);
        }
    }
}

/// 打印版本横幅
fn print_banner() {
    println!(
        "mai 版本 {} -- 纯 Rust 纤维束轨迹转换工具",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("用法: mai -i <输入> -o <输出> [选项]");
    println!();
    println!("选项:");
    println!("  -i <文件或目录>     输入路径 (目录时批量转换其中的轨迹文件)");
    println!("  -o <文件或目录>     输出路径");
    println!("  --to-trk            转换为 TRK 风格输出");
    println!("  --to-tck            转换为 TCK 风格输出");
    println!("  --datatype <编码>   TCK 输出的采样点编码 (默认 Float32BE)");
    println!("  -y                  覆盖输出文件");
    println!("  -v / -vv            提升日志级别");
    println!();
    println!("示例:");
    println!("  mai --to-trk -i input.tck -o output.trk      单文件转换");
    println!("  mai --to-trk -i input.tck -o .               输出到当前目录");
    println!("  mai --to-trk -i data/inputs -o data/outputs  目录批量转换");
    println!("  mai --to-tck -i input.trk -o output.tck      反向转换");
    println!("  mai -i input.tck -o output.trk               方向由扩展名推断");
    println!();
    println!("使用 --help 查看完整用法.");
}
