//! 日志初始化模块.
//!
//! 双输出:
//! - console: 彩色, 级别随 -v/-vv 提升 (默认 info)
//! - file: 无色, 固定 debug 级别, 可通过 MAI_LOG 环境变量覆盖
//!
//! 日志文件输出到 $cwd/logs/{prefix}.{date}.log

use chrono::Local;
use std::sync::OnceLock;
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, FormatEvent, FormatFields, format::Writer},
    layer::{Layer, SubscriberExt},
    registry::LookupSpan,
    util::SubscriberInitExt,
};

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// 初始化日志系统
///
/// - `file_prefix`: 日志文件前缀 (如 "mai-cli")
/// - `verbosity`: 0=info, 1=debug, 2+=trace (由 -v/-vv 控制)
pub fn init(file_prefix: &str, verbosity: u8) {
    std::fs::create_dir_all("logs").ok();

    let file_appender = tracing_appender::rolling::RollingFileAppender::builder()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .filename_prefix(file_prefix)
        .filename_suffix("log")
        .build("logs")
        .expect("创建日志文件失败");

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    LOG_GUARD.set(guard).ok();

    // Console: 级别随 -v 提升, 彩色
    let console_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let console_layer = fmt::Layer::default()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .event_format(MaiFormatter { ansi: true })
        .with_filter(EnvFilter::new(console_level));

    // File: 固定 debug, MAI_LOG 环境变量可覆盖
    let file_filter =
        EnvFilter::try_from_env("MAI_LOG").unwrap_or_else(|_| EnvFilter::new("debug"));
    let file_layer = fmt::Layer::default()
        .with_writer(non_blocking)
        .with_ansi(false)
        .event_format(MaiFormatter { ansi: false })
        .with_filter(file_filter);

    Registry::default()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// 统一格式: 时间戳 + 级别 + 消息, console 输出附带级别着色
struct MaiFormatter {
    ansi: bool,
}

impl<S, N> FormatEvent<S, N> for MaiFormatter
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let now = Local::now();
        let meta = event.metadata();
        let stamp = now.format("%m-%d %H:%M:%S%.3f");

        if self.ansi {
            let color = match *meta.level() {
                tracing::Level::ERROR => "\x1b[31m",
                tracing::Level::WARN => "\x1b[33m",
                tracing::Level::INFO => "\x1b[32m",
                _ => "\x1b[34m",
            };
            write!(writer, "[{stamp}] {}{:5}\x1b[0m > ", color, meta.level())?;
        } else {
            write!(writer, "[{stamp}] {:5} > ", meta.level())?;
        }
        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
