//! 日志系统.
//!
//! 库 crate 通过 `log` 门面输出日志, 此模块在应用一侧安装 `tracing` 订阅器:
//! - 控制台层 (stderr, 彩色)
//! - 文件层 (`<directory>/<file_prefix>.<YYYY-MM-DD>.log`, 非阻塞写入)
//!
//! 过滤规则取自 `LoggingConfig.level`, 设置了 `AVBIND_LOG` 环境变量时以其为准.
//! 历史日志按天压缩为 `.log.gz`, 超过保留天数后删除.

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, FormatEvent, FormatFields, format::Writer},
    layer::{Layer, SubscriberExt},
    registry::LookupSpan,
    util::SubscriberInitExt,
};

mod task;

pub use task::cleanup_logs;

/// 覆盖日志级别的环境变量
pub const LOG_ENV: &str = "AVBIND_LOG";

/// 日志配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 过滤规则, 语法同 `EnvFilter`, 如 "info" 或 "avbind_codec=debug"
    #[serde(default = "default_level")]
    pub level: String,
    /// 日志目录
    #[serde(default = "default_directory")]
    pub directory: String,
    /// 日志文件名前缀
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
    /// 保留天数
    #[serde(default = "default_retention_days")]
    pub retention_days: i64,
    /// 是否压缩历史日志
    #[serde(default = "default_true")]
    pub compress_history: bool,
    /// 后台清理间隔 (秒)
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_seconds: u64,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_directory() -> String {
    "logs".to_string()
}

fn default_file_prefix() -> String {
    "avbind".to_string()
}

fn default_true() -> bool {
    true
}

fn default_retention_days() -> i64 {
    30
}

fn default_cleanup_interval() -> u64 {
    3600
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            directory: default_directory(),
            file_prefix: default_file_prefix(),
            retention_days: default_retention_days(),
            compress_history: default_true(),
            cleanup_interval_seconds: default_cleanup_interval(),
        }
    }
}

impl LoggingConfig {
    /// 从 JSON 文件加载, 缺省字段取默认值
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("读取日志配置失败, path={}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("解析日志配置失败, path={}", path.display()))
    }

    /// 生效的过滤规则: 环境变量优先
    pub fn effective_level(&self) -> String {
        match std::env::var(LOG_ENV) {
            Ok(value) if !value.trim().is_empty() => value,
            _ => self.level.clone(),
        }
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// 安装全局日志订阅器
///
/// 同时把 `log` 门面的记录转发到 `tracing`. 进程内只能成功调用一次.
/// 当前线程处于 tokio 运行时中时, 会启动后台任务负责日切与清理.
pub fn init(config: LoggingConfig) -> Result<()> {
    std::fs::create_dir_all(&config.directory)
        .with_context(|| format!("创建日志目录失败, path={}", config.directory))?;

    let level = config.effective_level();
    let console_filter =
        EnvFilter::try_new(&level).with_context(|| format!("无效的日志级别: {level}"))?;
    let file_filter = EnvFilter::try_new(&level)?;

    let rotate_requested = Arc::new(AtomicBool::new(false));
    let file_appender = CurrentFileWriter::new(
        Path::new(&config.directory),
        &config.file_prefix,
        Arc::clone(&rotate_requested),
    )?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::Layer::default()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .event_format(ConsoleFormatter)
        .with_filter(console_filter);

    let file_layer = fmt::Layer::default()
        .with_writer(non_blocking)
        .with_ansi(false)
        .event_format(FileFormatter)
        .with_filter(file_filter);

    Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("日志系统已经初始化")?;
    LOG_GUARD.set(guard).ok();

    if let Err(err) = cleanup_logs(&config) {
        tracing::warn!("启动时清理日志失败: {err:#}");
    }
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => task::spawn_log_maintenance_task(&handle, config, rotate_requested),
        Err(_) => tracing::debug!("不在 tokio 运行时中, 跳过日志后台维护"),
    }
    Ok(())
}

/// 写入当日日志文件, 收到日切信号后重新打开
struct CurrentFileWriter {
    directory: PathBuf,
    prefix: String,
    rotate_requested: Arc<AtomicBool>,
    file: File,
}

impl CurrentFileWriter {
    fn new(directory: &Path, prefix: &str, rotate_requested: Arc<AtomicBool>) -> Result<Self> {
        let today = Local::now().date_naive();
        let file = open_append_file(&build_current_log_path(directory, prefix, today))?;
        Ok(Self {
            directory: directory.to_path_buf(),
            prefix: prefix.to_string(),
            rotate_requested,
            file,
        })
    }

    fn reopen_current_file(&mut self) -> std::io::Result<()> {
        let today = Local::now().date_naive();
        let file_path = build_current_log_path(&self.directory, &self.prefix, today);
        self.file = open_append_file(&file_path).map_err(std::io::Error::other)?;
        Ok(())
    }
}

impl Write for CurrentFileWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if self.rotate_requested.swap(false, Ordering::AcqRel) {
            self.reopen_current_file()?;
        }
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.file.flush()
    }
}

fn open_append_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("打开日志文件失败, path={}", path.display()))
}

/// 指定日期的日志文件路径
pub fn build_current_log_path(directory: &Path, prefix: &str, date: NaiveDate) -> PathBuf {
    directory.join(format!("{}.{}.log", prefix, date.format("%Y-%m-%d")))
}

struct ConsoleFormatter;

impl<S, N> FormatEvent<S, N> for ConsoleFormatter
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
        write!(
            writer,
            "[{:02}-{:02} {:02}:{:02}:{:02}.{:03}] ",
            now.month(),
            now.day(),
            now.hour(),
            now.minute(),
            now.second(),
            now.timestamp_subsec_millis()
        )?;
        let color = match *meta.level() {
            tracing::Level::ERROR => "\x1b[31m",
            tracing::Level::WARN => "\x1b[33m",
            tracing::Level::INFO => "\x1b[32m",
            _ => "\x1b[34m",
        };
        write!(
            writer,
            "{}{:5}\x1b[0m {} > ",
            color,
            meta.level().to_string(),
            meta.target()
        )?;
        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

struct FileFormatter;

impl<S, N> FormatEvent<S, N> for FileFormatter
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
        write!(
            writer,
            "[{}] {:5} {}:{} > ",
            now.format("%Y-%m-%d %H:%M:%S%.3f"),
            meta.level().to_string(),
            meta.file().unwrap_or(meta.target()),
            meta.line().unwrap_or(0)
        )?;
        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
