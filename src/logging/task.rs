use super::{LoggingConfig, build_current_log_path};
use anyhow::{Context, Result};
use chrono::{DateTime, Duration as ChronoDuration, Local, NaiveDate, TimeZone, Utc};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime};
use tracing::{debug, error};

/// 在给定运行时上启动日志维护任务: 周期清理, 零点日切
pub(super) fn spawn_log_maintenance_task(
    handle: &tokio::runtime::Handle,
    config: LoggingConfig,
    rotate_requested: Arc<AtomicBool>,
) {
    handle.spawn(async move {
        let period = Duration::from_secs(config.cleanup_interval_seconds.max(1));
        let mut cleanup_interval = tokio::time::interval(period);
        // 首次 tick 立即完成, init 中已经清理过一次
        cleanup_interval.tick().await;

        let mut next_rollover_at = next_rollover_or_soon(Local::now());
        loop {
            tokio::select! {
                _ = cleanup_interval.tick() => {
                    if let Err(err) = cleanup_logs(&config) {
                        error!("清理日志失败: {err:#}");
                    }
                }
                _ = tokio::time::sleep_until(next_rollover_at) => {
                    match ensure_current_log_file(&config) {
                        Ok(()) => rotate_requested.store(true, Ordering::Release),
                        Err(err) => error!("日志翻滚失败: {err:#}"),
                    }
                    if let Err(err) = cleanup_logs(&config) {
                        error!("翻滚后清理日志失败: {err:#}");
                    }
                    next_rollover_at = next_rollover_or_soon(Local::now());
                }
            }
        }
    });
}

fn next_rollover_or_soon(now: DateTime<Local>) -> tokio::time::Instant {
    compute_next_rollover(now).unwrap_or_else(|err| {
        error!("计算下一次翻滚时间失败: {err:#}");
        tokio::time::Instant::now() + Duration::from_secs(1)
    })
}

/// 确保当日日志文件存在
fn ensure_current_log_file(config: &LoggingConfig) -> Result<()> {
    let directory = Path::new(&config.directory);
    fs::create_dir_all(directory)?;
    let today = Local::now().date_naive();
    let current_path = build_current_log_path(directory, &config.file_prefix, today);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&current_path)
        .with_context(|| format!("创建当前日志文件失败, path={}", current_path.display()))?;
    Ok(())
}

/// 清理历史日志
///
/// 早于保留期限的日志 (含已压缩) 直接删除; 开启压缩时,
/// 今天以前的未压缩日志压缩为 `.log.gz`. 非本前缀的文件不受影响.
pub fn cleanup_logs(config: &LoggingConfig) -> Result<()> {
    cleanup_logs_at(config, Local::now().date_naive())
}

pub(super) fn cleanup_logs_at(config: &LoggingConfig, today: NaiveDate) -> Result<()> {
    let directory = Path::new(&config.directory);
    if !directory.exists() {
        return Ok(());
    }
    let cutoff = today - ChronoDuration::days(config.retention_days);

    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let file_name = entry.file_name().to_string_lossy().to_string();
        let file_path = entry.path();

        let Some((date, compressed)) = parse_rotated_log_name(&file_name, &config.file_prefix)
        else {
            continue;
        };

        if date < cutoff {
            debug!("删除过期日志: {}", file_path.display());
            if let Err(err) = fs::remove_file(&file_path) {
                error!("删除过期日志失败, path={}: {err}", file_path.display());
            }
            continue;
        }

        if config.compress_history && !compressed && date < today {
            if let Err(err) = compress_to_gz(&file_path) {
                error!("压缩历史日志失败: {err:#}");
            }
        }
    }

    Ok(())
}

fn compress_to_gz(path: &Path) -> Result<()> {
    let gz_path = PathBuf::from(format!("{}.gz", path.display()));
    if gz_path.exists() {
        return Ok(());
    }

    let mut input =
        File::open(path).with_context(|| format!("打开待压缩日志失败, path={}", path.display()))?;
    let output = File::create(&gz_path)
        .with_context(|| format!("创建压缩日志失败, path={}", gz_path.display()))?;
    let mut encoder = GzEncoder::new(output, Compression::default());

    let mut buf = [0u8; 8 * 1024];
    loop {
        let read = input.read(&mut buf)?;
        if read == 0 {
            break;
        }
        encoder.write_all(&buf[..read])?;
    }

    encoder.finish()?;
    fs::remove_file(path)
        .with_context(|| format!("删除已压缩日志失败, path={}", path.display()))?;
    Ok(())
}

/// 解析 `<prefix>.<YYYY-MM-DD>.log[.gz]`, 返回 (日期, 是否已压缩)
fn parse_rotated_log_name(file_name: &str, prefix: &str) -> Option<(NaiveDate, bool)> {
    let with_dot = file_name.strip_prefix(prefix)?.strip_prefix('.')?;

    if let Some(date_part) = with_dot.strip_suffix(".log") {
        return Some((parse_date(date_part)?, false));
    }
    if let Some(date_part) = with_dot.strip_suffix(".log.gz") {
        return Some((parse_date(date_part)?, true));
    }
    None
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn compute_next_rollover(now: DateTime<Local>) -> Result<tokio::time::Instant> {
    let next_date = now.date_naive() + ChronoDuration::days(1);
    let next_midnight = next_date
        .and_hms_opt(0, 0, 0)
        .context("计算下一次日志翻滚时间失败")?;
    let next_local = Local
        .from_local_datetime(&next_midnight)
        .earliest()
        .context("转换本地时间失败")?;
    let system_time = SystemTime::from(next_local.with_timezone(&Utc));
    let duration = system_time
        .duration_since(SystemTime::now())
        .unwrap_or(Duration::ZERO);
    Ok(tokio::time::Instant::now() + duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> LoggingConfig {
        LoggingConfig {
            directory: dir.path().to_string_lossy().to_string(),
            retention_days: 7,
            ..LoggingConfig::default()
        }
    }

    #[test]
    fn test_parse_rotated_log_name() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 6);
        assert_eq!(
            parse_rotated_log_name("avbind.2026-02-06.log", "avbind"),
            date.map(|d| (d, false))
        );
        assert_eq!(
            parse_rotated_log_name("avbind.2026-02-06.log.gz", "avbind"),
            date.map(|d| (d, true))
        );
        assert!(parse_rotated_log_name("avbind.log", "avbind").is_none());
        assert!(parse_rotated_log_name("other.2026-02-06.log", "avbind").is_none());
    }

    #[test]
    fn test_清理压缩与删除() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let today = NaiveDate::from_ymd_opt(2026, 3, 20).unwrap();
        let path = |name: &str| dir.path().join(name);

        fs::write(path("avbind.2026-03-20.log"), "today").unwrap();
        fs::write(path("avbind.2026-03-18.log"), "recent").unwrap();
        fs::write(path("avbind.2026-03-01.log"), "old").unwrap();
        fs::write(path("avbind.2026-03-02.log.gz"), "old-gz").unwrap();
        fs::write(path("notes.txt"), "keep").unwrap();

        cleanup_logs_at(&config, today).unwrap();

        assert!(path("avbind.2026-03-20.log").exists());
        assert!(!path("avbind.2026-03-18.log").exists());
        assert!(path("avbind.2026-03-18.log.gz").exists());
        assert!(!path("avbind.2026-03-01.log").exists());
        assert!(!path("avbind.2026-03-02.log.gz").exists());
        assert!(path("notes.txt").exists());

        let mut text = String::new();
        GzDecoder::new(File::open(path("avbind.2026-03-18.log.gz")).unwrap())
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text, "recent");
    }

    #[test]
    fn test_关闭压缩时保留原文件() {
        let dir = TempDir::new().unwrap();
        let config = LoggingConfig {
            compress_history: false,
            ..config_in(&dir)
        };
        let today = NaiveDate::from_ymd_opt(2026, 3, 20).unwrap();
        fs::write(dir.path().join("avbind.2026-03-19.log"), "x").unwrap();
        cleanup_logs_at(&config, today).unwrap();
        assert!(dir.path().join("avbind.2026-03-19.log").exists());
    }

    #[test]
    fn test_确保当日日志文件存在() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        ensure_current_log_file(&config).unwrap();
        let today = Local::now().date_naive();
        let current = build_current_log_path(dir.path(), &config.file_prefix, today);
        assert_eq!(current.metadata().unwrap().len(), 0);
    }
}
