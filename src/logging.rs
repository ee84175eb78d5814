//! Logger setup shared by the binaries

use std::path::Path;

use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};

use crate::error::{KioskError, Result};

/// Start the global logger
///
/// `spec` is a flexi_logger/env_logger style filter such as `info` or
/// `artwork_sonify=debug`; `RUST_LOG` takes precedence when set. With a
/// `log_dir`, output goes to rotated files there and warnings are duplicated
/// to stderr. The returned handle must stay alive for the program's lifetime.
pub fn init_logging(spec: &str, log_dir: Option<&Path>) -> Result<LoggerHandle> {
    let mut logger = Logger::try_with_env_or_str(spec)
        .map_err(|e| KioskError::config(format!("invalid log spec '{}'", spec), e))?;

    if let Some(dir) = log_dir {
        logger = logger
            .log_to_file(FileSpec::default().directory(dir))
            .duplicate_to_stderr(Duplicate::Warn)
            .rotate(
                Criterion::Size(1024 * 1024),
                Naming::Timestamps,
                Cleanup::KeepLogFiles(5),
            );
    }

    logger
        .start()
        .map_err(|e| KioskError::config("logger initialization failed", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::info;

    // the global logger can be installed once per process, so this is the
    // only test that starts it
    #[test]
    fn test_file_logging_writes_into_log_dir() {
        let dir = std::env::temp_dir().join(format!("artwork_sonify_logs_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let handle = init_logging("info", Some(&dir)).unwrap();
        info!("file logging check");
        handle.flush();

        let files = std::fs::read_dir(&dir).unwrap().count();
        assert!(files >= 1, "no log file in {}", dir.display());

        drop(handle);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
