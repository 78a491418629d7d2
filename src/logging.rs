use cfg_if::cfg_if;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};
use tracing_subscriber::util::SubscriberInitExt;

/// Level used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        pub fn init() {
            // Browser console via tracing-wasm
            let wasm_layer = tracing_wasm::WASMLayer::new(tracing_wasm::WASMLayerConfig::default());

            let _ = tracing_subscriber::registry()
                .with(env_filter())
                .with(wasm_layer)
                .try_init();

            #[cfg(feature = "console_error_panic_hook")]
            console_error_panic_hook::set_once();
        }
    } else {
        use std::env;
        use std::ffi::OsStr;
        use std::io;
        use std::path::{Path, PathBuf};

        use anyhow::Context;
        use once_cell::sync::OnceCell;
        use tracing_appender::non_blocking::WorkerGuard;
        use tracing_appender::rolling::{RollingFileAppender, Rotation};
        use tracing_subscriber::fmt;

        pub const LOG_FILE_ENV: &str = "DODGER_LOG_FILE";
        const DEFAULT_LOG_FILE: &str = "logs/dodger.log";

        static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

        /// Directory and file prefix for the rolling log, from `DODGER_LOG_FILE`.
        pub fn log_file_parts(log_path: &str) -> (PathBuf, PathBuf) {
            let path = Path::new(log_path);
            let dir = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
                _ => PathBuf::from("."),
            };
            let file = path.file_name().unwrap_or(OsStr::new("dodger.log"));
            (dir, PathBuf::from(file))
        }

        /// Daily rolling appender; fails if the log directory cannot be created.
        pub fn file_appender(dir: &Path, file: &Path) -> anyhow::Result<RollingFileAppender> {
            RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(file.to_string_lossy())
                .build(dir)
                .with_context(|| format!("open log file in {}", dir.display()))
        }

        pub fn init() {
            let console_layer = fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_level(true)
                .compact();

            let log_path = env::var(LOG_FILE_ENV).unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
            let (dir, file) = log_file_parts(&log_path);
            // No file layer (stderr only) when the log directory is unusable
            let (file_layer, file_error) = match file_appender(&dir, &file) {
                Ok(appender) => {
                    let (nb_writer, guard) = tracing_appender::non_blocking(appender);
                    let _ = FILE_GUARD.set(guard);
                    let layer = fmt::layer()
                        .with_writer(nb_writer)
                        .with_ansi(false)
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_level(true)
                        .compact();
                    (Some(layer), None)
                }
                Err(e) => (None, Some(e)),
            };

            if tracing_subscriber::registry()
                .with(env_filter())
                .with(console_layer)
                .with(file_layer)
                .try_init()
                .is_err()
            {
                // Someone else (a test harness) already owns the global subscriber
                return;
            }

            if let Some(e) = file_error {
                tracing::warn!(error = %format!("{e:#}"), "file logging disabled");
            }

            // Hook panics to log with backtrace
            std::panic::set_hook(Box::new(|info| {
                let mut msg = String::new();
                if let Some(loc) = info.location() {
                    msg.push_str(&format!("panic at {}:{}:{} ", loc.file(), loc.line(), loc.column()));
                }
                if let Some(s) = info.payload().downcast_ref::<&str>() { msg.push_str(s); }
                else if let Some(s) = info.payload().downcast_ref::<String>() { msg.push_str(s); }
                else { msg.push_str("<non-string panic>"); }
                let bt = std::backtrace::Backtrace::force_capture();
                tracing::error!("{}\nBacktrace:\n{:?}", msg, bt);
            }));
        }

        #[cfg(test)]
        mod tests {
            use super::*;

            #[test]
            fn test_log_file_parts() {
                assert_eq!(
                    log_file_parts("logs/dodger.log"),
                    (PathBuf::from("logs"), PathBuf::from("dodger.log"))
                );
                assert_eq!(
                    log_file_parts("run.log"),
                    (PathBuf::from("."), PathBuf::from("run.log"))
                );
            }

            #[test]
            fn test_file_appender_reports_unusable_dir() {
                let blocker = env::temp_dir().join(format!("dodger-log-blocker-{}", std::process::id()));
                std::fs::write(&blocker, b"not a directory").expect("write temp file");

                let result = file_appender(&blocker.join("logs"), Path::new("dodger.log"));
                let _ = std::fs::remove_file(&blocker);

                let err = result.err().expect("directory under a regular file");
                assert!(format!("{err:#}").contains("dodger-log-blocker"));
            }

            #[test]
            fn test_file_appender_creates_dir() {
                let dir = env::temp_dir().join(format!("dodger-log-dir-{}", std::process::id()));
                let result = file_appender(&dir, Path::new("dodger.log"));
                assert!(result.is_ok());
                assert!(dir.is_dir());
                drop(result);
                let _ = std::fs::remove_dir_all(&dir);
            }
        }
    }
}
