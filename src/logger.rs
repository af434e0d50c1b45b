// src/logger.rs
use std::{path::Path, sync::OnceLock};
use tracing_subscriber::{EnvFilter, fmt};

static GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
static INIT: OnceLock<()> = OnceLock::new();

/// Initialize logging once for the whole process.
/// - `path`: e.g., "logs/perft.log"
/// - `filter`: e.g., "trichess::moves::perft=debug,trichess::status=debug"
///
/// `RUST_LOG` wins over `filter` when set. If the log file cannot be opened
/// events go to stderr instead.
pub fn init_logging<P: AsRef<Path>>(path: P, filter: &str) {
    INIT.get_or_init(|| {
        let path = path.as_ref();

        if let Some(dir) = path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }

        let env_filter = if std::env::var_os("RUST_LOG").is_some() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"))
        };

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path);

        let builder = fmt()
            .with_env_filter(env_filter)
            .with_ansi(false)
            .with_target(true) // module path, e.g. trichess::moves::execute
            .with_file(true)
            .with_line_number(true);

        // Ignore the error if a global subscriber is already set (tests).
        match file {
            Ok(file) => {
                let (non_blocking, guard) = tracing_appender::non_blocking(file);
                // Keep the guard alive for the program lifetime
                let _ = GUARD.set(guard);
                let _ = tracing::subscriber::set_global_default(
                    builder.with_writer(non_blocking).finish(),
                );
            }
            Err(_) => {
                let _ = tracing::subscriber::set_global_default(
                    builder.with_writer(std::io::stderr).finish(),
                );
            }
        }
    });
}
