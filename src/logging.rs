use std::collections::HashMap;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::shared::paths::ensure_dir;

/// Log targets that get their own daily file. Everything else goes to `system.log`.
pub const COMPONENTS: [&str; 2] = ["storage", "remote"];

/// Guards that must be kept alive to ensure logs are flushed
pub struct LoggingGuards {
    _guards: Vec<WorkerGuard>,
}

/// Multi-target writer that routes logs to different files based on target
struct ComponentWriter {
    writers: HashMap<&'static str, NonBlocking>,
    system_writer: NonBlocking,
}

impl<'a> MakeWriter<'a> for ComponentWriter {
    type Writer = Box<dyn std::io::Write + 'a>;

    fn make_writer(&'a self) -> Self::Writer {
        Box::new(self.system_writer.clone())
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        match component_for(meta.target()).and_then(|c| self.writers.get(c)) {
            Some(writer) => Box::new(writer.clone()),
            None => Box::new(self.system_writer.clone()),
        }
    }
}

/// The component a log target belongs to, if it has its own file.
pub fn component_for(target: &str) -> Option<&'static str> {
    COMPONENTS.into_iter().find(|component| {
        target == *component
            || target
                .strip_prefix(component)
                .is_some_and(|rest| rest.starts_with("::"))
    })
}

/// Initialize the logging system with per-component log files under `log_dir`.
pub fn init_logging(log_dir: &Path) -> Result<LoggingGuards, Box<dyn std::error::Error>> {
    ensure_dir(log_dir)?;

    let mut guards = Vec::new();
    let mut writers = HashMap::new();

    for component in COMPONENTS {
        let appender =
            RollingFileAppender::new(Rotation::DAILY, log_dir, format!("{}.log", component));
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        writers.insert(component, non_blocking);
        guards.push(guard);
    }

    let system_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "system.log");
    let (system_writer, system_guard) = tracing_appender::non_blocking(system_appender);
    guards.push(system_guard);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(ComponentWriter {
                writers,
                system_writer,
            })
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false),
    );

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(target: "system", "Logging initialized at {:?}", log_dir);

    Ok(LoggingGuards { _guards: guards })
}
