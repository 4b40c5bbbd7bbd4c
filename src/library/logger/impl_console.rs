use crate::library::logger::interface::{join_namespace, LogLevel, LogResult, Logger};
use chrono::Utc;
use std::io::Write;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct LoggerConsole {
    namespace: Option<String>,
    timezone: chrono::FixedOffset,
}

impl LoggerConsole {
    pub fn new(timezone: chrono::FixedOffset) -> Self {
        Self {
            namespace: None,
            timezone,
        }
    }

    fn format_line(&self, level: LogLevel, message: &str) -> String {
        let local_time = Utc::now().with_timezone(&self.timezone);
        let formatted = local_time.format("%Y-%m-%d %I:%M:%S%.3f %p");
        match &self.namespace {
            Some(namespace) => format!(
                "[{}] {} {}: {}",
                formatted,
                level.as_str(),
                namespace,
                message
            ),
            None => format!("[{}] {} {}", formatted, level.as_str(), message),
        }
    }
}

impl Logger for LoggerConsole {
    fn log(&self, level: LogLevel, message: &str) -> LogResult {
        let line = self.format_line(level, message);
        match level {
            LogLevel::Info => writeln!(std::io::stdout().lock(), "{}", line)?,
            LogLevel::Warn | LogLevel::Error => writeln!(std::io::stderr().lock(), "{}", line)?,
        }
        Ok(())
    }

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerConsole {
            namespace: Some(join_namespace(&self.namespace, namespace)),
            timezone: self.timezone,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::LoggerConsole;
    use crate::library::logger::interface::LogLevel;
    use chrono::Offset;

    #[test]
    fn test_format_line_includes_level_and_namespace() {
        let logger = LoggerConsole::new(chrono::Utc.fix());
        let namespaced = LoggerConsole {
            namespace: Some("privio:camera".to_string()),
            ..logger.clone()
        };

        let line = namespaced.format_line(LogLevel::Error, "boom");
        assert!(line.ends_with("ERROR privio:camera: boom"), "{}", line);

        let line = logger.format_line(LogLevel::Info, "hello");
        assert!(line.ends_with("INFO hello"), "{}", line);
    }
}
