use crate::library::logger::interface::{join_namespace, LogLevel, LogResult, Logger};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub namespace: Option<String>,
    pub message: String,
}

/// Keeps every record in memory. Namespaced children share the parent's records.
#[derive(Debug, Clone, Default)]
pub struct LoggerFake {
    namespace: Option<String>,
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl LoggerFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    pub fn records_at(&self, level: LogLevel) -> Vec<LogRecord> {
        self.records
            .lock()
            .iter()
            .filter(|record| record.level == level)
            .cloned()
            .collect()
    }
}

impl Logger for LoggerFake {
    fn log(&self, level: LogLevel, message: &str) -> LogResult {
        self.records.lock().push(LogRecord {
            level,
            namespace: self.namespace.clone(),
            message: message.to_string(),
        });
        Ok(())
    }

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerFake {
            namespace: Some(join_namespace(&self.namespace, namespace)),
            records: self.records.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::LoggerFake;
    use crate::library::logger::interface::{LogLevel, Logger};

    #[test]
    fn test_namespaced_children_share_records() {
        let logger = LoggerFake::new();
        let child = logger.with_namespace("privio").with_namespace("upload");

        logger.info("root").unwrap();
        child.error("failed").unwrap();

        let records = logger.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].namespace.as_deref(), Some("privio:upload"));
        assert_eq!(logger.records_at(LogLevel::Error)[0].message, "failed");
    }
}
