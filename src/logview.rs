//! Log capture for the in-window log panel.
//!
//! Records still go to stderr through `env_logger`; a copy of each one that
//! passes the filter is kept in a bounded [`LogBuffer`].

use chrono::Local;
use log::{Level, Log, Metadata, Record};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone, Debug, PartialEq)]
pub struct LogLine {
    pub time: String,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl LogLine {
    fn from_record(record: &Record) -> Self {
        Self {
            time: Local::now().format("%H:%M:%S").to_string(),
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LogBuffer {
    lines: Arc<Mutex<VecDeque<LogLine>>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn push(&self, line: LogLine) {
        let mut lines = self.lock();
        while lines.len() >= self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    pub fn snapshot(&self) -> Vec<LogLine> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<LogLine>> {
        self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

struct PanelLogger {
    inner: env_logger::Logger,
    buffer: LogBuffer,
}

impl Log for PanelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if !self.inner.matches(record) {
            return;
        }
        self.buffer.push(LogLine::from_record(record));
        self.inner.log(record);
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Install the global logger. The default level is `info` and can be
/// overridden through `RUST_LOG`.
pub fn init(capacity: usize) -> LogBuffer {
    let buffer = LogBuffer::new(capacity);
    let inner = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .build();
    let max_level = inner.filter();
    let logger = PanelLogger {
        inner,
        buffer: buffer.clone(),
    };
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(max_level);
    }
    buffer
}
