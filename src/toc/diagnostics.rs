//! 诊断信息输出
//!
//! 提取过程中的警告与错误通过可注入的 [`DiagnosticSink`] 报告，
//! 默认实现转发到 `log`，测试或宿主程序可以换成 [`MemorySink`] 收集。

use std::fmt;
use std::sync::Mutex;

/// 诊断级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Warn,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Warn => write!(f, "warn"),
            Level::Error => write!(f, "error"),
        }
    }
}

/// 一条诊断信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

/// 诊断信息接收端
pub trait DiagnosticSink: Send + Sync {
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// 转发到 `log` 的接收端
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn warn(&self, message: &str) {
        log::warn!(target: "tocforge", "{}", message);
    }

    fn error(&self, message: &str) {
        log::error!(target: "tocforge", "{}", message);
    }
}

/// 在内存中按顺序记录诊断信息的接收端
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 全部诊断信息（按产生顺序）
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.records.lock().map(|records| records.clone()).unwrap_or_default()
    }

    /// 全部消息文本
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics().into_iter().map(|d| d.message).collect()
    }

    /// 警告级别的消息
    pub fn warnings(&self) -> Vec<String> {
        self.messages_at(Level::Warn)
    }

    /// 错误级别的消息
    pub fn errors(&self) -> Vec<String> {
        self.messages_at(Level::Error)
    }

    pub fn clear(&self) {
        if let Ok(mut records) = self.records.lock() {
            records.clear();
        }
    }

    fn messages_at(&self, level: Level) -> Vec<String> {
        self.diagnostics()
            .into_iter()
            .filter(|d| d.level == level)
            .map(|d| d.message)
            .collect()
    }

    fn record(&self, level: Level, message: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.push(Diagnostic {
                level,
                message: message.to_string(),
            });
        }
    }
}

impl DiagnosticSink for MemorySink {
    fn warn(&self, message: &str) {
        self.record(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.record(Level::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_keeps_order_and_levels() {
        let sink = MemorySink::new();
        sink.warn("first");
        sink.error("second");
        sink.warn("third");

        assert_eq!(sink.messages(), vec!["first", "second", "third"]);
        assert_eq!(sink.warnings(), vec!["first", "third"]);
        assert_eq!(sink.errors(), vec!["second"]);

        sink.clear();
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn test_log_sink_does_not_panic_without_logger() {
        let sink = LogSink;
        sink.warn("no logger installed");
        sink.error("still fine");
    }
}
