use std::io;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Default)]
pub struct ChatMetrics {
    turns_total: AtomicU64,
    matched_total: AtomicU64,
    fallback_total: AtomicU64,
    names_captured_total: AtomicU64,
    empty_inputs_total: AtomicU64,
    faults_total: AtomicU64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMetricsSnapshot {
    pub turns_total: u64,
    pub matched_total: u64,
    pub fallback_total: u64,
    pub names_captured_total: u64,
    pub empty_inputs_total: u64,
    pub faults_total: u64,
}

impl ChatMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_turn(&self) {
        self.turns_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_matched(&self) {
        self.matched_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_fallback(&self) {
        self.fallback_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_name_captured(&self) {
        self.names_captured_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_empty_input(&self) {
        self.empty_inputs_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_fault(&self) {
        self.faults_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ChatMetricsSnapshot {
        ChatMetricsSnapshot {
            turns_total: self.turns_total.load(Ordering::Relaxed),
            matched_total: self.matched_total.load(Ordering::Relaxed),
            fallback_total: self.fallback_total.load(Ordering::Relaxed),
            names_captured_total: self.names_captured_total.load(Ordering::Relaxed),
            empty_inputs_total: self.empty_inputs_total.load(Ordering::Relaxed),
            faults_total: self.faults_total.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" | "text" => Ok(Self::Pretty),
            other => Err(format!("unknown log format `{other}`")),
        }
    }
}

/// Installs the global subscriber once. Logs go to stderr so the
/// conversation on stdout stays readable.
pub fn init_tracing(service_name: &str, format: LogFormat) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}=warn,parlor_agents=warn", service_name))
        });

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr);

        match format {
            LogFormat::Json => builder
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .init(),
            LogFormat::Pretty => builder.pretty().init(),
        }
    });
}
