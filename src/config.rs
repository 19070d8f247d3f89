use clap::{Parser, ValueEnum};
use duration_string::DurationString;
use std::time::Duration;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Single line, human readable
    #[default]
    Compact,
    /// One JSON object per line
    Json,
}

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Keeps an nginx Deployment alongside every NginxDeploy", long_about = None)]
pub struct Config {
    /// Address of the health and diagnostics server
    #[arg(long, default_value = "0.0.0.0:8080")]
    pub bind_address: String,

    /// Only watch NginxDeploy objects in this namespace (all namespaces if unset)
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Delay before a failed reconciliation is retried
    #[arg(long, default_value = "5m")]
    pub error_requeue: DurationString,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl Config {
    pub fn error_requeue(&self) -> Duration {
        self.error_requeue.into()
    }
}
