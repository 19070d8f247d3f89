use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Kube Error: {0}")]
    KubeError(#[source] kube::Error),

    #[error("Invalid Spec: {0}")]
    InvalidSpec(String),

    #[error("Missing Namespace: {0}")]
    MissingNamespace(String),

    /// NB: this is a catch-all for any other errors
    #[error("Other Error: {0}")]
    OtherError(String),
}
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Command line configuration
pub mod config;
mod events_helper;
pub mod nginx_controller;
pub mod store;

/// Log and trace integrations
pub mod telemetry;
