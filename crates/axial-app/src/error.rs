//! Application-level errors.

use axial_config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no input: pass --bodies <file>, --builtin, or set migration.bodies_file")]
    NoInput,

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode JSON report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to encode RON report: {0}")]
    Ron(#[from] ron::Error),
}
