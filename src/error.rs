use crate::engines::generation::individual::Individual;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GepError {
    #[error("Invalid genome: {0}")]
    InvalidGenome(String),

    #[error("Construction error: {0}")]
    Construction(String),

    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    #[error("Selection error: {0}")]
    Selection(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Evaluation error: {0}")]
    Evaluation(String),

    #[error("Unbound variable: {0}")]
    UnboundVariable(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, GepError>;

/// Returned by `Population::add` once the population is full.
///
/// Seeding a population routinely runs into this, so the rejected individual
/// is handed back rather than dropped.
#[derive(Error, Debug)]
#[error("Population full: capacity of {capacity} reached")]
pub struct CapacityExceeded {
    pub capacity: usize,
    pub rejected: Box<Individual>,
}
