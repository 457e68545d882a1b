use super::state::LifecycleState;
use crate::core::io::bfm::BfmError;
use crate::core::io::results::ResultsError;
use crate::core::statistics::StatisticsError;
use crate::engine::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Initialization failed: {0}")]
    Initialization(String),

    #[error("Invalid q-vector table: {0}")]
    InvalidQTable(String),

    #[error("Cannot {operation} while the task manager is {state}")]
    Lifecycle {
        operation: &'static str,
        state: LifecycleState,
    },

    #[error("Configuration file error: {source}")]
    Bfm {
        #[from]
        source: BfmError,
    },

    #[error("Failed to write results: {source}")]
    Results {
        #[from]
        source: ResultsError,
    },

    #[error("Statistics error: {source}")]
    Statistics {
        #[from]
        source: StatisticsError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to place chain {chain}: {message}")]
    Placement { chain: usize, message: String },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
