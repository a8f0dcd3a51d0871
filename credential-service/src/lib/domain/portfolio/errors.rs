use thiserror::Error;

/// Error for portfolio read operations
#[derive(Debug, Clone, Error)]
pub enum PortfolioError {
    #[error("Storage error: {0}")]
    Storage(String),
}
