use async_trait::async_trait;

use crate::portfolio::errors::PortfolioError;
use crate::portfolio::models::Holding;
use crate::portfolio::models::Position;

/// Port for portfolio read operations.
#[async_trait]
pub trait PortfolioServicePort: Send + Sync + 'static {
    /// List every holding, unfiltered.
    async fn all_holdings(&self) -> Result<Vec<Holding>, PortfolioError>;

    /// List every position, unfiltered.
    async fn all_positions(&self) -> Result<Vec<Position>, PortfolioError>;
}

/// Persistence operations for portfolio collections.
#[async_trait]
pub trait PortfolioRepository: Send + Sync + 'static {
    async fn list_holdings(&self) -> Result<Vec<Holding>, PortfolioError>;

    async fn list_positions(&self) -> Result<Vec<Position>, PortfolioError>;
}
