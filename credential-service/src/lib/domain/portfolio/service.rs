use std::sync::Arc;

use async_trait::async_trait;

use crate::portfolio::errors::PortfolioError;
use crate::portfolio::models::Holding;
use crate::portfolio::models::Position;
use crate::portfolio::ports::PortfolioRepository;
use crate::portfolio::ports::PortfolioServicePort;

/// Read-only service over the holdings and positions collections.
pub struct PortfolioService<R>
where
    R: PortfolioRepository,
{
    repository: Arc<R>,
}

impl<R> PortfolioService<R>
where
    R: PortfolioRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> PortfolioServicePort for PortfolioService<R>
where
    R: PortfolioRepository,
{
    async fn all_holdings(&self) -> Result<Vec<Holding>, PortfolioError> {
        self.repository.list_holdings().await
    }

    async fn all_positions(&self) -> Result<Vec<Position>, PortfolioError> {
        self.repository.list_positions().await
    }
}
