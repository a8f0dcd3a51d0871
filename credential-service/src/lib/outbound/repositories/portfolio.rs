use async_trait::async_trait;
use sqlx::PgPool;

use crate::portfolio::errors::PortfolioError;
use crate::portfolio::models::Holding;
use crate::portfolio::models::Position;
use crate::portfolio::ports::PortfolioRepository;

pub struct PostgresPortfolioRepository {
    pool: PgPool,
}

impl PostgresPortfolioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct HoldingRow {
    name: String,
    qty: i32,
    avg: f64,
    price: f64,
    net: String,
    day: String,
}

impl From<HoldingRow> for Holding {
    fn from(r: HoldingRow) -> Self {
        Self {
            name: r.name,
            qty: r.qty,
            avg: r.avg,
            price: r.price,
            net: r.net,
            day: r.day,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PositionRow {
    product: String,
    name: String,
    qty: i32,
    avg: f64,
    price: f64,
    net: String,
    day: String,
    is_loss: bool,
}

impl From<PositionRow> for Position {
    fn from(r: PositionRow) -> Self {
        Self {
            product: r.product,
            name: r.name,
            qty: r.qty,
            avg: r.avg,
            price: r.price,
            net: r.net,
            day: r.day,
            is_loss: r.is_loss,
        }
    }
}

#[async_trait]
impl PortfolioRepository for PostgresPortfolioRepository {
    async fn list_holdings(&self) -> Result<Vec<Holding>, PortfolioError> {
        let rows = sqlx::query_as::<_, HoldingRow>(
            r#"
            SELECT name, qty, avg, price, net, day
            FROM holdings
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortfolioError::Storage(e.to_string()))?;

        Ok(rows.into_iter().map(Holding::from).collect())
    }

    async fn list_positions(&self) -> Result<Vec<Position>, PortfolioError> {
        let rows = sqlx::query_as::<_, PositionRow>(
            r#"
            SELECT product, name, qty, avg, price, net, day, is_loss
            FROM positions
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortfolioError::Storage(e.to_string()))?;

        Ok(rows.into_iter().map(Position::from).collect())
    }
}
