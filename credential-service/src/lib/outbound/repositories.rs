pub mod credential;
pub mod memory;
pub mod portfolio;

pub use credential::PostgresCredentialStore;
pub use memory::InMemoryCredentialStore;
pub use memory::InMemoryPortfolioRepository;
pub use portfolio::PostgresPortfolioRepository;
