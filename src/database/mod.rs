pub mod manager;
pub mod models;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use models::{Portfolio, PortfolioDraft, PORTFOLIO_ID};
pub use repository::{CredentialStore, PortfolioRepository};
