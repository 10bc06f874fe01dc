//! # Marketdesk API Client
//!
//! Client for the marketplace backend's REST API: bearer auth, response
//! envelope unwrapping, error normalization, and one service module per
//! domain.
//!
//! ## Example
//!
//! ```no_run
//! use marketdesk_client::{ApiClient, ClientConfig};
//! use marketdesk_client::services::orders::{self, OrderQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(&ClientConfig::from_env())?;
//!
//!     let query = OrderQuery {
//!         status: Some("PENDING".to_string()),
//!         page: Some(1),
//!         ..OrderQuery::default()
//!     };
//!     let orders = orders::list_orders(&client, &query).await?;
//!
//!     println!("{orders}");
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod services;
pub mod token;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use token::{NoToken, SharedToken, StaticToken, TokenProvider};
