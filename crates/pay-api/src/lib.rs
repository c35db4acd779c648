//! # pay-api
//!
//! HTTP API layer for ns-lightning.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Invoice creation (payment intent + Lightning swap + QR code)
//! - Ranked merchant listing
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/create-invoice` | Create Lightning invoice for a merchant payment |
//! | GET | `/api/merchants` | List merchants |

pub mod handlers;
pub mod qr;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState, Providers};
