//! HTTP surface for the Curator metadata capture service.
//!
//! A thin axum shell over the core: the capture endpoint plus the CRUD
//! contract points on drafts. All state and algorithms live in the core
//! crates; handlers only translate between HTTP and the store/service
//! outcomes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod config;
mod observability;

pub use api::{create_router, ApiState};
pub use config::ServerConfig;
pub use observability::init_tracing;
