//! Back-office JSON API: configuration, shared state, the axum router and
//! the demo seed.

pub mod config;
pub mod http;
pub mod routes;
pub mod seed;
pub mod state;
