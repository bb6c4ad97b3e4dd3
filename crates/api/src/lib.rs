//! HTTP layer for The Sephirots community platform.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod payments;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
