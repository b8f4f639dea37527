//! Smart study assistant HTTP server.
//!
//! Exposes `GET /study`, which looks up an encyclopedia summary for a topic
//! and turns it into study material, and `GET /health`.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
