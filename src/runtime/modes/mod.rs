//! Mode routing
//!
//! Only the HTTP server mode exists; the binary's subcommands are
//! handled in `cli` before reaching here.

pub mod server;

pub use server::{build_cors_middleware, configure_app, run_server};
