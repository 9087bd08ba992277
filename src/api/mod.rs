//! HTTP surface: middleware and route handlers

pub mod middleware;
pub mod services;
