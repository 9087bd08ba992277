//! LessonLinker - lesson distribution backend
//!
//! Schools and lessons are managed through a JSON API; short tracking links
//! resolve to the matching lesson's slides and every click is recorded for
//! analytics.
//!
//! # Architecture
//! - `storage`: SeaORM backend, entities and domain models
//! - `services`: business logic (lessons, links, clicks, analytics, chat)
//! - `api`: HTTP handlers and middleware
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and server mode
//! - `system`: Logging setup

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
