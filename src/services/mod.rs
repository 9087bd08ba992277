//! Service layer for business logic
//!
//! Services own validation and orchestration; the HTTP handlers only
//! translate requests and map errors.

mod analytics_service;
pub mod chat;
mod click_recorder;
pub mod device_classifier;
mod lesson_service;
mod link_service;
mod school_service;
pub mod validation;

pub use analytics_service::*;
pub use chat::{ChatInput, ChatReply, ChatService, CompletionClient, GeminiClient};
pub use click_recorder::ClickRecorder;
pub use device_classifier::{DeviceClassifier, DeviceType, WootheeClassifier};
pub use lesson_service::*;
pub use link_service::*;
pub use school_service::*;
pub use validation::NumberInput;
