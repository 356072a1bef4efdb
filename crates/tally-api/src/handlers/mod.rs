//! HTTP handlers.

pub mod ask;
pub mod health;

pub use ask::{ask, AnswerResponse};
pub use health::{health, HealthResponse};
