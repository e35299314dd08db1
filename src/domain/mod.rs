//! # Domain Layer
//!
//! Chat models, the error taxonomy and prompt assembly.
//! This layer is independent of HTTP frameworks and provider SDKs.

pub mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
