mod chat_transport;
mod completion_service;

pub use chat_transport::*;
pub use completion_service::*;
