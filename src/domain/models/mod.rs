mod chat_message;
mod chat_thread;
mod completion;
mod prompt_context;

pub use chat_message::*;
pub use chat_thread::*;
pub use completion::*;
pub use prompt_context::*;
