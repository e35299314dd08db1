mod anthropic_client;
mod groq_client;
mod http_chat_transport;
mod mock_completion;
mod ollama_client;

pub use anthropic_client::*;
pub use groq_client::*;
pub use http_chat_transport::*;
pub use mock_completion::*;
pub use ollama_client::*;
