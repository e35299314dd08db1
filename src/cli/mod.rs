use clap::Subcommand;

use crate::connector::DEFAULT_CHAT_URL;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the chat HTTP endpoint
    Serve {
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the server on all network interfaces
        #[arg(long)]
        public: bool,
    },

    /// Send one question to a running chat endpoint and print the reply
    Ask {
        message: String,

        #[arg(short, long, default_value = DEFAULT_CHAT_URL)]
        url: String,
    },

    /// Interactive chat session against a running chat endpoint
    Chat {
        #[arg(short, long, default_value = DEFAULT_CHAT_URL)]
        url: String,
    },

    /// Print the prompt a question would produce, without calling a provider
    Prompt { message: String },
}
