use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "scout", version, about = "Scout web-search chat agent", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Override the config file path globally
    #[arg(short, long, global = true, default_value = "config.yaml")]
    pub config: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server and browser chat page
    Serve,

    /// Enter interactive terminal chat against a running server
    Chat {
        /// Base URL of the server
        #[arg(short, long, default_value = "http://127.0.0.1:3000")]
        url: String,
    },

    /// Ask a single question and print the answer
    Ask {
        /// The question to send
        input: String,

        /// Base URL of the server
        #[arg(short, long, default_value = "http://127.0.0.1:3000")]
        url: String,
    },
}
