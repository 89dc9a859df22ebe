use clap::{Parser, Subcommand};

/// Conveyor — CI/CD pipeline API server
#[derive(Parser)]
#[command(name = "conveyor", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Port to bind
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}
