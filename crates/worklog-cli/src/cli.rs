use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wl")]
#[command(about = "AI-powered Jira time logging", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure Jira connection and AI provider
    Setup,

    /// Parse free text with AI and log the result
    #[command(alias = "q")]
    Quick {
        /// Free-text description of the work done (quote it)
        #[arg(required = true)]
        input: Vec<String>,
    },

    /// Manage and run entry templates
    #[command(alias = "t")]
    Template,

    /// Manage phrase-to-task aliases
    #[command(alias = "a")]
    Alias,

    /// Show recently logged tasks
    Stats,
}
