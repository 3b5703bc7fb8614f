use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "docent")]
#[command(about = "Ask a robotics textbook's assistant about what you are reading")]
#[command(version)]
pub struct Args {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress status lines and spinners
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Where to reach the assistant service. Shared by every command that talks to it.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct EndpointArgs {
    /// Deployment environment name (e.g. development, production)
    #[arg(short = 'e', long = "env")]
    pub env: Option<String>,

    /// API base URL, bypassing the environment lookup
    #[arg(long)]
    pub api_url: Option<String>,

    /// Request timeout in seconds (0 disables it)
    #[arg(long)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive chat with the assistant (the default)
    Chat {
        /// Preferred answer language (en, pashto, dari)
        #[arg(short = 't', long = "to")]
        to: Option<String>,

        #[command(flatten)]
        endpoint: EndpointArgs,
    },
    /// Ask a single question and print the answer
    Ask {
        /// The question to ask
        question: String,

        /// Passage the question is about
        #[arg(short = 's', long, conflicts_with = "selection_file")]
        selection: Option<String>,

        /// Read the passage from a file ('-' for stdin)
        #[arg(short = 'f', long)]
        selection_file: Option<String>,

        /// Also translate the answer into this language (pashto, dari).
        /// Defaults to the configured language; `--to en` skips translation
        #[arg(short = 't', long = "to")]
        to: Option<String>,

        #[command(flatten)]
        endpoint: EndpointArgs,
    },
    /// List supported answer languages
    Languages,
    /// List configured environments
    Environments {
        /// Show details for one environment
        name: Option<String>,
    },
    /// Configure default environment and language
    Configure,
    /// Check that the assistant service is reachable
    Status {
        #[command(flatten)]
        endpoint: EndpointArgs,
    },
}
