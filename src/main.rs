use anyhow::Result;
use clap::Parser;

use docent_cli::assistant::{print_languages, validate_language};
use docent_cli::cli::commands::{ask, chat, configure, environments, status};
use docent_cli::cli::{Args, Command, EndpointArgs};
use docent_cli::{logging, output};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let defaults = output::OutputConfig::default();
    output::init(output::OutputConfig {
        quiet: args.quiet,
        no_color: args.no_color || defaults.no_color,
    });
    logging::init(args.verbose);

    match args.command {
        Some(Command::Languages) => {
            print_languages();
        }
        Some(Command::Environments { name }) => {
            environments::print_environments(name.as_deref())?;
        }
        Some(Command::Configure) => {
            configure::run_configure()?;
        }
        Some(Command::Status { endpoint }) => {
            status::run_status(&endpoint).await?;
        }
        Some(Command::Ask {
            question,
            selection,
            selection_file,
            to,
            endpoint,
        }) => {
            if let Some(ref lang) = to {
                validate_language(lang)?;
            }

            let options = ask::AskOptions {
                question,
                selection,
                selection_file,
                to,
                endpoint,
            };
            ask::run_ask(options).await?;
        }
        Some(Command::Chat { to, endpoint }) => {
            if let Some(ref lang) = to {
                validate_language(lang)?;
            }

            chat::run_chat(chat::ChatOptions { to, endpoint }).await?;
        }
        None => {
            let options = chat::ChatOptions {
                to: None,
                endpoint: EndpointArgs::default(),
            };
            chat::run_chat(options).await?;
        }
    }

    Ok(())
}
