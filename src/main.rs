use anyhow::Result;
use clap::Parser;

use langassist::assistant::print_languages;
use langassist::cli::commands::{ask, chat, configure, providers, serve};
use langassist::cli::{Args, Command};
use langassist::{logging, output};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    output::init(output::OutputConfig::from_flags(
        args.global.quiet,
        args.global.no_color,
    ));
    let base_level = if matches!(args.command, Some(Command::Serve { .. })) {
        "info"
    } else {
        "warn"
    };
    logging::init(args.global.verbose, base_level, output::is_no_color());

    match args.command {
        Some(Command::Languages) => print_languages(),
        Some(Command::Providers { provider }) => {
            providers::print_providers(provider.as_deref())?;
        }
        Some(Command::Configure) => configure::run_configure()?,
        Some(Command::Chat { session }) => chat::run_chat(session.into()).await?,
        Some(Command::Serve {
            bind,
            provider,
            model,
        }) => {
            serve::run_serve(serve::ServeOptions {
                bind,
                provider,
                model,
            })
            .await?;
        }
        None => {
            let options = ask::AskOptions {
                topic: args.topic,
                resolve: args.session.into(),
                output: args.output,
                copy: args.copy,
            };
            if ask::run_ask(options).await? == ask::AskStatus::NeedsTopic {
                std::process::exit(exitcode::DATAERR);
            }
        }
    }

    Ok(())
}
