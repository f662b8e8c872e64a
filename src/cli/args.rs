use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ResolveOptions;

#[derive(Parser, Debug)]
#[command(name = "langassist")]
#[command(about = "Streaming language assistant: explanations of a topic across languages")]
#[command(version)]
pub struct Args {
    /// Topic to explain (reads from stdin if not provided)
    pub topic: Option<String>,

    #[command(flatten)]
    pub session: SessionArgs,

    /// Also write the answer to this file
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Copy the answer to the clipboard when it finishes
    #[arg(long)]
    pub copy: bool,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Flags shared by every command.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Suppress status output (answers and errors are still printed)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Options that pick languages and where prompts are sent.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Language the topic is about (code or name, e.g. es, French)
    #[arg(short = 'f', long = "from")]
    pub from: Option<String>,

    /// Language of the answer (code or name, e.g. en, Japanese)
    #[arg(short = 't', long = "to")]
    pub to: Option<String>,

    /// Provider name from the config file
    #[arg(short = 'p', long)]
    pub provider: Option<String>,

    /// Model name
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Generation endpoint URL (e.g. http://127.0.0.1:3000/api/generate)
    #[arg(short = 'e', long)]
    pub endpoint: Option<String>,
}

impl From<SessionArgs> for ResolveOptions {
    fn from(args: SessionArgs) -> Self {
        Self {
            provider: args.provider,
            model: args.model,
            from: args.from,
            to: args.to,
            endpoint: args.endpoint,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive session: ask about topic after topic
    Chat {
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Run the local generation endpoint (POST /api/generate)
    Serve {
        /// Address to listen on (default 127.0.0.1:3000)
        #[arg(short = 'b', long)]
        bind: Option<String>,

        /// Provider name from the config file
        #[arg(short = 'p', long)]
        provider: Option<String>,

        /// Model name
        #[arg(short = 'm', long)]
        model: Option<String>,
    },
    /// Set default provider, model and languages
    Configure,
    /// List supported languages
    Languages,
    /// List configured providers
    Providers {
        /// Show details for one provider
        provider: Option<String>,
    },
}
