use anyhow::Result;
use clap::{Parser, Subcommand};
use slashprompt::{autocomplete, config, manage::Manager, resolver, PromptStore};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "slashprompt")]
#[command(about = "Manage prompt templates and expand /commands in chat input")]
#[command(version)]
struct Args {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Prompts file to use instead of the configured one
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Create a new prompt
    Create {
        #[arg(long)]
        title: String,
        /// Slash command, with or without the leading `/`
        #[arg(long)]
        command: String,
        /// Prompt text; use {input} where the typed text should go
        #[arg(long)]
        content: String,
    },
    /// Update an existing prompt; omitted fields keep their current value
    Update {
        /// Title of the prompt to update
        selected: String,
        /// New title (renames the prompt)
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        command: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Delete a prompt by title
    Delete { title: String },
    /// List prompt titles
    List,
    /// Show one prompt as JSON
    Show { title: String },
    /// List available commands
    Commands,
    /// Print the autocomplete feed as JSON
    Feed,
    /// Show commands matching a filter
    Suggest {
        #[arg(default_value = "")]
        filter: String,
    },
    /// Resolve a single chat message
    Resolve {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Resolve each line read from stdin
    Chat,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slashprompt=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    // Load configuration
    let config = match &args.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config()?,
    };

    let store_path = args
        .store
        .clone()
        .unwrap_or_else(|| config.store.resolved_path());
    let mut store = PromptStore::load(store_path, config.identity.creator.clone())?;

    match args.action {
        Action::Create {
            title,
            command,
            content,
        } => {
            let status = Manager::new(&mut store).create(&title, &command, &content);
            report(status)?;
        }
        Action::Update {
            selected,
            title,
            command,
            content,
        } => {
            let mut manager = Manager::new(&mut store);
            let (current_title, current_command, current_content) =
                manager.load_details(&selected);
            let status = manager.update(
                &selected,
                &title.unwrap_or(current_title),
                &command.unwrap_or(current_command),
                &content.unwrap_or(current_content),
            );
            report(status)?;
        }
        Action::Delete { title } => {
            let status = Manager::new(&mut store).delete(&title);
            report(status)?;
        }
        Action::List => {
            for title in store.list() {
                println!("{}", title);
            }
        }
        Action::Show { title } => match store.get(&title) {
            Some(prompt) => println!("{}", serde_json::to_string_pretty(prompt)?),
            None => anyhow::bail!("No prompt titled '{}'", title),
        },
        Action::Commands => {
            println!("{}", autocomplete::available_commands(store.prompts()));
        }
        Action::Feed => {
            println!("{}", autocomplete::feed(store.prompts()).to_json()?);
        }
        Action::Suggest { filter } => {
            let feed = autocomplete::feed(store.prompts());
            let filter = filter.strip_prefix('/').unwrap_or(&filter);
            for entry in autocomplete::suggest(&feed, filter, &config.autocomplete) {
                println!("{}\t{}", entry.command, entry.title);
            }
        }
        Action::Resolve { text } => {
            let resolution = resolver::resolve(&text.join(" "), store.prompts());
            println!("{}", resolution.text);
        }
        Action::Chat => {
            let stdin = io::stdin();
            let mut stdout = io::stdout().lock();
            for line in stdin.lock().lines() {
                let line = line?;
                let (text, _) = resolver::modify_chat_input(&line, &line, store.prompts());
                writeln!(stdout, "{}", text)?;
                stdout.flush()?;
            }
        }
    }

    Ok(())
}

/// Print a management status and fail the process on error
fn report(status: slashprompt::manage::Status) -> Result<()> {
    if !status.ok {
        anyhow::bail!("{}", status.message);
    }
    println!("{}", status.message);
    Ok(())
}
