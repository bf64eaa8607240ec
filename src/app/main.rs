//! `kobun` command line client
//!
//! Thin front end over `SessionStore` and `ApiClient`: the session is
//! persisted between invocations, so `kobun login` once and the other
//! commands reuse the token until it expires or the backend rejects it.

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use thiserror::Error;

use kobun_vocab::app::{
    init_tracing, ApiClient, ApiError, Config, FileStorage, RegisterRequest, SessionStore,
};
use kobun_vocab::shared::{ConfigError, ListId};

#[derive(Debug, Parser)]
#[command(name = "kobun", version, about = "Kobun vocabulary trainer client")]
struct Cli {
    /// Backend base URL (overrides the config file and KOBUN_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the persisted session
    Status,
    /// Log in and persist the session
    Login {
        /// Email or username
        identifier: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and log in with it
    Register {
        username: String,
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        full_name: Option<String>,
    },
    /// Forget the persisted session
    Logout,
    /// List word lists
    Lists,
    /// List the words of one list
    Words { list_id: ListId },
    /// Show learning statistics
    Stats,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("{}", .0.user_message())]
    Api(#[from] ApiError),
}

fn load_config(api_url: Option<String>) -> Result<Config, CliError> {
    let config = Config::load()?;
    match api_url {
        Some(url) => Ok(config.with_api_url(&url)?),
        None => Ok(config),
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.api_url)?;
    let session = Arc::new(SessionStore::new(Arc::new(FileStorage::new(
        config.storage_dir(),
    ))));
    let restored = session.initialize();
    let api = ApiClient::new(config, Arc::clone(&session))?
        .with_unauthorized_handler(|| eprintln!("Session expired. Run `kobun login` again."));

    match cli.command {
        Command::Status => match restored.user {
            Some(user) if restored.token.is_some() => {
                println!("Logged in as {} ({})", user.display_name(), user.id)
            }
            _ => println!("Not logged in"),
        },
        Command::Login {
            identifier,
            password,
        } => {
            let session = session.login(&api, &identifier, &password).await?;
            let name = session.user.map(|u| u.display_name()).unwrap_or_default();
            println!("Logged in as {}", name);
        }
        Command::Register {
            username,
            email,
            password,
            full_name,
        } => {
            let mut request = RegisterRequest::new(username, email, password);
            if let Some(full_name) = full_name {
                request = request.with_full_name(full_name);
            }
            let session = session.register(&api, &request).await?;
            let name = session.user.map(|u| u.display_name()).unwrap_or_default();
            println!("Registered and logged in as {}", name);
        }
        Command::Logout => {
            session.logout();
            println!("Logged out");
        }
        Command::Lists => {
            for list in api.word_lists().await? {
                println!("{:>6}  {} ({} words)", list.id, list.name, list.word_count);
            }
        }
        Command::Words { list_id } => {
            for word in api.list_words(list_id).await? {
                let readings = word.readings.join(", ");
                println!(
                    "{:>6}  {}  [{}]  {}",
                    word.id, word.kobun_text, readings, word.english_translation
                );
            }
        }
        Command::Stats => {
            let stats = api.user_stats().await?;
            let totals = stats.totals;
            println!("Lists:     {}", totals.lists.unwrap_or(0));
            println!("Words:     {}", totals.words.unwrap_or(0));
            println!("Due today: {}", totals.due_today.unwrap_or(0));
            println!("Reviews:   {}", totals.reviews.unwrap_or(0));
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("[APP] Command failed: {:?}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
