//! Windspire CLI - command-line access to the boat registry

mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Context, Result, eyre};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use windspire_lib::{ApiClient, ClientConfig, FileTokenStore};

#[derive(Parser)]
#[command(name = "windspire")]
#[command(about = "Manage boats, owners and sessions in the Windspire registry", long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    log_verbosity: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// API base URL [default: $WINDSPIRE_API_BASE_URL or http://localhost:8080/api]
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// File holding the session token [default: <config dir>/windspire/windspire_token]
    #[arg(long, global = true, value_name = "PATH")]
    token_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Registered boats and their owners
    #[command(subcommand)]
    Boats(BoatsCommand),

    /// Registered users
    #[command(subcommand)]
    Users(UsersCommand),

    /// Country reference data
    #[command(subcommand)]
    Countries(CountriesCommand),

    /// Sign in, sign out and inspect the session
    #[command(subcommand)]
    Auth(AuthCommand),
}

#[derive(Args)]
struct PageArgs {
    /// Page number, starting at 1
    #[arg(long)]
    page: Option<u32>,

    /// Items per page
    #[arg(long)]
    limit: Option<u32>,
}

#[derive(Args)]
struct BoatFields {
    /// Boat name
    #[arg(long)]
    name: String,

    /// Country id the boat is registered in
    #[arg(long, value_name = "ID")]
    country_id: String,

    #[arg(long)]
    brand: Option<String>,

    #[arg(long)]
    model: Option<String>,

    #[arg(long)]
    sail_number: Option<String>,
}

#[derive(Subcommand)]
enum BoatsCommand {
    /// List boats with their owners
    List(PageArgs),
    /// List the signed-in user's boats
    Mine,
    /// Show one boat
    Get { id: String },
    /// Register a new boat
    Create(BoatFields),
    /// Replace a boat's details
    Update {
        id: String,
        #[command(flatten)]
        fields: BoatFields,
    },
    /// Delete a boat
    Delete { id: String },
    /// Add a co-owner to a boat
    AddOwner { boat_id: String, owner_id: String },
    /// Remove an owner from a boat
    RemoveOwner { boat_id: String, owner_id: String },
}

#[derive(Subcommand)]
enum UsersCommand {
    /// List users
    List(PageArgs),
    /// Show one user
    Get { id: String },
    /// Find users by name or email
    Search {
        /// Case-insensitive text matched against first name, last name and email
        query: String,
    },
}

#[derive(Subcommand)]
enum CountriesCommand {
    /// List all countries
    List,
    /// Show a country by id
    Get { id: String },
    /// Show a country by ISO code
    Code { code: String },
}

#[derive(Subcommand)]
enum AuthCommand {
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account, then sign in
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Display name for the new account
        #[arg(long)]
        name: Option<String>,
    },
    /// Email a password-reset link
    ResetPassword {
        #[arg(long)]
        email: String,
    },
    /// Show the signed-in user
    Whoami,
    /// Replace the session token with a fresh one
    Refresh,
    /// Forget the session token
    Logout,
    /// Report whether a session token is stored
    Status,
}

/// Initialize tracing subscriber based on verbosity and output format
fn init_tracing(verbose: u8, json: bool) {
    // RUST_LOG wins over -v flags
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,windspire_lib=info,windspire=info".to_string(),
            2 => "info,windspire_lib=debug,windspire=debug".to_string(),
            _ => "debug,windspire_lib=trace,windspire=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

fn build_client(base_url: Option<String>, token_file: Option<PathBuf>) -> Result<ApiClient> {
    let mut config = ClientConfig::from_env().wrap_err("Invalid client configuration")?;
    if let Some(url) = base_url {
        config.base_url = url;
    }

    let token_path = token_file
        .or_else(FileTokenStore::default_location)
        .ok_or_else(|| eyre!("No configuration directory found; pass --token-file"))?;
    tracing::debug!(path = %token_path.display(), "Using token file");

    ApiClient::builder_from(&config)
        .token_store(Arc::new(FileTokenStore::new(token_path)))
        .build()
        .wrap_err_with(|| format!("Cannot create client for {}", config.base_url))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_verbosity, cli.json_logs);

    let client = build_client(cli.base_url, cli.token_file)?;
    tracing::debug!(base_url = client.base_url(), "Windspire CLI starting");

    match cli.command {
        Commands::Boats(command) => commands::boats(&client, command).await,
        Commands::Users(command) => commands::users(&client, command).await,
        Commands::Countries(command) => commands::countries(&client, command).await,
        Commands::Auth(command) => commands::auth(&client, command).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clap_requires_a_command() {
        assert!(Cli::try_parse_from(["windspire"]).is_err());
    }

    #[test]
    fn test_clap_accepts_global_flags_after_command() {
        let cli = Cli::try_parse_from([
            "windspire",
            "boats",
            "list",
            "--limit",
            "5",
            "-vv",
            "--base-url",
            "https://registry.example.com/api",
        ])
        .unwrap();

        assert_eq!(cli.log_verbosity, 2);
        assert_eq!(cli.base_url.as_deref(), Some("https://registry.example.com/api"));
        match cli.command {
            Commands::Boats(BoatsCommand::List(page)) => {
                assert_eq!(page.page, None);
                assert_eq!(page.limit, Some(5));
            }
            _ => panic!("expected boats list"),
        }
    }

    #[test]
    fn test_clap_boat_create_requires_name_and_country() {
        assert!(Cli::try_parse_from(["windspire", "boats", "create", "--name", "Aurora"]).is_err());

        let cli = Cli::try_parse_from([
            "windspire",
            "boats",
            "create",
            "--name",
            "Aurora",
            "--country-id",
            "c-se",
            "--sail-number",
            "SWE 9",
        ])
        .unwrap();
        match cli.command {
            Commands::Boats(BoatsCommand::Create(fields)) => {
                assert_eq!(fields.country_id, "c-se");
                assert_eq!(fields.sail_number.as_deref(), Some("SWE 9"));
            }
            _ => panic!("expected boats create"),
        }
    }

    #[test]
    fn test_clap_auth_signup_name_is_optional() {
        let cli = Cli::try_parse_from([
            "windspire",
            "auth",
            "signup",
            "--email",
            "jane@example.com",
            "--password",
            "hunter22",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Auth(AuthCommand::Signup { name: None, .. })
        ));
    }

    #[test]
    fn test_clap_owner_commands_take_two_ids() {
        let cli =
            Cli::try_parse_from(["windspire", "boats", "remove-owner", "b-1", "u-2"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Boats(BoatsCommand::RemoveOwner { ref boat_id, ref owner_id })
                if boat_id == "b-1" && owner_id == "u-2"
        ));
    }
}
