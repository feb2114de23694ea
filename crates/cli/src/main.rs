//! Favourites CLI - Database migrations and user management.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! fav-cli migrate
//!
//! # Create a user (password read from FAVOURITES_USER_PASSWORD)
//! fav-cli user create -u alice -f "Alice Liddell" -r admin
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `user create` - Register a user without going through HTTP

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "fav-cli")]
#[command(author, version, about = "Favourites API CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Login name (case-sensitive)
        #[arg(short, long)]
        user_name: String,

        /// Display name
        #[arg(short, long)]
        full_name: Option<String>,

        /// Role label (defaults to `user`)
        #[arg(short, long)]
        role: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::User { action } => match action {
            UserAction::Create {
                user_name,
                full_name,
                role,
            } => {
                commands::user::create(user_name, full_name, role).await?;
            }
        },
    }
    Ok(())
}
