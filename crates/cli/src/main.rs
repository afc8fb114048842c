//! Sole Supply CLI - storefront shell.
//!
//! # Usage
//!
//! ```bash
//! # Browse one page of the trending listing
//! sole trending --page 1 --limit 8
//!
//! # Show a product detail (walks the fallback chain if needed)
//! sole product air-jordan-1-retro-high-og
//!
//! # Manage the persisted cart
//! sole cart add air-jordan-1-retro-high-og
//! sole cart list
//! sole cart remove air-jordan-1-retro-high-og
//! sole cart clear
//!
//! # Session management
//! sole account login -e user@example.com -p hunter2
//! sole account status
//! sole account logout
//! ```
//!
//! # Commands
//!
//! - `trending` - Fetch a page of the trending product listing
//! - `product` - Resolve a single product detail
//! - `cart` - Add/remove/list/clear the persisted cart
//! - `account` - Login, logout, and session status

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sole_supply_storefront::config::StorefrontConfig;
use sole_supply_storefront::error::AppError;
use sole_supply_storefront::state::AppContext;

mod commands;

#[derive(Parser)]
#[command(name = "sole")]
#[command(author, version, about = "Sole Supply storefront shell")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a page of the trending product listing
    Trending {
        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Items per page
        #[arg(long, default_value_t = 8)]
        limit: u32,
    },
    /// Resolve a single product detail
    Product {
        /// Product identity
        id: String,
    },
    /// Manage the persisted cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the login session
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Resolve a product and add it to the cart
    Add {
        /// Product identity
        id: String,
    },
    /// Remove a product from the cart
    Remove {
        /// Product identity
        id: String,
    },
    /// List cart contents with the running total
    List,
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum AccountAction {
    /// Sign in with email and password
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the current session
    Status,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Initialize tracing with EnvFilter and Sentry integration
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sole_supply_storefront=info,sole=info,info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli, config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), AppError> {
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Trending { page, limit } => commands::browse::trending(&ctx, page, limit).await,
        Commands::Product { id } => commands::browse::product(&ctx, &id).await,
        Commands::Cart { action } => match action {
            CartAction::Add { id } => commands::cart::add(&ctx, &id).await,
            CartAction::Remove { id } => commands::cart::remove(&ctx, &id),
            CartAction::List => commands::cart::list(&ctx),
            CartAction::Clear => commands::cart::clear(&ctx),
        },
        Commands::Account { action } => match action {
            AccountAction::Login { email, password } => {
                commands::account::login(&ctx, &email, &password)
            }
            AccountAction::Logout => commands::account::logout(&ctx),
            AccountAction::Status => commands::account::status(&ctx).await,
        },
    }
}
