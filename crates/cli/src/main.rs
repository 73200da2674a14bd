//! Lumen CLI - drive the storefront view-models from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart with totals
//! lumen cart show
//!
//! # Put three of a product into the cart (0 removes it)
//! lumen cart set 64f1c2 3
//!
//! # Move a favorite into the cart
//! lumen favorites to-cart 64f1c2 --count 2
//!
//! # Place a pickup order paid online
//! lumen order place --delivery pickup --first-name Anna --last-name Petrova \
//!     --phone +79990001122 --email anna@lumen.shop --payment card-online
//! ```
//!
//! # Environment Variables
//!
//! - `LUMEN_API_URL` - backend base URL (required)
//! - `LUMEN_ACCESS_TOKEN` - customer access token; favorites and the profile
//!   need one
//! - `SENTRY_DSN` - enables error reporting

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;

use clap::{Args, Parser, Subcommand};
use lumen_core::{DeliveryType, PaymentType, ProductId};
use lumen_storefront::config::StorefrontConfig;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod terminal;

use commands::{CliError, Context};

#[derive(Parser)]
#[command(name = "lumen")]
#[command(author, version, about = "Lumen storefront from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage favorite products
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Check out
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// View and edit the saved profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Set the quantity of a product; 0 removes it
    Set {
        /// Product id
        product_id: String,
        /// Absolute quantity
        quantity: u32,
    },
    /// Show the header badge count
    Count,
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List favorites with their cart quantities
    List,
    /// Add a product to favorites
    Add {
        /// Product id
        product_id: String,
    },
    /// Remove a product from favorites
    Remove {
        /// Product id
        product_id: String,
    },
    /// Put a favorite into the cart
    ToCart {
        /// Product id
        product_id: String,
        /// Quantity to put into the cart
        #[arg(short, long)]
        count: Option<u32>,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// Validate and submit an order for the current cart
    Place(OrderArgs),
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show the saved profile
    Show,
    /// Update the saved profile; omitted fields keep their saved value
    Save(ProfileArgs),
}

/// Contact and address fields shared by checkout and the profile.
#[derive(Args, Debug, Default)]
pub struct ContactArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub father_name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub street: Option<String>,
    #[arg(long)]
    pub house: Option<String>,
    #[arg(long)]
    pub entrance: Option<String>,
    #[arg(long)]
    pub apartment: Option<String>,
    /// `card-online`, `card-to-courier` or `cash-to-courier`
    #[arg(long)]
    pub payment: Option<PaymentType>,
}

#[derive(Args, Debug, Default)]
pub struct OrderArgs {
    /// `delivery` or `pickup`; defaults to the saved profile's choice
    #[arg(long)]
    pub delivery: Option<DeliveryType>,
    #[command(flatten)]
    pub contact: ContactArgs,
    /// Free-text note for the order
    #[arg(long)]
    pub comment: Option<String>,
}

#[derive(Args, Debug)]
pub struct ProfileArgs {
    /// `delivery` or `pickup`
    #[arg(long)]
    pub delivery: Option<DeliveryType>,
    #[command(flatten)]
    pub contact: ContactArgs,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
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
        tracing::Level::TRACE => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            let _ = writeln!(std::io::stderr(), "Configuration error: {e}");
            std::process::exit(2);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "lumen_storefront=info,lumen_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result = match Context::new(config) {
        Ok(ctx) => run(&ctx, cli).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(ctx: &Context, cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(ctx).await,
            CartAction::Set {
                product_id,
                quantity,
            } => commands::cart::set(ctx, &ProductId::new(product_id), quantity).await,
            CartAction::Count => commands::cart::count(ctx).await,
        },
        Commands::Favorites { action } => match action {
            FavoritesAction::List => commands::favorites::list(ctx).await,
            FavoritesAction::Add { product_id } => {
                commands::favorites::add(ctx, &ProductId::new(product_id)).await
            }
            FavoritesAction::Remove { product_id } => {
                commands::favorites::remove(ctx, &ProductId::new(product_id)).await
            }
            FavoritesAction::ToCart { product_id, count } => {
                commands::favorites::to_cart(ctx, &ProductId::new(product_id), count).await
            }
        },
        Commands::Order { action } => match action {
            OrderAction::Place(args) => commands::order::place(ctx, args).await,
        },
        Commands::Profile { action } => match action {
            ProfileAction::Show => commands::profile::show(ctx).await,
            ProfileAction::Save(args) => commands::profile::save(ctx, args).await,
        },
    }
}
