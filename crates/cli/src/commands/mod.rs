//! Command implementations.
//!
//! Every command builds the view-models it needs from a shared [`Context`],
//! runs one action and prints the resulting state to stdout. Notices and
//! dialogs are shown by [`TerminalUi`].

pub mod cart;
pub mod favorites;
pub mod order;
pub mod profile;

use std::sync::Arc;

use lumen_core::ProductId;
use lumen_storefront::api::HttpBackend;
use lumen_storefront::config::{ConfigError, StorefrontConfig};
use lumen_storefront::error::ClientError;
use lumen_storefront::form::Field;
use lumen_storefront::session::AuthState;
use lumen_storefront::ui::{AssetResolver, Ui};
use lumen_storefront::viewmodels::{CartViewModel, FavoritesViewModel};
use thiserror::Error;

use crate::terminal::TerminalUi;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A storefront action failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The product is not on the favorites list.
    #[error("Product {0} is not a favorite")]
    NotFavorite(ProductId),

    /// Writing to the terminal failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Collaborators shared by all commands.
pub struct Context {
    pub backend: HttpBackend,
    pub auth: AuthState,
    pub ui: Ui,
    pub assets: AssetResolver,
    pub cart: Arc<CartViewModel<HttpBackend>>,
}

impl Context {
    /// Build the backend client and view-models for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: StorefrontConfig) -> Result<Self, CliError> {
        let backend = HttpBackend::new(&config)?;
        let auth = AuthState::new(config.is_authenticated());
        let terminal = Arc::new(TerminalUi);
        let ui = Ui::new(terminal.clone(), terminal.clone(), terminal);
        let cart = Arc::new(CartViewModel::new(backend.clone(), ui.clone()));

        tracing::debug!(
            api_url = %config.api_url,
            authenticated = auth.is_authenticated(),
            "Storefront client ready"
        );

        Ok(Self {
            backend,
            auth,
            ui,
            assets: AssetResolver::new(config.static_url),
            cart,
        })
    }

    pub fn favorites(&self) -> FavoritesViewModel<HttpBackend> {
        FavoritesViewModel::new(self.backend.clone(), self.cart.clone(), self.ui.clone())
    }
}

/// Stop a command that needs a customer session, showing `notice` to guests.
fn require_sign_in(ctx: &Context, notice: &str) -> Result<(), CliError> {
    if ctx.auth.is_authenticated() {
        return Ok(());
    }
    ctx.ui.notify(notice);
    Err(ClientError::Unauthenticated.into())
}

/// Overwrite each field that was given a value on the command line.
fn fill_fields<const N: usize>(fields: [(&mut Field, Option<String>); N]) {
    for (field, value) in fields {
        if let Some(value) = value {
            field.set_value(value);
        }
    }
}
