//! Live-backend tests for the Lumen storefront client.
//!
//! # Running Tests
//!
//! ```bash
//! # Point the tests at a running backend
//! export LUMEN_TEST_API_URL=http://localhost:3000/api/
//! export LUMEN_TEST_PRODUCT_ID=<id of an in-stock product>
//!
//! # Favorites and profile tests also need a customer token
//! export LUMEN_TEST_ACCESS_TOKEN=<token>
//!
//! cargo test -p lumen-integration-tests -- --ignored
//! ```
//!
//! Every test builds its own [`TestContext`], so each one starts with a fresh
//! cookie store and therefore a fresh guest cart.

use std::sync::{Arc, Mutex, PoisonError};

use lumen_core::ProductId;
use lumen_storefront::api::HttpBackend;
use lumen_storefront::config::StorefrontConfig;
use lumen_storefront::session::AuthState;
use lumen_storefront::ui::{Dialogs, Navigator, Notifier, Route, Ui};
use lumen_storefront::viewmodels::{CartViewModel, FavoritesViewModel};

/// Base URL of the backend under test.
#[must_use]
pub fn api_url() -> String {
    std::env::var("LUMEN_TEST_API_URL").unwrap_or_else(|_| "http://localhost:3000/api/".to_string())
}

/// A product that can be put into the cart.
#[must_use]
pub fn product_id() -> ProductId {
    ProductId::new(std::env::var("LUMEN_TEST_PRODUCT_ID").unwrap_or_default())
}

/// UI collaborators that collect what they are asked to show.
#[derive(Default)]
pub struct CollectingUi {
    notices: Mutex<Vec<String>>,
    routes: Mutex<Vec<Route>>,
    dialog_open: Mutex<bool>,
}

impl CollectingUi {
    #[must_use]
    pub fn notices(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn routes(&self) -> Vec<Route> {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn dialog_open(&self) -> bool {
        *self
            .dialog_open
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for CollectingUi {
    fn notify(&self, message: &str) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

impl Navigator for CollectingUi {
    fn navigate(&self, route: &Route) {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route.clone());
    }
}

impl Dialogs for CollectingUi {
    fn open_order_confirmation(&self) {
        *self
            .dialog_open
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = true;
    }

    fn close_order_confirmation(&self) {
        *self
            .dialog_open
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = false;
    }
}

/// A backend client plus the view-models built on it.
pub struct TestContext {
    pub backend: HttpBackend,
    pub auth: AuthState,
    pub collected: Arc<CollectingUi>,
    pub ui: Ui,
    pub cart: Arc<CartViewModel<HttpBackend>>,
}

impl TestContext {
    /// A guest session against [`api_url`].
    ///
    /// # Panics
    ///
    /// Panics if the URL is invalid or the HTTP client cannot be built.
    #[must_use]
    pub fn guest() -> Self {
        let config = StorefrontConfig::for_api(&api_url()).expect("Invalid LUMEN_TEST_API_URL");
        Self::with_config(config, false)
    }

    /// A signed-in session, or `None` when no test token is configured.
    ///
    /// # Panics
    ///
    /// Panics if the URL is invalid or the HTTP client cannot be built.
    #[must_use]
    pub fn customer() -> Option<Self> {
        let token = std::env::var("LUMEN_TEST_ACCESS_TOKEN").ok()?;
        let mut config =
            StorefrontConfig::for_api(&api_url()).expect("Invalid LUMEN_TEST_API_URL");
        config.access_token = Some(token.into());
        Some(Self::with_config(config, true))
    }

    fn with_config(config: StorefrontConfig, authenticated: bool) -> Self {
        let backend = HttpBackend::new(&config).expect("Failed to create HTTP client");
        let collected = Arc::new(CollectingUi::default());
        let ui = Ui::new(collected.clone(), collected.clone(), collected.clone());
        let cart = Arc::new(CartViewModel::new(backend.clone(), ui.clone()));
        Self {
            backend,
            auth: AuthState::new(authenticated),
            collected,
            ui,
            cart,
        }
    }

    #[must_use]
    pub fn favorites(&self) -> FavoritesViewModel<HttpBackend> {
        FavoritesViewModel::new(self.backend.clone(), self.cart.clone(), self.ui.clone())
    }
}
