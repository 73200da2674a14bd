//! Presentation collaborators.
//!
//! View-models never render anything themselves. They report through three
//! narrow traits that a front end implements: transient notices, navigation
//! and the order confirmation dialog.

use std::sync::Arc;

use url::Url;

use crate::error::ClientError;

/// User-facing notice texts.
pub mod notices {
    pub const CART_EMPTY: &str = "Your cart is empty";
    pub const CART_UPDATE_FAILED: &str = "Could not update the cart";
    pub const CART_LOAD_FAILED: &str = "Could not load the cart";
    pub const FAVORITES_LOAD_FAILED: &str = "Could not load favorites";
    pub const FAVORITES_UPDATE_FAILED: &str = "Could not update favorites";
    pub const FAVORITES_REQUIRE_LOGIN: &str = "Sign in to add products to favorites";
    pub const FILL_REQUIRED_FIELDS: &str = "Please fill in the required fields";
    pub const ORDER_FAILED: &str = "Could not place the order";
    pub const PROFILE_REQUIRE_LOGIN: &str = "Sign in to edit your details";
    pub const PROFILE_LOAD_FAILED: &str = "Could not load your details";
    pub const PROFILE_SAVED: &str = "Your details have been saved";
    pub const PROFILE_SAVE_FAILED: &str = "Could not save your details";
}

/// A navigation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Catalog,
    Cart,
    /// Product detail page, by URL slug.
    Product(String),
    Login,
}

impl Route {
    /// The path of this route in the web front end.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Catalog => "/catalog".to_string(),
            Self::Cart => "/cart".to_string(),
            Self::Product(slug) => format!("/product/{slug}"),
            Self::Login => "/login".to_string(),
        }
    }
}

/// Shows transient notices (a snackbar in the web front end).
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Moves the user to another view.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &Route);
}

/// Presents the order confirmation dialog.
pub trait Dialogs: Send + Sync {
    fn open_order_confirmation(&self);
    fn close_order_confirmation(&self);
}

/// The collaborators a view-model reports through.
///
/// Cheap to clone; every view-model of one screen shares the same set.
#[derive(Clone)]
pub struct Ui {
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    dialogs: Arc<dyn Dialogs>,
}

impl Ui {
    #[must_use]
    pub fn new(
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        dialogs: Arc<dyn Dialogs>,
    ) -> Self {
        Self {
            notifier,
            navigator,
            dialogs,
        }
    }

    pub fn notify(&self, message: &str) {
        self.notifier.notify(message);
    }

    /// Report `err` and show its user message, or `fallback` when the backend
    /// did not supply one.
    pub fn notify_error(&self, err: &ClientError, fallback: &str) {
        err.report();
        self.notifier.notify(&err.user_message(fallback));
    }

    pub fn navigate(&self, route: &Route) {
        tracing::debug!(path = %route.path(), "Navigating");
        self.navigator.navigate(route);
    }

    #[must_use]
    pub fn dialogs(&self) -> &dyn Dialogs {
        self.dialogs.as_ref()
    }
}

/// Resolves product image names against the static asset base.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    base: Url,
}

impl AssetResolver {
    /// `base` must end in `/` for joins to append.
    #[must_use]
    pub const fn new(base: Url) -> Self {
        Self { base }
    }

    /// Absolute URL of `image`, or `None` if the name cannot form a URL.
    #[must_use]
    pub fn image_url(&self, image: &str) -> Option<Url> {
        self.base.join(image).ok()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Home.path(), "/");
        assert_eq!(Route::Product("monstera".to_string()).path(), "/product/monstera");
    }

    #[test]
    fn test_asset_resolver_appends_to_base() {
        let assets =
            AssetResolver::new(Url::parse("http://localhost:3000/images/products/").unwrap());
        assert_eq!(
            assets.image_url("ficus.jpg").unwrap().as_str(),
            "http://localhost:3000/images/products/ficus.jpg"
        );
    }
}
