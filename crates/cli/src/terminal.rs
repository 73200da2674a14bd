//! Terminal implementations of the storefront UI traits.

use std::io::Write;

use lumen_storefront::ui::{Dialogs, Navigator, Notifier, Route};

/// Notices go to stderr, the order confirmation to stdout. There is nowhere
/// to navigate to, so routes are only logged.
pub struct TerminalUi;

impl Notifier for TerminalUi {
    fn notify(&self, message: &str) {
        let _ = writeln!(std::io::stderr(), "! {message}");
    }
}

impl Navigator for TerminalUi {
    fn navigate(&self, route: &Route) {
        tracing::info!(path = %route.path(), "Would navigate");
    }
}

impl Dialogs for TerminalUi {
    fn open_order_confirmation(&self) {
        let _ = writeln!(
            std::io::stdout(),
            "Thank you for your order! We will call you shortly to confirm it."
        );
    }

    fn close_order_confirmation(&self) {
        tracing::debug!("Order confirmation dismissed");
    }
}
