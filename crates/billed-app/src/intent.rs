use billed_core::Route;

use crate::bills::BillRow;

/// Outcome of a controller action, applied by the UI adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Leave the current view as it is.
    Stay,
    Navigate(Route),
    /// Open the receipt modal on `url`, rendering the image `width` pixels wide.
    ShowReceipt { url: String, width: u32 },
    /// Blocking user alert.
    Alert(String),
    RenderBills(Vec<BillRow>),
    /// Replace the view with an error page carrying `message`.
    RenderError(String),
}

impl Intent {
    pub fn is_navigation_to(&self, route: Route) -> bool {
        matches!(self, Intent::Navigate(r) if *r == route)
    }
}

/// Applies intents to a concrete surface (terminal, window, test recorder).
pub trait Adapter {
    fn apply(&mut self, intent: Intent);
}
