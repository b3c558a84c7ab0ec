//! The parts of the surrounding application that pages call back into.

/// The application shell that owns the pages and widgets.
pub trait AppShell: Send + Sync {
    /// Refresh the current page and all widgets, e.g. after a transaction was deleted.
    fn update(&self);

    /// Refresh the widgets only, e.g. the list of accounts after one was deleted.
    fn update_widgets(&self);
}

/// Asks the user to confirm a destructive action.
pub trait Confirm: Send + Sync {
    /// Show `message` and return whether the user agreed.
    fn confirm(&self, message: &str) -> bool;
}
