//! Application mode and click target types

/// The current mode/state of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Browsing days
    #[default]
    Normal,
    /// Showing help
    Help,
}

/// Something the user can click in the carousel row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    /// The ◀ arrow
    Prev,
    /// The ▶ arrow
    Next,
    /// A day button, by id
    Day(String),
}

/// A navigation request routed through the carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Navigation<'a> {
    Next,
    Prev,
    Direct(&'a str),
}
