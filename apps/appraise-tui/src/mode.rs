//! TUI interaction modes

/// The current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Normal navigation mode (default)
    #[default]
    Normal,
    /// Editing the selected field's value
    Editing,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Normal => write!(f, "NORMAL"),
            Mode::Editing => write!(f, "EDITING"),
        }
    }
}

impl Mode {
    /// Returns a short code for compact display.
    pub fn short_code(&self) -> &'static str {
        match self {
            Mode::Normal => "NOR",
            Mode::Editing => "EDT",
        }
    }
}
