use crossterm::style::Color;

/// Console design tokens.
///
/// Every color and icon printed by the CLI comes from here.
pub mod colors {
    use super::Color;

    pub const SUCCESS: Color = Color::Green;
    pub const ERROR: Color = Color::Red;
    pub const WARNING: Color = Color::Yellow;
    pub const INFO: Color = Color::Cyan;
}

pub mod icons {
    pub const SECTION: &str = "▶";
    pub const DETAIL: &str = "↳";
    pub const WARNING: &str = "⚠";
    pub const ERROR: &str = "✗";
    pub const SUCCESS: &str = "✓";
}

pub mod icons_ascii {
    pub const SECTION: &str = ">>";
    pub const DETAIL: &str = "->";
    pub const WARNING: &str = "[WARN]";
    pub const ERROR: &str = "[FAIL]";
    pub const SUCCESS: &str = "[OK]";
}
