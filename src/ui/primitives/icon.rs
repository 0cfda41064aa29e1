use crossterm::style::Stylize;

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Section,
    Detail,
    Warning,
    Error,
    Success,
}

impl Icon {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        match (supports_unicode, self) {
            (true, Icon::Section) => theme::icons::SECTION,
            (true, Icon::Detail) => theme::icons::DETAIL,
            (true, Icon::Warning) => theme::icons::WARNING,
            (true, Icon::Error) => theme::icons::ERROR,
            (true, Icon::Success) => theme::icons::SUCCESS,
            (false, Icon::Section) => theme::icons_ascii::SECTION,
            (false, Icon::Detail) => theme::icons_ascii::DETAIL,
            (false, Icon::Warning) => theme::icons_ascii::WARNING,
            (false, Icon::Error) => theme::icons_ascii::ERROR,
            (false, Icon::Success) => theme::icons_ascii::SUCCESS,
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let s = self.render(supports_unicode);
        if !supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Section | Icon::Success => theme::colors::SUCCESS,
            Icon::Detail => theme::colors::INFO,
            Icon::Warning => theme::colors::WARNING,
            Icon::Error => theme::colors::ERROR,
        };
        format!("{}", s.with(color))
    }
}
