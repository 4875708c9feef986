pub const THEME_ATTRIBUTE: &str = "data-terminal-theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Green,
    Purple,
    White,
    Grey,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Green, Theme::Purple, Theme::White, Theme::Grey];

    /// Value of the `data-terminal-theme` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Green => "green",
            Theme::Purple => "purple",
            Theme::White => "white",
            Theme::Grey => "grey",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Green => "Matrix",
            Theme::Purple => "Synthwave",
            Theme::White => "Paper",
            Theme::Grey => "Mono",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CursorStyle {
    #[default]
    Block,
    Underscore,
}

impl CursorStyle {
    pub fn class(self) -> &'static str {
        match self {
            CursorStyle::Block => "cursor-block",
            CursorStyle::Underscore => "cursor-underscore",
        }
    }
}

/// Visual settings shared by every page. Reset on each load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Presentation {
    pub theme: Theme,
    pub cursor_style: CursorStyle,
    pub scanlines_enabled: bool,
    pub sound_enabled: bool,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            theme: Theme::Green,
            cursor_style: CursorStyle::Block,
            scanlines_enabled: true,
            sound_enabled: false,
        }
    }
}

impl Presentation {
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn set_cursor_style(&mut self, style: CursorStyle) {
        self.cursor_style = style;
    }

    pub fn toggle_scanlines(&mut self) {
        self.scanlines_enabled = !self.scanlines_enabled;
    }

    pub fn toggle_sound(&mut self) {
        self.sound_enabled = !self.sound_enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let presentation = Presentation::default();
        assert_eq!(presentation.theme, Theme::Green);
        assert_eq!(presentation.cursor_style, CursorStyle::Block);
        assert!(presentation.scanlines_enabled);
        assert!(!presentation.sound_enabled);
    }

    #[test]
    fn setters_replace_one_field_each() {
        let mut presentation = Presentation::default();
        presentation.set_theme(Theme::Grey);
        presentation.set_cursor_style(CursorStyle::Underscore);
        presentation.toggle_scanlines();
        presentation.toggle_sound();
        presentation.toggle_sound();
        assert_eq!(
            presentation,
            Presentation {
                theme: Theme::Grey,
                cursor_style: CursorStyle::Underscore,
                scanlines_enabled: false,
                sound_enabled: false,
            }
        );
        assert_eq!(presentation.theme.as_str(), "grey");
    }
}
