//! Color palette for the terminal book page

use ratatui::style::Color;

/// Colors used by the book page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    // Backgrounds
    pub bg_primary: Color,
    pub bg_highlight: Color,

    // Foregrounds
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    // Accents
    pub accent: Color,
    pub link: Color,

    // Semantic colors
    pub warning: Color,
    pub error: Color,

    pub border: Color,
}

impl Theme {
    /// Tokyo Night palette
    pub const fn tokyo_night() -> Self {
        Self {
            bg_primary: Color::Rgb(26, 27, 38),     // #1a1b26
            bg_highlight: Color::Rgb(65, 72, 104),  // #414868
            fg_primary: Color::Rgb(192, 202, 245),  // #c0caf5
            fg_secondary: Color::Rgb(169, 177, 214), // #a9b1d6
            fg_muted: Color::Rgb(86, 95, 137),      // #565f89
            accent: Color::Rgb(122, 162, 247),      // #7aa2f7
            link: Color::Rgb(125, 207, 255),        // #7dcfff
            warning: Color::Rgb(224, 175, 104),     // #e0af68
            error: Color::Rgb(247, 118, 142),       // #f7768e
            border: Color::Rgb(59, 66, 97),         // #3b4261
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::tokyo_night()
    }
}
