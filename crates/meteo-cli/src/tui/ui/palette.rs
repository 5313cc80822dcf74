//! Temperature-band color palettes for the TUI.
//!
//! The whole dashboard recolors itself by the current temperature band. Each
//! band carries a fixed palette; switching is a whole-palette swap, never a
//! per-widget tweak, so the screen stays visually coherent mid-transition.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

use meteo_client::TempBand;

/// Color palette for one temperature band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    // Backgrounds
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub card_bg: Color,

    // Text
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    // Accents
    pub accent: Color,
    pub chart_line: Color,
    pub chart_bg: Color,
}

impl Palette {
    /// Blue palette for the cold band.
    #[must_use]
    pub const fn cold() -> Self {
        Self {
            bg_primary: Color::Rgb(219, 234, 254),   // blue-100
            bg_secondary: Color::Rgb(191, 219, 254), // blue-200
            card_bg: Color::Rgb(255, 255, 255),
            text_primary: Color::Rgb(30, 58, 138),   // blue-900
            text_secondary: Color::Rgb(30, 64, 175), // blue-800
            text_muted: Color::Rgb(59, 130, 246),    // blue-500
            accent: Color::Rgb(37, 99, 235),         // blue-600
            chart_line: Color::Rgb(59, 130, 246),    // blue-500
            chart_bg: Color::Rgb(235, 242, 254),     // blue-500 at 10% on white
        }
    }

    /// Green palette for the comfort band.
    #[must_use]
    pub const fn comfort() -> Self {
        Self {
            bg_primary: Color::Rgb(209, 250, 229),   // emerald-100
            bg_secondary: Color::Rgb(167, 243, 208), // emerald-200
            card_bg: Color::Rgb(255, 255, 255),
            text_primary: Color::Rgb(6, 78, 59),    // emerald-900
            text_secondary: Color::Rgb(6, 95, 70),  // emerald-800
            text_muted: Color::Rgb(5, 150, 105),    // emerald-600
            accent: Color::Rgb(16, 185, 129),       // emerald-500
            chart_line: Color::Rgb(16, 185, 129),   // emerald-500
            chart_bg: Color::Rgb(231, 248, 242),    // emerald-500 at 10% on white
        }
    }

    /// Orange palette for the warm band.
    #[must_use]
    pub const fn warm() -> Self {
        Self {
            bg_primary: Color::Rgb(254, 215, 170),   // orange-200
            bg_secondary: Color::Rgb(253, 186, 116), // orange-300
            card_bg: Color::Rgb(255, 255, 255),
            text_primary: Color::Rgb(124, 45, 18),   // orange-900
            text_secondary: Color::Rgb(154, 52, 18), // orange-800
            text_muted: Color::Rgb(194, 65, 12),     // orange-700
            accent: Color::Rgb(249, 115, 22),        // orange-500
            chart_line: Color::Rgb(249, 115, 22),    // orange-500
            chart_bg: Color::Rgb(254, 241, 232),     // orange-500 at 10% on white
        }
    }

    /// Red palette for the hot band.
    #[must_use]
    pub const fn hot() -> Self {
        Self {
            bg_primary: Color::Rgb(254, 202, 202),   // red-200
            bg_secondary: Color::Rgb(252, 165, 165), // red-300
            card_bg: Color::Rgb(255, 255, 255),
            text_primary: Color::Rgb(127, 29, 29),   // red-900
            text_secondary: Color::Rgb(153, 27, 27), // red-800
            text_muted: Color::Rgb(220, 38, 38),     // red-600
            accent: Color::Rgb(239, 68, 68),         // red-500
            chart_line: Color::Rgb(239, 68, 68),     // red-500
            chart_bg: Color::Rgb(253, 236, 236),     // red-500 at 10% on white
        }
    }

    /// Palette for a band.
    #[must_use]
    pub const fn for_band(band: TempBand) -> Self {
        match band {
            TempBand::Cold => Self::cold(),
            TempBand::Comfort => Self::comfort(),
            TempBand::Warm => Self::warm(),
            TempBand::Hot => Self::hot(),
        }
    }

    // Style helpers

    /// Style for titles.
    #[inline]
    #[must_use]
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for card borders.
    #[inline]
    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Style for the large value inside a card.
    #[inline]
    #[must_use]
    pub fn value_style(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for secondary labels.
    #[inline]
    #[must_use]
    pub fn label_style(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    /// Style for de-emphasized hint text.
    #[inline]
    #[must_use]
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.text_muted)
    }
}

/// Default border type for all blocks.
pub const BORDER_TYPE: BorderType = BorderType::Rounded;

/// Tracks the active temperature band and swaps palettes on change.
#[derive(Debug, Clone, Copy)]
pub struct ThemeSelector {
    current: TempBand,
}

impl Default for ThemeSelector {
    fn default() -> Self {
        Self {
            current: TempBand::Comfort,
        }
    }
}

impl ThemeSelector {
    /// The active band.
    pub fn band(&self) -> TempBand {
        self.current
    }

    /// The active palette.
    pub fn palette(&self) -> Palette {
        Palette::for_band(self.current)
    }

    /// Switch to a band. Returns true when the band actually changed;
    /// re-applying the current band is a no-op.
    pub fn apply(&mut self, band: TempBand) -> bool {
        if self.current == band {
            return false;
        }
        self.current = band;
        true
    }
}
