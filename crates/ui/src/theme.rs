use ratatui::prelude::Color;

// Tokyonight-inspired palette; tweak these to change the reader colors.
const TN_BG: Color = Color::Rgb(26, 27, 38); // #1a1b26
const TN_BG_ALT: Color = Color::Rgb(31, 35, 53); // #1f2335
const TN_BG_STRONG: Color = Color::Rgb(65, 72, 104); // #414868
const TN_FG: Color = Color::Rgb(192, 202, 245); // #c0caf5
const TN_BLUE: Color = Color::Rgb(122, 162, 247); // #7aa2f7
const TN_RED: Color = Color::Rgb(247, 118, 142); // #f7768e

#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub header_bg: Color,
    pub header_fg: Color,
    pub footer_bg: Color,
    pub footer_fg: Color,
    pub footer_pad_bg: Color,
    pub word_fg: Color,
    pub pivot_fg: Color,
    /// What side words fade towards as their opacity drops.
    pub backdrop: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            header_bg: TN_BG_ALT,
            header_fg: TN_FG,
            footer_bg: TN_BG_STRONG,
            footer_fg: TN_BLUE,
            footer_pad_bg: TN_BG_ALT,
            word_fg: TN_FG,
            pivot_fg: TN_RED,
            backdrop: TN_BG,
        }
    }
}

impl Theme {
    pub fn preset(name: &str) -> Option<Self> {
        let base = Theme::default();
        match name.to_lowercase().as_str() {
            "tokyonight" => Some(base),
            "gruvbox" => Some(Theme {
                header_bg: Color::Yellow,
                header_fg: Color::Black,
                footer_bg: Color::Green,
                footer_fg: Color::Black,
                footer_pad_bg: Color::DarkGray,
                word_fg: Color::Rgb(235, 219, 178),
                pivot_fg: Color::Rgb(251, 73, 52),
                backdrop: Color::Rgb(40, 40, 40),
            }),
            "dracula" => Some(Theme {
                header_bg: Color::Magenta,
                header_fg: Color::White,
                footer_bg: Color::Blue,
                footer_fg: Color::White,
                footer_pad_bg: Color::DarkGray,
                word_fg: Color::Rgb(248, 248, 242),
                pivot_fg: Color::Rgb(255, 85, 85),
                backdrop: Color::Rgb(40, 42, 54),
            }),
            _ => None,
        }
    }

    /// Foreground for side words at `opacity` (0 hides them, 1 matches the
    /// main word).
    pub fn side_fg(&self, opacity: f32) -> Color {
        blend(self.backdrop, self.word_fg, opacity)
    }
}

pub fn parse_color(s: &str) -> Option<Color> {
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "darkgray" => Some(Color::DarkGray),
        hex if hex.starts_with('#') && hex.len() == 7 && hex.is_ascii() => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Color::Rgb(channel(1)?, channel(3)?, channel(5)?))
        }
        _ => None,
    }
}

/// Linear mix of two colors. Non-RGB colors cannot be mixed, so the result
/// snaps to whichever end is closer.
pub fn blend(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ if t < 0.5 => Color::DarkGray,
        _ => to,
    }
}
