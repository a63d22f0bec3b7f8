use catppuccin::PALETTE;
use ratatui::style::Color;

const fn rgb(c: &catppuccin::Color) -> Color {
    Color::Rgb(c.rgb.r, c.rgb.g, c.rgb.b)
}

/// Colours used by the UI, resolved from a Catppuccin flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    base: Color,
    surface0: Color,
    surface1: Color,
    surface2: Color,
    overlay0: Color,
    overlay1: Color,
    text: Color,
    subtext0: Color,
    subtext1: Color,
    mauve: Color,
    red: Color,
    peach: Color,
    yellow: Color,
    green: Color,
    blue: Color,
    lavender: Color,
}

impl Theme {
    const fn from_catppuccin(flavor: &catppuccin::Flavor) -> Self {
        let c = &flavor.colors;
        Self {
            base: rgb(&c.base),
            surface0: rgb(&c.surface0),
            surface1: rgb(&c.surface1),
            surface2: rgb(&c.surface2),
            overlay0: rgb(&c.overlay0),
            overlay1: rgb(&c.overlay1),
            text: rgb(&c.text),
            subtext0: rgb(&c.subtext0),
            subtext1: rgb(&c.subtext1),
            mauve: rgb(&c.mauve),
            red: rgb(&c.red),
            peach: rgb(&c.peach),
            yellow: rgb(&c.yellow),
            green: rgb(&c.green),
            blue: rgb(&c.blue),
            lavender: rgb(&c.lavender),
        }
    }

    pub const fn base(&self) -> Color {
        self.base
    }

    pub const fn surface0(&self) -> Color {
        self.surface0
    }

    pub const fn surface1(&self) -> Color {
        self.surface1
    }

    pub const fn surface2(&self) -> Color {
        self.surface2
    }

    pub const fn overlay0(&self) -> Color {
        self.overlay0
    }

    pub const fn overlay1(&self) -> Color {
        self.overlay1
    }

    pub const fn text(&self) -> Color {
        self.text
    }

    pub const fn subtext0(&self) -> Color {
        self.subtext0
    }

    pub const fn subtext1(&self) -> Color {
        self.subtext1
    }

    pub const fn mauve(&self) -> Color {
        self.mauve
    }

    pub const fn red(&self) -> Color {
        self.red
    }

    pub const fn peach(&self) -> Color {
        self.peach
    }

    pub const fn yellow(&self) -> Color {
        self.yellow
    }

    pub const fn green(&self) -> Color {
        self.green
    }

    pub const fn blue(&self) -> Color {
        self.blue
    }

    pub const fn lavender(&self) -> Color {
        self.lavender
    }

    // Semantic colors

    pub const fn border(&self) -> Color {
        self.surface1
    }

    pub const fn border_focused(&self) -> Color {
        self.lavender
    }

    pub const fn selection_bg(&self) -> Color {
        self.surface1
    }

    pub const fn header(&self) -> Color {
        self.yellow
    }
}

impl Default for Theme {
    fn default() -> Self {
        theme_from_name(THEMES[0].0)
    }
}

const THEMES: &[(&str, fn() -> Theme)] = &[
    ("Catppuccin Mocha", || Theme::from_catppuccin(&PALETTE.mocha)),
    ("Catppuccin Macchiato", || Theme::from_catppuccin(&PALETTE.macchiato)),
    ("Catppuccin Frappé", || Theme::from_catppuccin(&PALETTE.frappe)),
    ("Catppuccin Latte", || Theme::from_catppuccin(&PALETTE.latte)),
];

/// Look up a theme by name. Unknown names get the first built-in theme.
pub fn theme_from_name(name: &str) -> Theme {
    THEMES
        .iter()
        .find(|(n, _)| *n == name)
        .map_or_else(|| (THEMES[0].1)(), |(_, make)| make())
}

/// The theme following `name` in the built-in list, wrapping around.
pub fn next_theme_name(name: &str) -> &'static str {
    let index = THEMES.iter().position(|(n, _)| *n == name);
    let next = index.map_or(0, |i| (i + 1) % THEMES.len());
    THEMES[next].0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_name_falls_back_to_mocha() {
        assert_eq!(theme_from_name("Solarized"), theme_from_name("Catppuccin Mocha"));
    }

    #[test]
    fn test_cycle_wraps_around() {
        assert_eq!(next_theme_name("Catppuccin Mocha"), "Catppuccin Macchiato");
        assert_eq!(next_theme_name("Catppuccin Latte"), "Catppuccin Mocha");
        assert_eq!(next_theme_name("bogus"), "Catppuccin Mocha");
    }

    #[test]
    fn test_latte_is_light() {
        let latte = theme_from_name("Catppuccin Latte");
        let mocha = theme_from_name("Catppuccin Mocha");
        assert_ne!(latte.base(), mocha.base());
    }
}
