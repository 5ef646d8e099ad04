use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub title_bg: Color,
    pub title_fg: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub column_header_fg: Color,
    pub status_ok: Color,
    pub status_err: Color,
    pub statusbar_bg: Color,
    pub overlay_border: Color,
    pub accent: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub pill_desc_fg: Color,
    pub surface_bg: Color,
    /// Idle, light, busy, heavy, saturated.
    pub heat_colors: [Color; 5],
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn from_config(theme_name: &str) -> Self {
        match theme_name.to_lowercase().as_str() {
            "light" => Self::light(),
            "mono" | "monochrome" => Self::mono(),
            _ => Self::dark(),
        }
    }

    pub fn next(&self) -> Self {
        match self.name {
            "dark" => Self::light(),
            "light" => Self::mono(),
            _ => Self::dark(),
        }
    }

    pub fn dark() -> Self {
        Theme {
            name: "dark",
            title_bg: Color::Green,
            title_fg: Color::Black,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            column_header_fg: Color::Yellow,
            status_ok: Color::Green,
            status_err: Color::Red,
            statusbar_bg: Color::DarkGray,
            overlay_border: Color::DarkGray,
            accent: Color::Green,
            pill_key_bg: Color::Yellow,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::DarkGray,
            heat_colors: [
                Color::Rgb(148, 163, 184),
                Color::Rgb(16, 185, 129),
                Color::Rgb(249, 115, 22),
                Color::Rgb(239, 68, 68),
                Color::Rgb(236, 72, 153),
            ],
        }
    }

    pub fn light() -> Self {
        Theme {
            name: "light",
            title_bg: Color::Blue,
            title_fg: Color::White,
            text_primary: Color::Black,
            text_secondary: Color::DarkGray,
            column_header_fg: Color::Blue,
            status_ok: Color::Rgb(0, 120, 0),
            status_err: Color::Red,
            statusbar_bg: Color::Rgb(220, 220, 220),
            overlay_border: Color::Rgb(150, 150, 150),
            accent: Color::Blue,
            pill_key_bg: Color::Blue,
            pill_key_fg: Color::White,
            pill_desc_fg: Color::Black,
            surface_bg: Color::Rgb(200, 200, 200),
            heat_colors: [
                Color::Rgb(90, 90, 90),
                Color::Rgb(40, 130, 40),
                Color::Rgb(180, 130, 0),
                Color::Rgb(200, 90, 40),
                Color::Rgb(190, 30, 30),
            ],
        }
    }

    pub fn mono() -> Self {
        Theme {
            name: "mono",
            title_bg: Color::White,
            title_fg: Color::Black,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            column_header_fg: Color::White,
            status_ok: Color::White,
            status_err: Color::White,
            statusbar_bg: Color::Black,
            overlay_border: Color::White,
            accent: Color::White,
            pill_key_bg: Color::White,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::Black,
            heat_colors: [Color::Gray; 5],
        }
    }

    /// Color for a CPU percentage cell. Values above 100 (multi-core) use the
    /// top bucket.
    pub fn cpu_color(&self, cpu_percent: f64) -> Color {
        if cpu_percent > 80.0 {
            self.heat_colors[4]
        } else if cpu_percent > 50.0 {
            self.heat_colors[3]
        } else if cpu_percent > 20.0 {
            self.heat_colors[2]
        } else if cpu_percent > 0.0 {
            self.heat_colors[1]
        } else {
            self.heat_colors[0]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_cycles_dark_light_mono() {
        let theme = Theme::dark();
        assert_eq!(theme.next().name, "light");
        assert_eq!(theme.next().next().name, "mono");
        assert_eq!(theme.next().next().next().name, "dark");
    }

    #[test]
    fn unknown_theme_name_falls_back_to_dark() {
        assert_eq!(Theme::from_config("LIGHT").name, "light");
        assert_eq!(Theme::from_config("monochrome").name, "mono");
        assert_eq!(Theme::from_config("solarized").name, "dark");
    }

    #[test]
    fn cpu_color_threshold_boundaries() {
        let theme = Theme::dark();
        assert_eq!(theme.cpu_color(0.0), theme.heat_colors[0]);
        assert_eq!(theme.cpu_color(0.1), theme.heat_colors[1]);
        assert_eq!(theme.cpu_color(20.0), theme.heat_colors[1]);
        assert_eq!(theme.cpu_color(20.1), theme.heat_colors[2]);
        assert_eq!(theme.cpu_color(50.1), theme.heat_colors[3]);
        assert_eq!(theme.cpu_color(80.1), theme.heat_colors[4]);
        assert_eq!(theme.cpu_color(350.0), theme.heat_colors[4]);
    }
}
