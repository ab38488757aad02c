use crate::domain::feed::{FeedComponent, FodderAvailability};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Straight (non-premultiplied) sRGB colour with alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f64,
}

impl Color {
    pub const TRANSPARENT: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        alpha: 0.0,
    };

    /// `0xAARRGGBB`.
    pub fn from_argb(argb: u32) -> Self {
        Self {
            r: ((argb >> 16) & 0xFF) as u8,
            g: ((argb >> 8) & 0xFF) as u8,
            b: (argb & 0xFF) as u8,
            alpha: ((argb >> 24) & 0xFF) as f64 / 255.0,
        }
    }

    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl FromStr for ThemeMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => anyhow::bail!("unknown theme: {other} (expected light or dark)"),
        }
    }
}

/// Colour roles used by the widgets and charts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub primary: Color,
    pub on_primary: Color,
    pub primary_container: Color,
    pub secondary: Color,
    pub secondary_container: Color,
    pub inverse_primary: Color,
    pub surface: Color,
    pub on_surface: Color,
    pub outline: Color,
}

impl Palette {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    pub fn light() -> Self {
        Self {
            primary: Color::from_argb(0xFF5264AA),
            on_primary: Color::from_argb(0xFFFFFFFF),
            primary_container: Color::from_argb(0xFFDEE1FF),
            secondary: Color::from_argb(0xFF5A5F72),
            secondary_container: Color::from_argb(0xFFE3E5FB),
            inverse_primary: Color::from_argb(0xFFBDC2FF),
            surface: Color::from_argb(0xFFFEFBFF),
            on_surface: Color::from_argb(0xFF1B1B1F),
            outline: Color::from_argb(0xFF767680),
        }
    }

    pub fn dark() -> Self {
        Self {
            primary: Color::from_argb(0xFFBDC2FF),
            on_primary: Color::from_argb(0xFF223178),
            primary_container: Color::from_argb(0xFF39488F),
            secondary: Color::from_argb(0xFFC3C5DD),
            secondary_container: Color::from_argb(0xFF434759),
            inverse_primary: Color::from_argb(0xFF5264AA),
            surface: Color::from_argb(0xFF1B1B1F),
            on_surface: Color::from_argb(0xFFE3E2E6),
            outline: Color::from_argb(0xFF8F909A),
        }
    }
}

/// Slice colours are theme independent.
pub fn feed_component_color(component: FeedComponent) -> Color {
    let base = match component {
        FeedComponent::Concentrate => Color::from_argb(0xFFFFEB3B),
        FeedComponent::GreenFodder => Color::from_argb(0xFF4CAF50),
        FeedComponent::DryRoughage => Color::from_argb(0xFF8D6E63),
    };
    base.with_alpha(0.6)
}

pub fn availability_color(availability: FodderAvailability) -> Color {
    match availability {
        FodderAvailability::High => Color::from_argb(0xFFFF0000),
        FodderAvailability::Moderate => Color::from_argb(0xFF008000),
        FodderAvailability::Low => Color::from_argb(0xFF5F89B4),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_unpacks_channels() {
        let c = Color::from_argb(0x805264AA);
        assert_eq!((c.r, c.g, c.b), (0x52, 0x64, 0xAA));
        assert!((c.alpha - 128.0 / 255.0).abs() < 1e-9);
        assert_eq!(c.hex(), "#5264AA");
    }

    #[test]
    fn alpha_is_clamped() {
        assert_eq!(Color::from_argb(0xFF000000).with_alpha(3.0).alpha, 1.0);
        assert_eq!(Color::from_argb(0xFF000000).with_alpha(-1.0).alpha, 0.0);
    }

    #[test]
    fn parses_theme_mode() {
        assert_eq!("Dark".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert!("sepia".parse::<ThemeMode>().is_err());
        assert_eq!(Palette::for_mode(ThemeMode::Dark).primary, Palette::light().inverse_primary);
    }
}
