use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Accent used by the dashboard and the single-series charts.
pub const ACCENT: Color32 = Color32::from_rgb(0x62, 0x98, 0xc0);

/// Navigation bar background.
pub const NAV_BACKGROUND: Color32 = Color32::from_rgb(227, 168, 179);

/// Fixed company colours for the dashboard share chart.
pub const COMPANY_SCALE: [(&str, Color32); 5] = [
    ("JR Central", Color32::from_rgb(0xc1, 0x84, 0x89)),
    ("JR East", Color32::from_rgb(0xe3, 0xa8, 0xb3)),
    ("JR West", Color32::from_rgb(0x87, 0xbb, 0xe2)),
    ("JR Kyushu", Color32::from_rgb(0xc7, 0xda, 0xed)),
    ("JR Hokkaido", Color32::from_rgb(0x62, 0x98, 0xc0)),
];

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category value → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct values of a text column to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Assign palette colours to `values` in the order given.
    pub fn new<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let values: Vec<&str> = values.into_iter().collect();
        let palette = generate_palette(values.len());
        let mapping = values
            .into_iter()
            .zip(palette)
            .map(|(v, c)| (v.to_string(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// The fixed company scale; unknown companies fall back to grey.
    pub fn companies() -> Self {
        ColorMap {
            mapping: COMPANY_SCALE
                .iter()
                .map(|(name, c)| (name.to_string(), *c))
                .collect(),
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given value.
    pub fn color_for(&self, value: &str) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let palette = generate_palette(6);
        assert_eq!(palette.len(), 6);
        for (i, a) in palette.iter().enumerate() {
            assert!(palette[i + 1..].iter().all(|b| a != b));
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_values_fall_back_to_grey() {
        let map = ColorMap::new(["Tokaido Shinkansen", "Sanyo Shinkansen"]);
        assert_ne!(map.color_for("Tokaido Shinkansen"), map.color_for("Sanyo Shinkansen"));
        assert_eq!(map.color_for("Maglev"), Color32::GRAY);
        assert_eq!(ColorMap::companies().color_for("JR West"), COMPANY_SCALE[2].1);
    }
}
