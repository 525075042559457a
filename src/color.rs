use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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
            let hsl = Hsl::new(hue, 0.65, 0.45);
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
// Type badges: `Type` label → Color32
// ---------------------------------------------------------------------------

const BLUE: Color32 = Color32::from_rgb(30, 64, 175);
const GREEN: Color32 = Color32::from_rgb(22, 101, 52);
const INDIGO: Color32 = Color32::from_rgb(55, 48, 163);
const PURPLE: Color32 = Color32::from_rgb(107, 33, 168);
const PINK: Color32 = Color32::from_rgb(157, 23, 77);
const YELLOW: Color32 = Color32::from_rgb(133, 77, 14);

/// Badge colours for the publication types that appear in the dataset.
const KNOWN_TYPES: [(&str, Color32); 11] = [
    ("Report", BLUE),
    ("Policy Paper", GREEN),
    ("Briefing/ Policy Paper", INDIGO),
    ("Analysis / Blog", PURPLE),
    ("Index / Report", PINK),
    ("Index Report", PINK),
    ("Academic Paper", YELLOW),
    ("Blog Post", PURPLE),
    ("Policy Brief", GREEN),
    ("Policy Research Paper", GREEN),
    ("Report (A selection of case studies)", BLUE),
];

/// Maps `Type` labels to badge colours: fixed colours for the known types,
/// generated hues for anything else.
#[derive(Debug, Clone)]
pub struct TypePalette {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl Default for TypePalette {
    fn default() -> Self {
        TypePalette::new(std::iter::empty::<&str>())
    }
}

impl TypePalette {
    /// Build a palette covering `types` (typically the dataset's type labels).
    pub fn new<'a>(types: impl IntoIterator<Item = &'a str>) -> Self {
        let mut mapping: BTreeMap<String, Color32> = KNOWN_TYPES
            .iter()
            .map(|(label, c)| (label.to_string(), *c))
            .collect();

        let unknown: Vec<&str> = types
            .into_iter()
            .filter(|t| !t.is_empty() && !mapping.contains_key(*t))
            .collect();
        let generated = generate_palette(unknown.len());
        for (label, color) in unknown.into_iter().zip(generated) {
            mapping.insert(label.to_string(), color);
        }

        TypePalette {
            mapping,
            default_color: Color32::DARK_GRAY,
        }
    }

    /// Look up the badge colour for a type label.
    pub fn color_for(&self, kind: &str) -> Color32 {
        self.mapping
            .get(kind)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_length() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(4);
        assert_eq!(colors.len(), 4);
        assert_ne!(colors[0], colors[2]);
    }

    #[test]
    fn known_types_keep_fixed_colours() {
        let palette = TypePalette::new(["Report", "Policy Brief"]);
        assert_eq!(palette.color_for("Report"), BLUE);
        assert_eq!(palette.color_for("Index Report"), PINK);
        assert_eq!(palette.color_for("Policy Brief"), GREEN);
    }

    #[test]
    fn unknown_types_get_generated_colours() {
        let palette = TypePalette::new(["Podcast", "Dataset", ""]);
        let podcast = palette.color_for("Podcast");
        assert_ne!(podcast, Color32::DARK_GRAY);
        assert_ne!(podcast, palette.color_for("Dataset"));
        assert_eq!(palette.color_for(""), Color32::DARK_GRAY);
        assert_eq!(palette.color_for("Never seen"), Color32::DARK_GRAY);
    }
}
