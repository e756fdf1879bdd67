//! Static configurator catalog: the color palette and slider bounds.

use std::ops::RangeInclusive;

/// Valid width range for a window, in centimeters.
pub const WIDTH_CM_RANGE: RangeInclusive<u32> = 50..=300;

/// Valid height range for a window, in centimeters.
pub const HEIGHT_CM_RANGE: RangeInclusive<u32> = 50..=250;

/// A palette entry offered by the configurator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColor {
    pub name: &'static str,
    pub hex: &'static str,
}

/// The fixed color palette.
pub const COLORS: [PaletteColor; 5] = [
    PaletteColor {
        name: "Blanco",
        hex: "#FFFFFF",
    },
    PaletteColor {
        name: "Negro",
        hex: "#2D3748",
    },
    PaletteColor {
        name: "Gris Antracita",
        hex: "#4A5568",
    },
    PaletteColor {
        name: "Plata",
        hex: "#E2E8F0",
    },
    PaletteColor {
        name: "Imitación Madera",
        hex: "#8B5A2B",
    },
];

/// Map a free-form color description onto the palette.
///
/// The AI extraction returns colors as loose Spanish text ("gris oscuro",
/// "imitacion madera"); anything mentioning a palette keyword snaps to the
/// palette name, everything else passes through unchanged since color never
/// constrains pricing.
#[must_use]
pub fn normalize_color(color: &str) -> String {
    const KEYWORDS: [(&str, &str); 5] = [
        ("blanco", "Blanco"),
        ("negro", "Negro"),
        ("gris", "Gris Antracita"),
        ("plata", "Plata"),
        ("madera", "Imitación Madera"),
    ];

    let lower = color.to_lowercase();
    for (keyword, name) in KEYWORDS {
        if lower.contains(keyword) {
            return name.to_string();
        }
    }
    color.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_color_matches_palette_keywords() {
        assert_eq!(normalize_color("blanco"), "Blanco");
        assert_eq!(normalize_color("Gris oscuro"), "Gris Antracita");
        assert_eq!(normalize_color("imitación madera"), "Imitación Madera");
    }

    #[test]
    fn test_normalize_color_passes_unknown_through() {
        assert_eq!(normalize_color("Azul cielo"), "Azul cielo");
    }

    #[test]
    fn test_palette_names_normalize_to_themselves() {
        for color in COLORS {
            assert_eq!(normalize_color(color.name), color.name);
        }
    }
}
