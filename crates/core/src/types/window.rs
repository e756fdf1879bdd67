//! Window configuration types.
//!
//! Enum values carry their Spanish wire labels (the names shown to customers
//! and returned by the AI extraction backend) via serde renames; Rust code
//! uses the English identifiers.

use serde::{Deserialize, Serialize};

/// Opening mechanism of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WindowType {
    #[default]
    #[serde(rename = "Corredera")]
    Sliding,
    #[serde(rename = "Abatible")]
    Casement,
    #[serde(rename = "Fija")]
    Fixed,
    #[serde(rename = "Oscilobatiente")]
    TiltAndTurn,
    #[serde(rename = "Osciloparalela")]
    OsciloParalela,
}

impl WindowType {
    /// Number of variants, for ordinal-indexed pricing tables.
    pub const COUNT: usize = 5;

    /// All variants, in ordinal order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Sliding,
        Self::Casement,
        Self::Fixed,
        Self::TiltAndTurn,
        Self::OsciloParalela,
    ];

    /// Ordinal of this variant, used to index pricing tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Customer-facing label (and wire value).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sliding => "Corredera",
            Self::Casement => "Abatible",
            Self::Fixed => "Fija",
            Self::TiltAndTurn => "Oscilobatiente",
            Self::OsciloParalela => "Osciloparalela",
        }
    }
}

impl std::fmt::Display for WindowType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Frame material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Material {
    #[default]
    #[serde(rename = "PVC")]
    Pvc,
    #[serde(rename = "Aluminio")]
    Aluminum,
    #[serde(rename = "Madera")]
    Wood,
}

impl Material {
    /// Number of variants, for ordinal-indexed pricing tables.
    pub const COUNT: usize = 3;

    /// All variants, in ordinal order.
    pub const ALL: [Self; Self::COUNT] = [Self::Pvc, Self::Aluminum, Self::Wood];

    /// Ordinal of this variant, used to index pricing tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Customer-facing label (and wire value).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pvc => "PVC",
            Self::Aluminum => "Aluminio",
            Self::Wood => "Madera",
        }
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// VEKA profile system of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Profile {
    #[default]
    #[serde(rename = "Veka Softline 70")]
    VekaSoftline70,
    #[serde(rename = "Veka Softline 82")]
    VekaSoftline82,
}

impl Profile {
    /// Number of variants, for ordinal-indexed pricing tables.
    pub const COUNT: usize = 2;

    /// All variants, in ordinal order.
    pub const ALL: [Self; Self::COUNT] = [Self::VekaSoftline70, Self::VekaSoftline82];

    /// Ordinal of this variant, used to index pricing tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Customer-facing label (and wire value).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::VekaSoftline70 => "Veka Softline 70",
            Self::VekaSoftline82 => "Veka Softline 82",
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Glazing type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GlassType {
    #[default]
    #[serde(rename = "Doble")]
    Double,
    #[serde(rename = "Triple")]
    Triple,
    #[serde(rename = "Templado")]
    Tempered,
    #[serde(rename = "Laminado")]
    Laminated,
}

impl GlassType {
    /// Number of variants, for ordinal-indexed pricing tables.
    pub const COUNT: usize = 4;

    /// All variants, in ordinal order.
    pub const ALL: [Self; Self::COUNT] =
        [Self::Double, Self::Triple, Self::Tempered, Self::Laminated];

    /// Ordinal of this variant, used to index pricing tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Customer-facing label (and wire value).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Double => "Doble",
            Self::Triple => "Triple",
            Self::Tempered => "Templado",
            Self::Laminated => "Laminado",
        }
    }
}

impl std::fmt::Display for GlassType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A complete window configuration as built in the configurator.
///
/// Width must stay within 50-300 cm and height within 50-250 cm (the
/// configurator's slider bounds, see [`crate::catalog`]); the pricing engine
/// does not enforce this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(rename = "type")]
    pub window_type: WindowType,
    /// Width in centimeters.
    #[serde(rename = "width")]
    pub width_cm: u32,
    /// Height in centimeters.
    #[serde(rename = "height")]
    pub height_cm: u32,
    pub material: Material,
    pub profile: Profile,
    pub glass: GlassType,
    /// Free-form color name, conventionally one of the palette in
    /// [`crate::catalog::COLORS`]. Never constrains pricing.
    pub color: String,
    #[serde(rename = "hasGrilles")]
    pub has_grilles: bool,
}

impl Default for WindowConfig {
    /// The configurator's initial state.
    fn default() -> Self {
        Self {
            window_type: WindowType::Sliding,
            width_cm: 120,
            height_cm: 100,
            material: Material::Pvc,
            profile: Profile::VekaSoftline70,
            glass: GlassType::Double,
            color: "Blanco".to_string(),
            has_grilles: false,
        }
    }
}

impl WindowConfig {
    /// Merge an AI-extracted partial configuration over this one.
    ///
    /// Returned fields overwrite; absent fields are left untouched.
    pub fn merge(&mut self, partial: PartialWindowConfig) {
        if let Some(window_type) = partial.window_type {
            self.window_type = window_type;
        }
        if let Some(width_cm) = partial.width_cm {
            self.width_cm = width_cm;
        }
        if let Some(height_cm) = partial.height_cm {
            self.height_cm = height_cm;
        }
        if let Some(material) = partial.material {
            self.material = material;
        }
        if let Some(profile) = partial.profile {
            self.profile = profile;
        }
        if let Some(glass) = partial.glass {
            self.glass = glass;
        }
        if let Some(color) = partial.color {
            self.color = color;
        }
        if let Some(has_grilles) = partial.has_grilles {
            self.has_grilles = has_grilles;
        }
    }

    /// One-line description used on cart and invoice rows,
    /// e.g. "Corredera de PVC".
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} de {}", self.window_type, self.material)
    }

    /// Detail line used on cart and invoice rows.
    #[must_use]
    pub fn detail(&self) -> String {
        let grilles = if self.has_grilles {
            " | Con cuarterones"
        } else {
            ""
        };
        format!(
            "{}cm x {}cm | {} | {} | Color: {}{}",
            self.width_cm, self.height_cm, self.profile, self.glass, self.color, grilles
        )
    }
}

/// A partial window configuration, as returned by the AI extraction backend.
///
/// Any subset of fields may be present. Deserialization is lenient: a field
/// holding an unrecognized enum value (or the wrong JSON type) becomes
/// `None` rather than failing the whole document, so a sloppy extraction
/// never takes the configurator down.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialWindowConfig {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub window_type: Option<WindowType>,
    #[serde(
        rename = "width",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub width_cm: Option<u32>,
    #[serde(
        rename = "height",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub height_cm: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub material: Option<Material>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub profile: Option<Profile>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub glass: Option<GlassType>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub color: Option<String>,
    #[serde(
        rename = "hasGrilles",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub has_grilles: Option<bool>,
}

/// Deserialize a value, mapping any failure to `None` instead of an error.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}
