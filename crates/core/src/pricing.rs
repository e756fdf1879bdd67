//! The quote engine.
//!
//! A pure function from a window configuration to a VAT-inclusive price,
//! over a set of multiplier tables. Computation stays in full `f64`
//! precision; rounding to cents happens only at display time so that the
//! invoice's subtotal/VAT decomposition reconciles exactly.

use crate::types::{GlassType, Material, Profile, WindowConfig, WindowType};

/// Spanish VAT rate applied to every quote.
pub const DEFAULT_VAT_RATE: f64 = 0.21;

/// Multiplier tables driving the quote engine.
///
/// Each table is a fixed-size array indexed by the enum's ordinal
/// ([`Material::index`] and friends), so a missing entry is unrepresentable.
/// Entry order must match the enum's `ALL` order.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingTables {
    /// Flat base price of any window, in euros before VAT.
    pub base_price: f64,
    /// Per-square-meter rate by material, indexed by [`Material::index`].
    pub per_square_meter: [f64; Material::COUNT],
    /// Glazing multiplier, indexed by [`GlassType::index`].
    pub glass_multiplier: [f64; GlassType::COUNT],
    /// Opening-mechanism multiplier, indexed by [`WindowType::index`].
    pub type_multiplier: [f64; WindowType::COUNT],
    /// Profile-system multiplier, indexed by [`Profile::index`].
    pub profile_multiplier: [f64; Profile::COUNT],
    /// Flat surcharge for grilles, in euros before VAT. Added after all
    /// multipliers; never scaled by area or type.
    pub grilles_surcharge: f64,
}

impl Default for PricingTables {
    fn default() -> Self {
        Self {
            base_price: 90.0,
            // Pvc, Aluminum, Wood
            per_square_meter: [240.81, 288.97, 402.15],
            // Double, Triple, Tempered, Laminated
            glass_multiplier: [1.3, 1.5, 1.6, 1.8],
            // Sliding, Casement, Fixed, TiltAndTurn, OsciloParalela
            type_multiplier: [1.0, 1.1, 0.8, 1.4, 1.6],
            // VekaSoftline70, VekaSoftline82
            profile_multiplier: [1.0, 1.25],
            grilles_surcharge: 135.0,
        }
    }
}

impl PricingTables {
    /// Per-square-meter rate for a material.
    #[must_use]
    pub fn per_square_meter(&self, material: Material) -> f64 {
        self.per_square_meter[material.index()]
    }

    /// Multiplier for a glazing type.
    #[must_use]
    pub fn glass_multiplier(&self, glass: GlassType) -> f64 {
        self.glass_multiplier[glass.index()]
    }

    /// Multiplier for an opening mechanism.
    #[must_use]
    pub fn type_multiplier(&self, window_type: WindowType) -> f64 {
        self.type_multiplier[window_type.index()]
    }

    /// Multiplier for a profile system.
    #[must_use]
    pub fn profile_multiplier(&self, profile: Profile) -> f64 {
        self.profile_multiplier[profile.index()]
    }
}

/// Quote a configuration: the final, VAT-inclusive price in euros.
///
/// The order of operations is part of the contract; invoice totals stored on
/// cart lines are reproduced from it, so reordering the multiplications
/// would shift cents on existing quotes.
#[must_use]
pub fn quote(config: &WindowConfig, tables: &PricingTables, vat_rate: f64) -> f64 {
    let area_m2 = (f64::from(config.width_cm) / 100.0) * (f64::from(config.height_cm) / 100.0);

    let mut subtotal = tables.base_price + area_m2 * tables.per_square_meter(config.material);
    subtotal *= tables.glass_multiplier(config.glass);
    subtotal *= tables.type_multiplier(config.window_type);
    subtotal *= tables.profile_multiplier(config.profile);
    if config.has_grilles {
        subtotal += tables.grilles_surcharge;
    }

    subtotal * (1.0 + vat_rate)
}

/// Format an amount for display, e.g. "596.12 €".
///
/// This is the only place amounts get rounded to cents.
#[must_use]
pub fn display_eur(amount: f64) -> String {
    format!("{amount:.2} €")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> WindowConfig {
        WindowConfig {
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

    #[test]
    fn test_reference_quote() {
        // 90 + 1.2 * 240.81 = 378.972, x1.3 = 492.6636, x1.0 x1.0, x1.21
        let price = quote(&base_config(), &PricingTables::default(), DEFAULT_VAT_RATE);
        assert!((price - 596.122_956).abs() < 1e-9);
        assert_eq!(display_eur(price), "596.12 €");
    }

    #[test]
    fn test_grilles_surcharge_added_after_multipliers() {
        let config = WindowConfig {
            has_grilles: true,
            ..base_config()
        };
        // (492.6636 + 135) * 1.21
        let price = quote(&config, &PricingTables::default(), DEFAULT_VAT_RATE);
        assert!((price - 759.472_956).abs() < 1e-9);
        assert_eq!(display_eur(price), "759.47 €");

        let without = quote(&base_config(), &PricingTables::default(), DEFAULT_VAT_RATE);
        assert!((price - without - 135.0 * 1.21).abs() < 1e-9);
    }

    #[test]
    fn test_quote_is_deterministic() {
        let config = base_config();
        let tables = PricingTables::default();
        let first = quote(&config, &tables, DEFAULT_VAT_RATE);
        for _ in 0..10 {
            assert_eq!(quote(&config, &tables, DEFAULT_VAT_RATE), first);
        }
    }

    #[test]
    fn test_quote_monotonic_in_dimensions() {
        let tables = PricingTables::default();
        let mut previous = 0.0;
        for width in (50..=300).step_by(10) {
            let config = WindowConfig {
                width_cm: width,
                ..base_config()
            };
            let price = quote(&config, &tables, DEFAULT_VAT_RATE);
            assert!(price >= previous, "price dropped at width {width}");
            previous = price;
        }

        previous = 0.0;
        for height in (50..=250).step_by(10) {
            let config = WindowConfig {
                height_cm: height,
                ..base_config()
            };
            let price = quote(&config, &tables, DEFAULT_VAT_RATE);
            assert!(price >= previous, "price dropped at height {height}");
            previous = price;
        }
    }

    #[test]
    fn test_material_ordering() {
        let tables = PricingTables::default();
        let pvc = quote(&base_config(), &tables, DEFAULT_VAT_RATE);
        let aluminum = quote(
            &WindowConfig {
                material: Material::Aluminum,
                ..base_config()
            },
            &tables,
            DEFAULT_VAT_RATE,
        );
        let wood = quote(
            &WindowConfig {
                material: Material::Wood,
                ..base_config()
            },
            &tables,
            DEFAULT_VAT_RATE,
        );
        assert!(pvc < aluminum && aluminum < wood);
    }

    #[test]
    fn test_fixed_windows_cheaper_than_sliding() {
        let tables = PricingTables::default();
        let sliding = quote(&base_config(), &tables, DEFAULT_VAT_RATE);
        let fixed = quote(
            &WindowConfig {
                window_type: WindowType::Fixed,
                ..base_config()
            },
            &tables,
            DEFAULT_VAT_RATE,
        );
        assert!(fixed < sliding);
        assert!((fixed / sliding - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_table_lookups_match_defaults() {
        let tables = PricingTables::default();
        assert!((tables.per_square_meter(Material::Wood) - 402.15).abs() < f64::EPSILON);
        assert!((tables.glass_multiplier(GlassType::Laminated) - 1.8).abs() < f64::EPSILON);
        assert!((tables.type_multiplier(WindowType::OsciloParalela) - 1.6).abs() < f64::EPSILON);
        assert!((tables.profile_multiplier(Profile::VekaSoftline82) - 1.25).abs() < f64::EPSILON);
    }
}
