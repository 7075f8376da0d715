use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Portion units accepted when logging food.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PortionUnit {
    Gram,
    Ml,
    Serving,
    Piece,
    Small,
    Medium,
    Large,
    Cup,
    Bowl,
    Slice,
    Handful,
    Tbsp,
    Tsp,
}

impl PortionUnit {
    pub const ALL: [PortionUnit; 13] = [
        PortionUnit::Gram,
        PortionUnit::Ml,
        PortionUnit::Serving,
        PortionUnit::Piece,
        PortionUnit::Small,
        PortionUnit::Medium,
        PortionUnit::Large,
        PortionUnit::Cup,
        PortionUnit::Bowl,
        PortionUnit::Slice,
        PortionUnit::Handful,
        PortionUnit::Tbsp,
        PortionUnit::Tsp,
    ];

    /// Grams represented by one unit. `None` for gram and ml, where the
    /// quantity is already a weight (ml is taken 1:1 with grams).
    pub fn base_grams(self) -> Option<f64> {
        match self {
            PortionUnit::Gram | PortionUnit::Ml => None,
            PortionUnit::Serving => Some(100.0),
            PortionUnit::Piece => Some(50.0),
            PortionUnit::Small => Some(80.0),
            PortionUnit::Medium => Some(150.0),
            PortionUnit::Large => Some(250.0),
            PortionUnit::Cup => Some(240.0),
            PortionUnit::Bowl => Some(300.0),
            PortionUnit::Slice => Some(30.0),
            PortionUnit::Handful => Some(30.0),
            PortionUnit::Tbsp => Some(15.0),
            PortionUnit::Tsp => Some(5.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PortionUnit::Gram => "gram",
            PortionUnit::Ml => "ml",
            PortionUnit::Serving => "serving",
            PortionUnit::Piece => "piece",
            PortionUnit::Small => "small",
            PortionUnit::Medium => "medium",
            PortionUnit::Large => "large",
            PortionUnit::Cup => "cup",
            PortionUnit::Bowl => "bowl",
            PortionUnit::Slice => "slice",
            PortionUnit::Handful => "handful",
            PortionUnit::Tbsp => "tbsp",
            PortionUnit::Tsp => "tsp",
        }
    }
}

impl fmt::Display for PortionUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PortionUnit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = match s.trim().to_lowercase().as_str() {
            "g" | "gram" | "grams" => PortionUnit::Gram,
            "ml" | "milliliter" | "milliliters" => PortionUnit::Ml,
            "serving" | "servings" => PortionUnit::Serving,
            "piece" | "pieces" => PortionUnit::Piece,
            "small" => PortionUnit::Small,
            "medium" => PortionUnit::Medium,
            "large" => PortionUnit::Large,
            "cup" | "cups" => PortionUnit::Cup,
            "bowl" | "bowls" => PortionUnit::Bowl,
            "slice" | "slices" => PortionUnit::Slice,
            "handful" | "handfuls" => PortionUnit::Handful,
            "tbsp" => PortionUnit::Tbsp,
            "tsp" => PortionUnit::Tsp,
            _ => return Err(CoreError::InvalidUnit(s.to_string())),
        };
        Ok(unit)
    }
}

/// Convert a portion to grams. Quantity and the resulting weight must be
/// finite, and quantity positive.
pub fn grams_for(unit: PortionUnit, quantity: f64) -> Result<f64, CoreError> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(CoreError::InvalidQuantity(quantity));
    }
    let grams = match unit.base_grams() {
        Some(base) => quantity * base,
        None => quantity,
    };
    if !grams.is_finite() {
        return Err(CoreError::InvalidQuantity(quantity));
    }
    Ok(grams)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cup_and_piece_conversions() {
        assert_eq!(grams_for(PortionUnit::Cup, 1.0).unwrap(), 240.0);
        assert_eq!(grams_for(PortionUnit::Piece, 2.0).unwrap(), 100.0);
        assert_eq!(grams_for(PortionUnit::Bowl, 0.5).unwrap(), 150.0);
    }

    #[test]
    fn gram_and_ml_pass_through() {
        assert_eq!(grams_for(PortionUnit::Gram, 150.0).unwrap(), 150.0);
        assert_eq!(grams_for(PortionUnit::Ml, 330.0).unwrap(), 330.0);
    }

    #[test]
    fn rejects_non_positive_quantity() {
        assert_eq!(
            grams_for(PortionUnit::Serving, 0.0),
            Err(CoreError::InvalidQuantity(0.0))
        );
        assert_eq!(
            grams_for(PortionUnit::Gram, -3.0),
            Err(CoreError::InvalidQuantity(-3.0))
        );
        assert!(grams_for(PortionUnit::Gram, f64::NAN).is_err());
    }

    #[test]
    fn rejects_quantity_whose_weight_overflows() {
        assert_eq!(
            grams_for(PortionUnit::Bowl, 1e307),
            Err(CoreError::InvalidQuantity(1e307))
        );
        assert_eq!(grams_for(PortionUnit::Gram, 1e307).unwrap(), 1e307);
    }

    #[test]
    fn parses_units_and_aliases() {
        assert_eq!("cup".parse::<PortionUnit>().unwrap(), PortionUnit::Cup);
        assert_eq!(" Slices ".parse::<PortionUnit>().unwrap(), PortionUnit::Slice);
        assert_eq!("g".parse::<PortionUnit>().unwrap(), PortionUnit::Gram);
        assert_eq!("milliliters".parse::<PortionUnit>().unwrap(), PortionUnit::Ml);
    }

    #[test]
    fn unknown_unit_is_rejected() {
        assert_eq!(
            "foobar".parse::<PortionUnit>(),
            Err(CoreError::InvalidUnit("foobar".into()))
        );
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for unit in PortionUnit::ALL {
            assert_eq!(unit.to_string().parse::<PortionUnit>().unwrap(), unit);
        }
    }
}
