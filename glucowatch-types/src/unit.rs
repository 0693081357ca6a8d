//! Display units and mg/dL to mmol/L conversion.

use std::fmt;
use std::str::FromStr;

/// Conversion factor from mg/dL to mmol/L.
pub const MGDL_PER_MMOL: f64 = 18.0156;

/// Unit used to render glucose values.
///
/// The feed always reports values in mg/dL; conversion happens only at
/// display time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "mg/dL"))]
    MgPerDl,
    #[cfg_attr(feature = "serde", serde(rename = "mmol/L"))]
    MmolPerL,
}

impl Unit {
    /// Returns the conventional label for this unit.
    pub fn label(&self) -> &'static str {
        match self {
            Unit::MgPerDl => "mg/dL",
            Unit::MmolPerL => "mmol/L",
        }
    }

    /// Convert a glucose value for display.
    ///
    /// mg/dL values pass through with no decimals; mmol/L values are divided
    /// by [`MGDL_PER_MMOL`] and shown with one decimal.
    pub fn display_glucose(&self, mgdl: f64) -> DisplayValue {
        match self {
            Unit::MgPerDl => DisplayValue { value: mgdl, precision: 0 },
            Unit::MmolPerL => DisplayValue {
                value: mgdl / MGDL_PER_MMOL,
                precision: 1,
            },
        }
    }

    /// Convert a delta value for display.
    ///
    /// Deltas carry more precision than glucose values: two decimals in
    /// mmol/L. Callers must use this for deltas rather than
    /// [`Unit::display_glucose`].
    pub fn display_delta(&self, mgdl: f64) -> DisplayValue {
        match self {
            Unit::MgPerDl => DisplayValue { value: mgdl, precision: 0 },
            Unit::MmolPerL => DisplayValue {
                value: mgdl / MGDL_PER_MMOL,
                precision: 2,
            },
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mg/dL" | "mg/dl" | "mgdl" => Ok(Unit::MgPerDl),
            "mmol/L" | "mmol/l" | "mmol" => Ok(Unit::MmolPerL),
            other => Err(format!("unknown unit '{other}' (expected mg/dL or mmol/L)")),
        }
    }
}

/// A value converted for display, carrying its rounding precision.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayValue {
    /// The value in the display unit.
    pub value: f64,
    /// Number of decimal places to render.
    pub precision: usize,
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.*}", self.precision, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mgdl_passes_through_with_no_decimals() {
        let v = Unit::MgPerDl.display_glucose(85.0);
        assert_eq!(v.precision, 0);
        assert_eq!(v.to_string(), "85");

        let d = Unit::MgPerDl.display_delta(20.0);
        assert_eq!(d.precision, 0);
        assert_eq!(d.to_string(), "20");
    }

    #[test]
    fn mmol_glucose_rounds_to_one_decimal() {
        // 85 / 18.0156 = 4.718...
        let v = Unit::MmolPerL.display_glucose(85.0);
        assert_eq!(v.precision, 1);
        assert_eq!(v.to_string(), "4.7");
    }

    #[test]
    fn mmol_delta_rounds_to_two_decimals() {
        // 20 / 18.0156 = 1.1101...
        let d = Unit::MmolPerL.display_delta(20.0);
        assert_eq!(d.precision, 2);
        assert_eq!(d.to_string(), "1.11");
    }

    #[test]
    fn labels() {
        assert_eq!(Unit::MgPerDl.label(), "mg/dL");
        assert_eq!(Unit::MmolPerL.label(), "mmol/L");
        assert_eq!(Unit::MmolPerL.to_string(), "mmol/L");
    }

    #[test]
    fn parse_from_str() {
        assert_eq!("mg/dL".parse::<Unit>().unwrap(), Unit::MgPerDl);
        assert_eq!("mmol/L".parse::<Unit>().unwrap(), Unit::MmolPerL);
        assert!("miles".parse::<Unit>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_conventional_labels() {
        assert_eq!(serde_json::to_string(&Unit::MgPerDl).unwrap(), "\"mg/dL\"");
        let unit: Unit = serde_json::from_str("\"mmol/L\"").unwrap();
        assert_eq!(unit, Unit::MmolPerL);
    }
}
