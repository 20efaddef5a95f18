//! Material property form model and its conversion to the wire payload.

use serde::{Deserialize, Serialize};

/// Number of material properties collected by the form.
pub const FIELD_COUNT: usize = 6;

/// Values restored on launch and on reset, in [`MaterialField::ALL`] order.
pub const DEFAULT_VALUES: [&str; FIELD_COUNT] = ["450", "275", "198000", "77000", "0.29", "7820"];

/// One of the six mechanical properties sent to the predictor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaterialField {
    /// Ultimate tensile strength.
    UltimateStrength,
    /// Yield strength.
    YieldStrength,
    /// Young's modulus.
    ElasticModulus,
    /// Shear modulus.
    ShearModulus,
    /// Poisson's ratio.
    PoissonRatio,
    /// Density.
    Density,
}

impl MaterialField {
    /// All fields in display order.
    pub const ALL: [MaterialField; FIELD_COUNT] = [
        Self::UltimateStrength,
        Self::YieldStrength,
        Self::ElasticModulus,
        Self::ShearModulus,
        Self::PoissonRatio,
        Self::Density,
    ];

    /// JSON key used by the prediction service.
    pub fn key(self) -> &'static str {
        match self {
            Self::UltimateStrength => "Su",
            Self::YieldStrength => "Sy",
            Self::ElasticModulus => "E",
            Self::ShearModulus => "G",
            Self::PoissonRatio => "mu",
            Self::Density => "Ro",
        }
    }

    /// Label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Self::UltimateStrength => "Ultimate Strength (Su)",
            Self::YieldStrength => "Yield Strength (Sy)",
            Self::ElasticModulus => "Elastic Modulus (E)",
            Self::ShearModulus => "Shear Modulus (G)",
            Self::PoissonRatio => "Poisson Ratio (mu)",
            Self::Density => "Density (Ro)",
        }
    }

    /// Look up a field by its JSON key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Raised when a field's text cannot be sent as a number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} must be a number.", .field.label())]
pub struct InvalidInput {
    /// Field holding the bad value.
    pub field: MaterialField,
    /// The text that failed to parse.
    pub value: String,
}

/// Text values of all six fields, exactly as typed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormInputs {
    values: [String; FIELD_COUNT],
    defaults: [&'static str; FIELD_COUNT],
}

impl Default for FormInputs {
    fn default() -> Self {
        Self::with_defaults(DEFAULT_VALUES)
    }
}

impl FormInputs {
    /// Build inputs that start at, and reset to, `defaults`.
    pub fn with_defaults(defaults: [&'static str; FIELD_COUNT]) -> Self {
        Self {
            values: defaults.map(str::to_string),
            defaults,
        }
    }

    /// Current text of a field.
    pub fn get(&self, field: MaterialField) -> &str {
        &self.values[field.index()]
    }

    /// Overwrite one field, leaving the others untouched.
    pub fn set_field(&mut self, field: MaterialField, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    /// Mutable access for in-place text editing.
    pub fn field_mut(&mut self, field: MaterialField) -> &mut String {
        &mut self.values[field.index()]
    }

    /// Restore every field to its default text.
    pub fn reset(&mut self) {
        self.values = self.defaults.map(str::to_string);
    }

    /// True when every field still holds its default text.
    pub fn is_default(&self) -> bool {
        self.values
            .iter()
            .zip(self.defaults.iter())
            .all(|(value, default)| value == default)
    }

    /// Convert all fields to numbers, failing on the first one that does not parse.
    pub fn to_properties(&self) -> Result<MaterialProperties, InvalidInput> {
        let mut numbers = [0.0; FIELD_COUNT];
        for field in MaterialField::ALL {
            numbers[field.index()] = parse_number(field, self.get(field))?;
        }
        let [su, sy, e, g, mu, ro] = numbers;
        Ok(MaterialProperties {
            su,
            sy,
            e,
            g,
            mu,
            ro,
        })
    }
}

fn parse_number(field: MaterialField, text: &str) -> Result<f64, InvalidInput> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| InvalidInput {
            field,
            value: text.to_string(),
        })
}

/// Numeric request body for `POST /predict`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    #[serde(rename = "Su")]
    pub su: f64,
    #[serde(rename = "Sy")]
    pub sy: f64,
    #[serde(rename = "E")]
    pub e: f64,
    #[serde(rename = "G")]
    pub g: f64,
    pub mu: f64,
    #[serde(rename = "Ro")]
    pub ro: f64,
}

impl MaterialProperties {
    /// Value for one field.
    pub fn value(&self, field: MaterialField) -> f64 {
        match field {
            MaterialField::UltimateStrength => self.su,
            MaterialField::YieldStrength => self.sy,
            MaterialField::ElasticModulus => self.e,
            MaterialField::ShearModulus => self.g,
            MaterialField::PoissonRatio => self.mu,
            MaterialField::Density => self.ro,
        }
    }
}
