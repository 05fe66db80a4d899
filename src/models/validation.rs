//! Ingredient validation errors

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

/// A single reason an ingredient record was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Name must be at least {min} characters long (got {len})")]
    NameTooShort { len: usize, min: usize },

    #[error("Name must be at most {max} characters long (got {len})")]
    NameTooLong { len: usize, max: usize },

    #[error("Field '{field}' is required")]
    MissingField { field: &'static str },

    #[error("Field '{field}' must not be negative (got {value})")]
    Negative { field: &'static str, value: Decimal },

    #[error("Field '{field}' must not exceed {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: Decimal,
        max: Decimal,
    },

    #[error("'{part}' ({part_value}) cannot be greater than '{total}' ({total_value})")]
    SubsetExceedsTotal {
        part: &'static str,
        part_value: Decimal,
        total: &'static str,
        total_value: Decimal,
    },

    #[error("Field '{field}' is too large to calculate with")]
    Overflow { field: &'static str },

    #[error(
        "The total energy ({energy}kcal) is not the approximate sum of the energy \
         provided by protein, carbohydrates and fat ({calculated}kcal)"
    )]
    EnergyMismatch { energy: Decimal, calculated: Decimal },
}

/// Every problem found by a full record validation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn contains(&self, predicate: impl Fn(&ValidationError) -> bool) -> bool {
        self.0.iter().any(predicate)
    }

    /// `Ok(())` when nothing was collected
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}
