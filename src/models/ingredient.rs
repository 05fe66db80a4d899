//! Ingredient model
//!
//! A food item with macro-nutrient values per 100 g, licensing metadata and a
//! review status. Storage belongs to the embedding application; this module
//! owns creation, editing and validation of the plain record.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::validation::{ValidationError, ValidationErrors};
use crate::nutrition::energy::validate_energy;

pub const NAME_MIN_LENGTH: usize = 3;
pub const NAME_MAX_LENGTH: usize = 200;

/// Upper bound for gram-based values in a 100 g portion
const MAX_GRAMS_PER_100G: Decimal = Decimal::ONE_HUNDRED;

/// Upper bound for energy in a 100 g portion; pure fat is 900 kcal
pub const MAX_ENERGY_PER_100G: Decimal = Decimal::ONE_THOUSAND;

/// Review status of an ingredient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IngredientStatus {
    #[default]
    Pending,
    Accepted,
}

impl IngredientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientStatus::Pending => "pending",
            IngredientStatus::Accepted => "accepted",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "accepted" => IngredientStatus::Accepted,
            _ => IngredientStatus::Pending,
        }
    }
}

/// Trust level of whoever submits an ingredient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitterTier {
    /// Editors and other trusted users; submissions go live immediately
    Trusted,
    /// Everyone else; submissions wait for review
    Untrusted,
}

impl SubmitterTier {
    pub fn initial_status(&self) -> IngredientStatus {
        match self {
            SubmitterTier::Trusted => IngredientStatus::Accepted,
            SubmitterTier::Untrusted => IngredientStatus::Pending,
        }
    }
}

/// An ingredient with nutritional information per 100 g
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: Option<i64>,
    pub name: String,
    /// kcal
    pub energy: Option<Decimal>,
    pub protein: Option<Decimal>,
    pub carbohydrates: Option<Decimal>,
    pub carbohydrates_sugar: Option<Decimal>,
    pub fat: Option<Decimal>,
    pub fat_saturated: Option<Decimal>,
    pub fibres: Option<Decimal>,
    pub sodium: Option<Decimal>,
    pub status: IngredientStatus,
    pub license_id: i64,
    pub license_author: Option<String>,
    pub creation_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

/// Data for submitting a new ingredient
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngredientCreate {
    pub name: String,
    pub energy: Option<Decimal>,
    pub protein: Option<Decimal>,
    pub carbohydrates: Option<Decimal>,
    #[serde(default)]
    pub carbohydrates_sugar: Option<Decimal>,
    pub fat: Option<Decimal>,
    #[serde(default)]
    pub fat_saturated: Option<Decimal>,
    #[serde(default, alias = "fiber")]
    pub fibres: Option<Decimal>,
    #[serde(default)]
    pub sodium: Option<Decimal>,
    #[serde(alias = "license")]
    pub license_id: i64,
    #[serde(default)]
    pub license_author: Option<String>,
}

/// Data for editing an ingredient
///
/// `None` leaves a field untouched. Nutrient fields are doubly optional so an
/// edit can also clear an optional value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngredientUpdate {
    pub name: Option<String>,
    pub energy: Option<Option<Decimal>>,
    pub protein: Option<Option<Decimal>>,
    pub carbohydrates: Option<Option<Decimal>>,
    pub carbohydrates_sugar: Option<Option<Decimal>>,
    pub fat: Option<Option<Decimal>>,
    pub fat_saturated: Option<Option<Decimal>>,
    pub fibres: Option<Option<Decimal>>,
    pub sodium: Option<Option<Decimal>>,
    pub license_id: Option<i64>,
    pub license_author: Option<Option<String>>,
}

impl Ingredient {
    /// Validate a submission and build the record, stamped with the current time
    pub fn create(data: IngredientCreate, submitter: SubmitterTier) -> Result<Self, ValidationErrors> {
        Self::create_at(data, submitter, Utc::now())
    }

    /// Same as [`Ingredient::create`] with an explicit clock
    pub fn create_at(
        data: IngredientCreate,
        submitter: SubmitterTier,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationErrors> {
        let ingredient = Self {
            id: None,
            name: data.name,
            energy: data.energy,
            protein: data.protein,
            carbohydrates: data.carbohydrates,
            carbohydrates_sugar: data.carbohydrates_sugar,
            fat: data.fat,
            fat_saturated: data.fat_saturated,
            fibres: data.fibres,
            sodium: data.sodium,
            status: submitter.initial_status(),
            license_id: data.license_id,
            license_author: data.license_author,
            creation_date: now,
            update_date: now,
        };
        ingredient.validate()?;
        Ok(ingredient)
    }

    /// Apply an edit, stamped with the current time
    pub fn apply_update(&mut self, data: &IngredientUpdate) -> Result<(), ValidationErrors> {
        self.apply_update_at(data, Utc::now())
    }

    /// Apply an edit if the edited record still validates
    ///
    /// On failure the record, including `update_date`, is left as it was.
    pub fn apply_update_at(
        &mut self,
        data: &IngredientUpdate,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationErrors> {
        let mut edited = self.clone();

        macro_rules! apply {
            ($field:ident) => {
                if let Some(ref val) = data.$field {
                    edited.$field = val.clone();
                }
            };
        }

        apply!(name);
        apply!(energy);
        apply!(protein);
        apply!(carbohydrates);
        apply!(carbohydrates_sugar);
        apply!(fat);
        apply!(fat_saturated);
        apply!(fibres);
        apply!(sodium);
        apply!(license_id);
        apply!(license_author);

        edited.validate()?;
        edited.update_date = now;
        *self = edited;
        Ok(())
    }

    /// Mark a pending ingredient as reviewed
    pub fn accept(&mut self, now: DateTime<Utc>) {
        if self.status != IngredientStatus::Accepted {
            self.status = IngredientStatus::Accepted;
            self.update_date = now;
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == IngredientStatus::Pending
    }

    /// Full record validation, collecting every problem found
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name_len = self.name.trim().chars().count();
        if name_len < NAME_MIN_LENGTH {
            errors.push(ValidationError::NameTooShort {
                len: name_len,
                min: NAME_MIN_LENGTH,
            });
        } else if name_len > NAME_MAX_LENGTH {
            errors.push(ValidationError::NameTooLong {
                len: name_len,
                max: NAME_MAX_LENGTH,
            });
        }

        for (field, value, required) in self.nutrient_fields() {
            match value {
                None if required => errors.push(ValidationError::MissingField { field }),
                None => {}
                Some(v) if v.is_sign_negative() && !v.is_zero() => {
                    errors.push(ValidationError::Negative { field, value: v });
                }
                Some(v) => {
                    let max = if field == "energy" {
                        MAX_ENERGY_PER_100G
                    } else {
                        MAX_GRAMS_PER_100G
                    };
                    if v > max {
                        errors.push(ValidationError::OutOfRange { field, value: v, max });
                    }
                }
            }
        }

        if let (Some(sugar), Some(carbohydrates)) = (self.carbohydrates_sugar, self.carbohydrates) {
            if sugar > carbohydrates {
                errors.push(ValidationError::SubsetExceedsTotal {
                    part: "carbohydrates_sugar",
                    part_value: sugar,
                    total: "carbohydrates",
                    total_value: carbohydrates,
                });
            }
        }

        if let (Some(saturated), Some(fat)) = (self.fat_saturated, self.fat) {
            if saturated > fat {
                errors.push(ValidationError::SubsetExceedsTotal {
                    part: "fat_saturated",
                    part_value: saturated,
                    total: "fat",
                    total_value: fat,
                });
            }
        }

        if let (Some(protein), Some(carbohydrates), Some(fat), Some(energy)) =
            (self.protein, self.carbohydrates, self.fat, self.energy)
        {
            if let Err(e) = validate_energy(protein, carbohydrates, fat, energy) {
                errors.push(e);
            }
        }

        errors.into_result()
    }

    /// (name, value, required) for every nutrient field
    fn nutrient_fields(&self) -> [(&'static str, Option<Decimal>, bool); 8] {
        [
            ("energy", self.energy, true),
            ("protein", self.protein, true),
            ("carbohydrates", self.carbohydrates, true),
            ("carbohydrates_sugar", self.carbohydrates_sugar, false),
            ("fat", self.fat, true),
            ("fat_saturated", self.fat_saturated, false),
            ("fibres", self.fibres, false),
            ("sodium", self.sodium, false),
        ]
    }
}

/// Domain equality: same name and identical nutrient values
impl PartialEq for Ingredient {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.nutrient_fields() == other.nutrient_fields()
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
