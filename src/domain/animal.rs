//! Animal domain entity and related types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::config::{breeding_min_weight, SEX_FEMALE, SEX_MALE};

/// Animal sex enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Female,
    Male,
}

impl From<&str> for Sex {
    fn from(s: &str) -> Self {
        match s {
            SEX_FEMALE => Sex::Female,
            _ => Sex::Male,
        }
    }
}

impl From<Sex> for String {
    fn from(sex: Sex) -> Self {
        match sex {
            Sex::Female => SEX_FEMALE.to_string(),
            Sex::Male => SEX_MALE.to_string(),
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sex::Female => write!(f, "{}", SEX_FEMALE),
            Sex::Male => write!(f, "{}", SEX_MALE),
        }
    }
}

/// Animal domain entity.
///
/// Rows are never physically deleted; `active` governs visibility in the
/// default listings and tag lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animal {
    pub id: i32,
    /// Identification tag, unique across the whole registry (active or not)
    pub tag_number: String,
    pub breed: String,
    pub birth_date: NaiveDate,
    pub sex: Sex,
    pub weight: Decimal,
    pub health_status: String,
    pub active: bool,
}

impl Animal {
    /// Whether this animal can be registered as a mother in a birth:
    /// active, female and at or above the breeding weight threshold.
    pub fn is_breeding_eligible(&self) -> bool {
        self.active && self.sex == Sex::Female && self.weight >= breeding_min_weight()
    }
}

/// Data for registering a new animal
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
pub struct NewAnimal {
    #[validate(length(min = 1, max = 20, message = "tag number is required"))]
    pub tag_number: String,
    #[validate(length(min = 1, max = 50, message = "breed is required"))]
    pub breed: String,
    pub birth_date: NaiveDate,
    pub sex: Sex,
    #[validate(custom(function = "validate_positive_weight"))]
    pub weight: Decimal,
    #[validate(length(
        min = 1,
        max = 50,
        message = "health status is required"
    ))]
    pub health_status: String,
}

/// Full replacement of an animal's mutable attributes.
///
/// The identification tag is immutable after registration and is therefore
/// not part of this set.
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
pub struct AnimalChanges {
    #[validate(length(min = 1, max = 50, message = "breed is required"))]
    pub breed: String,
    pub birth_date: NaiveDate,
    pub sex: Sex,
    #[validate(custom(function = "validate_positive_weight"))]
    pub weight: Decimal,
    #[validate(length(
        min = 1,
        max = 50,
        message = "health status is required"
    ))]
    pub health_status: String,
}

fn validate_positive_weight(weight: &Decimal) -> Result<(), ValidationError> {
    if *weight > Decimal::ZERO {
        Ok(())
    } else {
        let mut err = ValidationError::new("weight");
        err.message = Some("weight must be greater than zero".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ewe(weight: Decimal) -> Animal {
        Animal {
            id: 1,
            tag_number: "OVE001".to_string(),
            breed: "Merino".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2022, 3, 1).unwrap(),
            sex: Sex::Female,
            weight,
            health_status: "Healthy".to_string(),
            active: true,
        }
    }

    #[test]
    fn test_breeding_threshold_is_inclusive() {
        assert!(!ewe(Decimal::new(2999, 2)).is_breeding_eligible()); // 29.99 kg
        assert!(ewe(Decimal::new(3000, 2)).is_breeding_eligible()); // 30.00 kg
    }

    #[test]
    fn test_males_and_inactive_are_not_eligible() {
        let mut ram = ewe(Decimal::new(4000, 2));
        ram.sex = Sex::Male;
        assert!(!ram.is_breeding_eligible());

        let mut retired = ewe(Decimal::new(4000, 2));
        retired.active = false;
        assert!(!retired.is_breeding_eligible());
    }

    #[test]
    fn test_new_animal_rejects_zero_weight() {
        let animal = NewAnimal {
            tag_number: "OVE001".to_string(),
            breed: "Merino".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2022, 3, 1).unwrap(),
            sex: Sex::Female,
            weight: Decimal::ZERO,
            health_status: "Healthy".to_string(),
        };
        assert!(animal.validate().is_err());
    }

    #[test]
    fn test_sex_round_trip() {
        assert_eq!(Sex::from("female"), Sex::Female);
        assert_eq!(Sex::from("male"), Sex::Male);
        assert_eq!(String::from(Sex::Female), "female");
    }
}
