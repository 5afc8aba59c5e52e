use std::fmt::Display;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

pub mod session;
pub mod store;
pub mod summary;
pub mod view;

pub type RecordId = u64;

/// One expense entry. Instances only come out of [`store::RecordStore`],
/// which assigns the id and runs every field through [`RecordDraft::validate`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    pub id: RecordId,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
}

impl Record {
    /// Field values for form pre-fill when this record is being edited.
    pub fn draft(&self) -> RecordDraft {
        RecordDraft {
            description: self.description.clone(),
            amount: format!("{:.2}", self.amount),
            category: self.category.clone(),
        }
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} ({}) {:.2}",
            self.id, self.description, self.category, self.amount
        )
    }
}

/// Raw form input, exactly as the user typed it. The amount stays text
/// until validation so a bad number is a validation failure, not a crash.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDraft {
    pub description: String,
    pub amount: String,
    pub category: String,
}

impl RecordDraft {
    pub fn new(
        description: impl Into<String>,
        amount: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            amount: amount.into(),
            category: category.into(),
        }
    }

    /// Checks fields in form order: description, amount, category.
    /// Surrounding whitespace is trimmed before the checks and before storage.
    pub fn validate(&self) -> Result<ValidRecord, ValidationError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        let raw_amount = self.amount.trim();
        let amount = Decimal::from_str(raw_amount)
            .map_err(|_| ValidationError::AmountNotNumeric(raw_amount.to_string()))?;
        if amount <= Decimal::ZERO {
            return Err(ValidationError::AmountNotPositive(amount));
        }
        let category = self.category.trim();
        if category.is_empty() {
            return Err(ValidationError::EmptyCategory);
        }
        Ok(ValidRecord {
            description: description.to_string(),
            amount,
            category: category.to_string(),
        })
    }
}

/// Validated field values, the only shape the store accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRecord {
    pub description: String,
    pub amount: Decimal,
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_draft() {
        let fields = RecordDraft::new("Coffee", "4.50", "Food").validate().unwrap();
        assert_eq!(fields.description, "Coffee");
        assert_eq!(fields.amount, Decimal::new(450, 2));
        assert_eq!(fields.category, "Food");
    }

    #[test]
    fn fields_are_trimmed() {
        let fields = RecordDraft::new("  Coffee ", " 4.50 ", " Food  ")
            .validate()
            .unwrap();
        assert_eq!(fields.description, "Coffee");
        assert_eq!(fields.category, "Food");
    }

    #[test]
    fn empty_description_rejected() {
        let err = RecordDraft::new("   ", "4.50", "Food").validate().unwrap_err();
        assert_eq!(err, ValidationError::EmptyDescription);
        assert_eq!(err.field(), "description");
    }

    #[test]
    fn empty_category_rejected() {
        let err = RecordDraft::new("Coffee", "4.50", " ").validate().unwrap_err();
        assert_eq!(err, ValidationError::EmptyCategory);
        assert_eq!(err.field(), "category");
    }

    #[test]
    fn non_numeric_amount_rejected() {
        let err = RecordDraft::new("Coffee", "lots", "Food").validate().unwrap_err();
        assert_eq!(err, ValidationError::AmountNotNumeric("lots".to_string()));
        assert_eq!(err.field(), "amount");
    }

    #[test]
    fn non_positive_amount_rejected() {
        let zero = RecordDraft::new("Coffee", "0", "Food").validate().unwrap_err();
        assert_eq!(zero, ValidationError::AmountNotPositive(Decimal::ZERO));
        let negative = RecordDraft::new("Coffee", "-2.50", "Food").validate().unwrap_err();
        assert_eq!(negative.field(), "amount");
    }

    #[test]
    fn draft_from_record_revalidates() {
        let record = Record {
            id: 7,
            description: "Bus".to_string(),
            amount: Decimal::new(200, 2),
            category: "Transport".to_string(),
        };
        let fields = record.draft().validate().unwrap();
        assert_eq!(fields.description, record.description);
        assert_eq!(fields.amount, record.amount);
        assert_eq!(fields.category, record.category);
    }
}
