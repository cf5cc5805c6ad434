// 🧾 Expense Records
// The record shape persisted under the `expenses` key, plus the
// validation boundary that turns raw user input into a NewExpense

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Category preselected by the entry form
pub const DEFAULT_CATEGORY: &str = "Food";

/// Suggested labels; any non-empty label is accepted
pub const CATEGORIES: [&str; 7] = [
    "Food",
    "Transport",
    "Entertainment",
    "Utilities",
    "Health",
    "Shopping",
    "Other",
];

// ============================================================================
// RECURRENCE
// ============================================================================

/// Recurrence marker. Carried and displayed, never scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recurrence {
    #[serde(rename = "monthly")]
    Monthly,
}

impl Recurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recurrence::Monthly => "monthly",
        }
    }
}

// ============================================================================
// EXPENSE
// ============================================================================

/// A stored expense entry
///
/// `id` is the only lookup key. It is assigned by the ledger and never
/// survives an edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub name: String,
    pub amount: f64,
    pub category: String,
    pub date: String,
    #[serde(default)]
    pub recurring: Option<Recurrence>,
}

impl Expense {
    pub fn is_recurring(&self) -> bool {
        self.recurring.is_some()
    }

    /// Field values without the identity, e.g. to pre-fill an edit
    pub fn fields(&self) -> NewExpense {
        NewExpense {
            name: self.name.clone(),
            amount: self.amount,
            category: self.category.clone(),
            date: self.date.clone(),
            recurring: self.recurring,
        }
    }
}

// ============================================================================
// NEW EXPENSE (validated input)
// ============================================================================

/// Everything an expense carries except its id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub name: String,
    pub amount: f64,
    pub category: String,
    pub date: String,
    #[serde(default)]
    pub recurring: Option<Recurrence>,
}

impl NewExpense {
    /// Parse raw form input
    ///
    /// Rejects an empty name or category and any amount that is not a
    /// finite, non-negative number. An empty category falls back to
    /// `DEFAULT_CATEGORY` only when the caller passes `None`.
    pub fn parse(
        name: &str,
        amount: &str,
        category: Option<&str>,
        date: &str,
        monthly: bool,
    ) -> Result<NewExpense, ValidationError> {
        let amount = parse_amount(amount)?;
        NewExpense {
            name: name.to_string(),
            amount,
            category: category.unwrap_or(DEFAULT_CATEGORY).to_string(),
            date: date.to_string(),
            recurring: if monthly { Some(Recurrence::Monthly) } else { None },
        }
        .normalized()
    }

    /// Trim the text fields, then validate
    ///
    /// Every write path goes through this so that " Food " and "Food" land
    /// in the same category total.
    pub fn normalized(mut self) -> Result<NewExpense, ValidationError> {
        self.name = self.name.trim().to_string();
        self.category = self.category.trim().to_string();
        self.date = self.date.trim().to_string();
        self.validate()?;
        Ok(self)
    }

    /// Check an already-typed value without changing it
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::new("name", "must not be empty"));
        }
        if self.category.is_empty() {
            return Err(ValidationError::new("category", "must not be empty"));
        }
        check_amount(self.amount)?;
        Ok(())
    }

    pub(crate) fn into_expense(self, id: i64) -> Expense {
        Expense {
            id,
            name: self.name,
            amount: self.amount,
            category: self.category,
            date: self.date,
            recurring: self.recurring,
        }
    }
}

/// Parse a money amount typed by the user
pub fn parse_amount(raw: &str) -> Result<f64, ValidationError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::new("amount", format!("'{}' is not a number", raw.trim())))?;
    check_amount(value)?;
    Ok(value)
}

fn check_amount(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::new("amount", "must be a finite number"));
    }
    if value < 0.0 {
        return Err(ValidationError::new("amount", "must not be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_input() {
        let new = NewExpense::parse("Lunch", " 12.50 ", Some("Food"), "2024-03-01", true).unwrap();

        assert_eq!(new.name, "Lunch");
        assert_eq!(new.amount, 12.5);
        assert_eq!(new.category, "Food");
        assert_eq!(new.recurring, Some(Recurrence::Monthly));
    }

    #[test]
    fn test_parse_defaults_category() {
        let new = NewExpense::parse("Bus", "3", None, "2024-03-01", false).unwrap();
        assert_eq!(new.category, DEFAULT_CATEGORY);
        assert_eq!(new.recurring, None);
    }

    #[test]
    fn test_parse_rejects_bad_amounts() {
        for raw in ["", "abc", "NaN", "inf", "-4"] {
            let err = NewExpense::parse("Lunch", raw, Some("Food"), "2024-03-01", false)
                .unwrap_err();
            assert_eq!(err.field, "amount", "input {:?} should be rejected", raw);
        }
    }

    #[test]
    fn test_parse_rejects_empty_name() {
        let err = NewExpense::parse("   ", "5", Some("Food"), "", false).unwrap_err();
        assert_eq!(err.field, "name");
    }

    #[test]
    fn test_normalized_trims_typed_values() {
        let typed = NewExpense {
            name: "  Lunch ".to_string(),
            amount: 9.0,
            category: " Food ".to_string(),
            date: " 2024-03-01".to_string(),
            recurring: None,
        };

        let clean = typed.clone().normalized().unwrap();
        assert_eq!(clean.name, "Lunch");
        assert_eq!(clean.category, "Food");
        assert_eq!(clean.date, "2024-03-01");

        // Whitespace-only labels are empty once trimmed
        let blank = NewExpense {
            category: "   ".to_string(),
            ..typed
        };
        assert_eq!(blank.normalized().unwrap_err().field, "category");
    }

    #[test]
    fn test_json_shape_matches_store_format() {
        let expense = Expense {
            id: 1700000000000,
            name: "Lunch".to_string(),
            amount: 12.5,
            category: "Food".to_string(),
            date: "2024-03-01".to_string(),
            recurring: None,
        };

        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1700000000000i64,
                "name": "Lunch",
                "amount": 12.5,
                "category": "Food",
                "date": "2024-03-01",
                "recurring": null
            })
        );

        let monthly: Expense = serde_json::from_str(concat!(
            r#"{"id":1,"name":"Rent","amount":900,"category":"Utilities","#,
            r#""date":"2024-03-01","recurring":"monthly"}"#,
        ))
        .unwrap();
        assert!(monthly.is_recurring());
    }
}
