// Copyright (c) 2025 Spendlog Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::utils;

/// Fixed category set. Unknown strings coming back from the remote store
/// deserialize as `Other` rather than rejecting the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Petrol,
    Salary,
    Entertainment,
    Utilities,
    Shopping,
    Transportation,
    Healthcare,
    Education,
    #[serde(other)]
    Other,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Food,
        Category::Petrol,
        Category::Salary,
        Category::Entertainment,
        Category::Utilities,
        Category::Shopping,
        Category::Transportation,
        Category::Healthcare,
        Category::Education,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Petrol => "Petrol",
            Category::Salary => "Salary",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Shopping => "Shopping",
            Category::Transportation => "Transportation",
            Category::Healthcare => "Healthcare",
            Category::Education => "Education",
            Category::Other => "Other",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| LedgerError::Validation(format!("unknown category '{}'", s)))
    }
}

/// One user-entered spending/income event.
///
/// `id` is assigned by the remote store on creation, or synthesized from the
/// millisecond clock in local-fallback mode. The remote store is schemaless
/// and may hand `amount` back as a string, so deserialization coerces it
/// (defaulting to zero) instead of trusting the wire type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "utils::de_amount")]
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub timestamp: i64,
}

/// Validated user input for a new or edited expense. Construction is the
/// only pre-flight check: invalid input never reaches the gateway.
#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    pub amount: Decimal,
    pub description: String,
    pub category: Category,
}

impl ExpenseDraft {
    pub fn new(amount: Decimal, description: &str, category: Category) -> Result<Self, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::Validation(
                "amount must be greater than 0".into(),
            ));
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(LedgerError::Validation(
                "description must not be empty".into(),
            ));
        }
        Ok(ExpenseDraft {
            amount,
            description: description.to_string(),
            category,
        })
    }

    /// Stamps the draft into a full record, capturing date, time, and the
    /// creation instant. The id is left empty for the caller to assign.
    pub fn into_record(self) -> ExpenseRecord {
        let (date, time, timestamp) = utils::now_stamp();
        ExpenseRecord {
            id: String::new(),
            amount: self.amount,
            description: self.description,
            category: self.category,
            date,
            time,
            timestamp,
        }
    }

    /// Partial-update form of the draft. Date and time are recaptured so an
    /// edited record carries the edit instant, not the original one.
    pub fn into_patch(self) -> ExpensePatch {
        let (date, time, timestamp) = utils::now_stamp();
        ExpensePatch {
            amount: Some(self.amount),
            description: Some(self.description),
            category: Some(self.category),
            date: Some(date),
            time: Some(time),
            timestamp: Some(timestamp),
        }
    }
}

/// Field-wise partial update merged over an existing record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpensePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ExpensePatch {
    /// Merges the patch into `record` in place.
    pub fn apply_to(&self, record: &mut ExpenseRecord) {
        if let Some(amount) = self.amount {
            record.amount = amount;
        }
        if let Some(ref description) = self.description {
            record.description = description.clone();
        }
        if let Some(category) = self.category {
            record.category = category;
        }
        if let Some(ref date) = self.date {
            record.date = date.clone();
        }
        if let Some(ref time) = self.time {
            record.time = time.clone();
        }
        if let Some(timestamp) = self.timestamp {
            record.timestamp = timestamp;
        }
    }
}
