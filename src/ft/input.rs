use crate::Money;
use crate::Result;
use crate::TransactionType;

use serde::Deserialize;

use thiserror::Error;

/// Message shown to the user whenever the validation gate rejects an input
pub const VALIDATION_NOTICE: &str =
    "Please enter a valid description, amount, and select a type (Income/Expense).";

/// Fields that passed the validation gate, ready to be added or applied as an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidInput {
    pub description: String,
    pub amount: Money,
    pub tx_type: TransactionType,
}

/// Represents an imported csv row that a string would deserialize into
#[derive(Deserialize, Debug, Clone)]
pub struct InputEvent {
    #[serde(rename = "type")]
    pub typ: String,

    pub description: String,
    pub amount: String,
}

#[derive(Error, Debug)]
pub enum InputParseError {
    #[error("Invalid input: description must not be empty")]
    EmptyDescription,

    #[error("Invalid input: amount is not a number: {0:?}")]
    InvalidAmount(String),

    #[error("Invalid input: amount must be positive: {0:?}")]
    NonPositiveAmount(String),

    #[error("Invalid input: a type (income/expense) must be selected")]
    MissingType,

    #[error("Invalid input: unknown transaction type: {0:?}")]
    UnknownType(String),
}

/// Validation gate in front of every add and update
pub fn validate(
    description: &str,
    amount: &str,
    tx_type: Option<TransactionType>,
) -> Result<ValidInput> {
    let description = description.trim();

    if description.is_empty() {
        Err(InputParseError::EmptyDescription)?
    }

    let parsed = Money::parse(amount).map_err(|e| {
        log::debug!("{e}");
        InputParseError::InvalidAmount(amount.to_string())
    })?;

    if !parsed.is_positive() {
        Err(InputParseError::NonPositiveAmount(amount.to_string()))?
    }

    let tx_type = tx_type.ok_or(InputParseError::MissingType)?;

    Ok(ValidInput {
        description: description.to_string(),
        amount: parsed,
        tx_type,
    })
}

impl InputEvent {
    pub fn parse_input(self) -> Result<ValidInput> {
        let tx_type = if self.typ.trim().is_empty() {
            None
        } else {
            let tx_type = TransactionType::parse(&self.typ)
                .ok_or_else(|| InputParseError::UnknownType(self.typ.clone()))?;
            Some(tx_type)
        };

        validate(&self.description, &self.amount, tx_type)
    }
}
