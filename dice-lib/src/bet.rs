use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetType {
    Even,
    Odd,
}

impl BetType {
    pub fn as_str(self) -> &'static str {
        match self {
            BetType::Even => "even",
            BetType::Odd => "odd",
        }
    }
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BetError {
    #[error("no bet type selected")]
    NoBetType,
    #[error("no bet amount entered")]
    MissingAmount,
    #[error("bet amount {0:?} is not a number")]
    InvalidAmount(String),
    #[error("bet amount {0} must be greater than zero")]
    NonPositiveAmount(f64),
    #[error("a round is already in progress")]
    RoundInProgress,
}

/// Parses the raw contents of the bet amount field.
///
/// Only emptiness, finiteness and the sign are checked; there is no upper
/// bound and fractional cents go through untouched.
pub fn parse_bet_amount(input: &str) -> Result<f64, BetError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(BetError::MissingAmount);
    }
    let amount = input
        .parse::<f64>()
        .map_err(|_| BetError::InvalidAmount(input.to_string()))?;
    if !amount.is_finite() {
        return Err(BetError::InvalidAmount(input.to_string()));
    }
    if amount <= 0.0 {
        return Err(BetError::NonPositiveAmount(amount));
    }
    Ok(amount)
}

/// Checks a play attempt, returning the bet to send.
pub fn validate_bet(selection: Option<BetType>, amount: &str) -> Result<(BetType, f64), BetError> {
    let Some(bet_type) = selection else {
        return Err(BetError::NoBetType);
    };
    let amount = parse_bet_amount(amount)?;
    Ok((bet_type, amount))
}
