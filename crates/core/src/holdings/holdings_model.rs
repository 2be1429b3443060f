//! Holding domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::constants::{ASSET_STORE, LIABILITY_STORE, MAX_VALUATION_AMOUNT};
use crate::errors::{Result, ValidationError};

/// Which side of the balance sheet a holding sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoldingSide {
    Asset,
    Liability,
}

impl HoldingSide {
    /// Name of the object store that keeps holdings of this side.
    pub fn store_name(&self) -> &'static str {
        match self {
            HoldingSide::Asset => ASSET_STORE,
            HoldingSide::Liability => LIABILITY_STORE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HoldingSide::Asset => "asset",
            HoldingSide::Liability => "liability",
        }
    }
}

impl std::str::FromStr for HoldingSide {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asset" | "assets" => Ok(HoldingSide::Asset),
            "liability" | "liabilities" => Ok(HoldingSide::Liability),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown holding side '{}'",
                other
            ))),
        }
    }
}

/// What event a valuation records. Informational only; resolution ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValuationKind {
    Purchase,
    Sale,
    /// Legacy records used `"none"` for plain revaluations.
    #[default]
    #[serde(alias = "none")]
    Revaluation,
}

/// A dated amount representing a holding's worth at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Valuation {
    /// `None` until the user fills in a date; such a valuation is never
    /// selected as "the value as of" any date.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub amount: Decimal,
    #[serde(default)]
    pub kind: ValuationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Valuation {
    pub fn new(date: NaiveDate, amount: Decimal, kind: ValuationKind) -> Self {
        Self {
            date: Some(date),
            amount,
            kind,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// A postal address, as entered for a property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub line1: String,
    #[serde(default)]
    pub line2: String,
    #[serde(default)]
    pub line3: String,
    #[serde(default)]
    pub locality: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postcode: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealEstateDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RepaymentType {
    PrincipalAndInterest,
    InterestOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompoundingPeriod {
    Daily,
    Monthly,
}

/// Loan terms. Money fields share the valuation amount bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_balance: Option<Decimal>,
    /// Annual rate in basis points (400 is 4%).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repayment_type: Option<RepaymentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compounding_period: Option<CompoundingPeriod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub establishment_fees: Option<Decimal>,
}

/// Record-type specific fields, tagged by `type`. Only informational: the
/// balance sheet reads valuations alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HoldingDetails {
    RealEstate(RealEstateDetails),
    Loan(LoanDetails),
}

impl HoldingDetails {
    /// The side a record of this type belongs on.
    pub fn side(&self) -> HoldingSide {
        match self {
            HoldingDetails::RealEstate(_) => HoldingSide::Asset,
            HoldingDetails::Loan(_) => HoldingSide::Liability,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            HoldingDetails::RealEstate(_) => "RealEstate",
            HoldingDetails::Loan(_) => "Loan",
        }
    }

    fn validate(&self, side: HoldingSide) -> Result<()> {
        if self.side() != side {
            return Err(ValidationError::InvalidInput(format!(
                "A {} record cannot be a {}",
                self.type_name(),
                side.as_str()
            ))
            .into());
        }
        match self {
            HoldingDetails::RealEstate(_) => Ok(()),
            HoldingDetails::Loan(loan) => loan.validate(),
        }
    }
}

impl LoanDetails {
    fn validate(&self) -> Result<()> {
        for (field, amount) in [
            ("principal", self.principal),
            ("current balance", self.current_balance),
            ("interest rate", self.interest_rate),
            ("establishment fees", self.establishment_fees),
        ] {
            if let Some(amount) = amount {
                check_amount(field, amount)?;
            }
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(ValidationError::InvalidInput(format!(
                    "Loan end date {} is before its start date {}",
                    end, start
                ))
                .into());
            }
        }
        Ok(())
    }
}

/// An asset or liability with its valuation history.
///
/// Valuations are kept in the order the user entered them; nothing here
/// assumes they are sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: String,
    pub name: String,
    pub side: HoldingSide,
    #[serde(default)]
    pub valuations: Vec<Valuation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HoldingDetails>,
}

/// Holdings keyed by id, as handed to the balance sheet engine.
pub type HoldingMap = HashMap<String, Holding>;

impl Holding {
    /// Valuation with the greatest date. Among equal dates the one listed
    /// last wins, matching the resolver.
    pub fn latest_valuation(&self) -> Option<&Valuation> {
        let mut latest: Option<(&NaiveDate, &Valuation)> = None;
        for valuation in &self.valuations {
            if let Some(date) = valuation.date.as_ref() {
                match latest {
                    Some((best, _)) if date < best => {}
                    _ => latest = Some((date, valuation)),
                }
            }
        }
        latest.map(|(_, v)| v)
    }

    /// Amount of the latest valuation, zero when there is none.
    pub fn current_value(&self) -> Decimal {
        self.latest_valuation()
            .map(|v| v.amount)
            .unwrap_or(Decimal::ZERO)
    }

    /// Earliest dated valuation, if any.
    pub fn first_valuation_date(&self) -> Option<NaiveDate> {
        self.valuations.iter().filter_map(|v| v.date).min()
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingField("id".to_string()).into());
        }
        validate_fields(&self.name, self.side, &self.valuations, self.details.as_ref())
    }
}

/// Input model for creating a new holding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHolding {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub side: HoldingSide,
    #[serde(default)]
    pub valuations: Vec<Valuation>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub details: Option<HoldingDetails>,
}

impl NewHolding {
    pub fn validate(&self) -> Result<()> {
        if let Some(id) = &self.id {
            if id.trim().is_empty() {
                return Err(ValidationError::InvalidInput(
                    "Holding id cannot be blank".to_string(),
                )
                .into());
            }
        }
        validate_fields(&self.name, self.side, &self.valuations, self.details.as_ref())
    }

    /// Builds the stored holding under the given id.
    pub fn into_holding(self, id: String) -> Holding {
        Holding {
            id,
            name: self.name.trim().to_string(),
            side: self.side,
            valuations: self.valuations,
            notes: self.notes,
            details: self.details,
        }
    }
}

fn validate_fields(
    name: &str,
    side: HoldingSide,
    valuations: &[Valuation],
    details: Option<&HoldingDetails>,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::MissingField("name".to_string()).into());
    }
    for valuation in valuations {
        check_amount("valuation amount", valuation.amount)?;
    }
    match details {
        Some(details) => details.validate(side),
        None => Ok(()),
    }
}

/// Liabilities are stored as positive magnitudes too, so every amount lies in
/// `0..=MAX_VALUATION_AMOUNT`.
fn check_amount(field: &str, amount: Decimal) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(ValidationError::InvalidInput(format!(
            "{} must not be negative (got {})",
            field, amount
        ))
        .into());
    }
    if amount > Decimal::from(MAX_VALUATION_AMOUNT) {
        return Err(ValidationError::InvalidInput(format!(
            "{} must not exceed {} (got {})",
            field, MAX_VALUATION_AMOUNT, amount
        ))
        .into());
    }
    Ok(())
}
