//! Transaction primitives.
//!
//! A `Transaction` is a single income or expense entry of the ledger.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, Money, ResultEngine,
    util::{normalize_optional_text, normalize_required_name, normalize_tag, normalize_tags},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    #[default]
    Paid,
    Pending,
}

/// How a transaction was paid: a cash-like token or a credit card id.
///
/// Serialized as a plain string (`"CASH"`, `"PIX"`, `"DEBIT"` or the card
/// UUID).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Pix,
    Debit,
    Card(Uuid),
}

impl PaymentMethod {
    /// Returns the card id when the payment went through a credit card.
    #[must_use]
    pub fn card_id(self) -> Option<Uuid> {
        match self {
            Self::Card(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => f.write_str("CASH"),
            Self::Pix => f.write_str("PIX"),
            Self::Debit => f.write_str("DEBIT"),
            Self::Card(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CASH" => Ok(Self::Cash),
            "PIX" => Ok(Self::Pix),
            "DEBIT" => Ok(Self::Debit),
            _ => Uuid::parse_str(s.trim()).map(Self::Card).map_err(|_| {
                EngineError::InvalidTransaction(format!("invalid payment method: {s}"))
            }),
        }
    }
}

impl TryFrom<String> for PaymentMethod {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PaymentMethod> for String {
    fn from(value: PaymentMethod) -> Self {
        value.to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub description: String,
    pub amount: Money,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub status: TransactionStatus,
    pub due_date: Option<NaiveDate>,
    pub payment_method: PaymentMethod,
    pub tags: Vec<String>,
    pub cashback_amount: Option<Money>,
}

impl Transaction {
    /// Validates `draft` and builds a transaction with a fresh id.
    pub fn new(draft: NewTransaction) -> ResultEngine<Self> {
        Self::with_id(Uuid::new_v4(), draft)
    }

    /// Validates `draft` and builds a transaction keeping `id`.
    ///
    /// Rules:
    /// - description must not be blank
    /// - amount must be > 0
    /// - a pending transaction needs a due date
    /// - a cashback override must be >= 0 and only on expenses paid by card
    pub fn with_id(id: Uuid, draft: NewTransaction) -> ResultEngine<Self> {
        let description = normalize_required_name(&draft.description, "transaction")?;
        if !draft.amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "transaction amount must be > 0".to_string(),
            ));
        }
        if draft.status == TransactionStatus::Pending && draft.due_date.is_none() {
            return Err(EngineError::InvalidTransaction(
                "pending transaction requires a due date".to_string(),
            ));
        }
        if let Some(cashback) = draft.cashback_amount {
            if cashback.is_negative() {
                return Err(EngineError::InvalidAmount(
                    "cashback must be >= 0".to_string(),
                ));
            }
            if draft.kind != TransactionType::Expense || draft.payment_method.card_id().is_none() {
                return Err(EngineError::InvalidTransaction(
                    "cashback is only allowed on expenses paid by card".to_string(),
                ));
            }
        }

        Ok(Self {
            id,
            description,
            amount: draft.amount,
            date: draft.date,
            kind: draft.kind,
            category: normalize_optional_text(draft.category.as_deref()),
            sub_category: normalize_optional_text(draft.sub_category.as_deref()),
            status: draft.status,
            due_date: draft.due_date,
            payment_method: draft.payment_method,
            tags: normalize_tags(&draft.tags),
            cashback_amount: draft.cashback_amount,
        })
    }

    #[must_use]
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    #[must_use]
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Tag membership. `tag` is normalized like stored tags, so case and
    /// whitespace runs do not matter.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        normalize_tag(tag).is_some_and(|needle| self.tags.contains(&needle))
    }
}

/// Form input for a transaction, before validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub description: String,
    pub amount: Money,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sub_category: Option<String>,
    #[serde(default)]
    pub status: TransactionStatus,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub cashback_amount: Option<Money>,
}

impl NewTransaction {
    /// A paid cash income, as created by the earnings form.
    pub fn income(description: impl Into<String>, amount: Money, date: NaiveDate) -> Self {
        Self::base(TransactionType::Income, description.into(), amount, date)
    }

    /// A paid debit expense, as created by the expenses form.
    pub fn expense(description: impl Into<String>, amount: Money, date: NaiveDate) -> Self {
        let mut draft = Self::base(TransactionType::Expense, description.into(), amount, date);
        draft.payment_method = PaymentMethod::Debit;
        draft
    }

    fn base(kind: TransactionType, description: String, amount: Money, date: NaiveDate) -> Self {
        Self {
            description,
            amount,
            date,
            kind,
            category: None,
            sub_category: None,
            status: TransactionStatus::Paid,
            due_date: None,
            payment_method: PaymentMethod::Cash,
            tags: Vec::new(),
            cashback_amount: None,
        }
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn sub_category(mut self, sub_category: impl Into<String>) -> Self {
        self.sub_category = Some(sub_category.into());
        self
    }

    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn paid_with(mut self, method: PaymentMethod) -> Self {
        self.payment_method = method;
        self
    }

    #[must_use]
    pub fn pending_until(mut self, due_date: NaiveDate) -> Self {
        self.status = TransactionStatus::Pending;
        self.due_date = Some(due_date);
        self
    }

    #[must_use]
    pub fn cashback(mut self, amount: Money) -> Self {
        self.cashback_amount = Some(amount);
        self
    }
}

impl From<&Transaction> for NewTransaction {
    fn from(tx: &Transaction) -> Self {
        Self {
            description: tx.description.clone(),
            amount: tx.amount,
            date: tx.date,
            kind: tx.kind,
            category: tx.category.clone(),
            sub_category: tx.sub_category.clone(),
            status: tx.status,
            due_date: tx.due_date,
            payment_method: tx.payment_method,
            tags: tx.tags.clone(),
            cashback_amount: tx.cashback_amount,
        }
    }
}
