use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Brl,
    Usd,
    Gbp,
}

/// A monetary value as minor units plus its display form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub minor: i64,
    /// Locale-formatted, e.g. `R$ 1.234,56`.
    pub formatted: String,
}

impl Amount {
    pub fn new(minor: i64, formatted: impl Into<String>) -> Self {
        Self {
            minor,
            formatted: formatted.into(),
        }
    }
}

/// One row of a grouped total (by category, tag, asset type...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabeledAmount {
    pub label: String,
    pub amount: Amount,
    /// Share of the grouped total, unrounded.
    pub percent: f64,
}

pub mod goals {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct GoalProgress {
        pub id: Uuid,
        pub name: String,
        pub current: Amount,
        pub target: Amount,
        /// Negative once the goal is over-achieved.
        pub remaining: Amount,
        /// Unclamped; may exceed 100.
        pub progress_percent: f64,
        pub deadline: Option<NaiveDate>,
    }
}

pub mod dashboard {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Dashboard {
        pub currency: Currency,
        pub income: Amount,
        pub expenses: Amount,
        pub balance: Amount,
        pub savings_rate: f64,
        pub pending_income: Amount,
        pub pending_expenses: Amount,
        pub cashback: Amount,
        pub pending_shopping: Amount,
        pub goals: Vec<goals::GoalProgress>,
    }
}

pub mod expenses {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct TagBudgetView {
        pub tag: String,
        pub expected: Amount,
        pub actual: Amount,
        pub remaining: Amount,
        pub percent_used: f64,
        pub over_budget: bool,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseBreakdown {
        pub currency: Currency,
        pub total: Amount,
        /// Sorted by label.
        pub by_category: Vec<LabeledAmount>,
        /// Percent is relative to total expenses, so rows may add up to more
        /// than 100 when a transaction carries several tags.
        pub by_tag: Vec<LabeledAmount>,
        pub tag_budgets: Vec<TagBudgetView>,
    }
}

pub mod shopping {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct TripSummary {
        pub id: Uuid,
        pub name: String,
        pub date: NaiveDate,
        pub category: String,
        pub total: Amount,
        pub pending: Amount,
        pub items: usize,
        pub items_bought: usize,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ShoppingOverview {
        pub currency: Currency,
        /// Registered trip categories, fallback last.
        pub categories: Vec<String>,
        pub pending_total: Amount,
        pub trips: Vec<TripSummary>,
        pub by_item_category: Vec<LabeledAmount>,
    }
}

pub mod patrimony {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct AssetShare {
        pub id: Uuid,
        pub name: String,
        /// Asset type as its canonical string (`Bank`, `FGTS`...).
        pub kind: String,
        pub value: Amount,
        pub share_percent: f64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Patrimony {
        pub currency: Currency,
        pub total: Amount,
        pub assets: Vec<AssetShare>,
        pub by_type: Vec<LabeledAmount>,
    }
}

pub mod insight {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum InsightStatus {
        Advice,
        Failed,
        Cancelled,
    }

    /// What the user gets back from an analysis request.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct InsightView {
        pub status: InsightStatus,
        pub message: String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn amount_serializes_minor_and_formatted() {
        let amount = Amount::new(123_456, "R$ 1.234,56");
        assert_eq!(
            serde_json::to_value(&amount).unwrap(),
            json!({ "minor": 123_456, "formatted": "R$ 1.234,56" })
        );
    }

    #[test]
    fn insight_status_is_snake_case() {
        let view = insight::InsightView {
            status: insight::InsightStatus::Cancelled,
            message: "cancelled".to_string(),
        };
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["status"], "cancelled");
    }

    #[test]
    fn currency_uses_iso_codes() {
        assert_eq!(serde_json::to_value(Currency::Gbp).unwrap(), json!("GBP"));
        let parsed: Currency = serde_json::from_str("\"BRL\"").unwrap();
        assert_eq!(parsed, Currency::Brl);
    }
}
