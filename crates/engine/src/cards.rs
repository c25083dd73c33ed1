//! Credit cards used as payment methods.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine,
    util::{normalize_optional_text, normalize_required_name},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    pub id: Uuid,
    pub name: String,
    /// Cashback percentage applied when an expense has no explicit override.
    pub default_cashback: f64,
    pub closing_day: u32,
    pub due_day: u32,
    pub color: Option<String>,
}

impl CreditCard {
    /// Creates a card. Cashback must be within `0..=100` and both billing
    /// anchors within `1..=31`.
    pub fn new(
        name: &str,
        default_cashback: f64,
        closing_day: u32,
        due_day: u32,
        color: Option<&str>,
    ) -> ResultEngine<Self> {
        let card = Self {
            id: Uuid::new_v4(),
            name: normalize_required_name(name, "card")?,
            default_cashback,
            closing_day,
            due_day,
            color: normalize_optional_text(color),
        };
        card.validate()?;
        Ok(card)
    }

    pub(crate) fn validate(&self) -> ResultEngine<()> {
        if !(0.0..=100.0).contains(&self.default_cashback) {
            return Err(EngineError::InvalidCard(format!(
                "cashback for '{}' must be between 0 and 100",
                self.name
            )));
        }
        for (label, day) in [("closing", self.closing_day), ("due", self.due_day)] {
            if !(1..=31).contains(&day) {
                return Err(EngineError::InvalidCard(format!(
                    "{label} day for '{}' must be between 1 and 31",
                    self.name
                )));
            }
        }
        Ok(())
    }

    /// Due date of the statement a purchase made on `purchase` lands in.
    ///
    /// A purchase on or before the closing day closes in its own month, later
    /// ones close the month after. The statement is due on `due_day` of the
    /// closing month when the due day comes after the closing day, otherwise
    /// of the following month. Anchor days past the end of a month clamp to
    /// its last day.
    #[must_use]
    pub fn statement_due_date(&self, purchase: NaiveDate) -> NaiveDate {
        let (year, month) = (purchase.year(), purchase.month());
        let closing = self.closing_day.min(last_day_of_month(year, month));
        let (close_year, close_month) = if purchase.day() <= closing {
            (year, month)
        } else {
            next_month(year, month)
        };

        let (due_year, due_month) = if self.due_day > self.closing_day {
            (close_year, close_month)
        } else {
            next_month(close_year, close_month)
        };
        let due_day = self.due_day.min(last_day_of_month(due_year, due_month));
        NaiveDate::from_ymd_opt(due_year, due_month, due_day).unwrap_or(purchase)
    }
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_year, next) = next_month(year, month);
    NaiveDate::from_ymd_opt(next_year, next, 1)
        .and_then(|first| first.pred_opt())
        .map_or(28, |last| last.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn card(closing_day: u32, due_day: u32) -> CreditCard {
        CreditCard::new("Nubank", 1.0, closing_day, due_day, Some("#8b5cf6")).unwrap()
    }

    #[test]
    fn new_validates_ranges() {
        assert!(matches!(
            CreditCard::new("Inter", 101.0, 1, 10, None),
            Err(EngineError::InvalidCard(_))
        ));
        assert!(matches!(
            CreditCard::new("Inter", 1.0, 0, 10, None),
            Err(EngineError::InvalidCard(_))
        ));
        assert!(matches!(
            CreditCard::new("Inter", 1.0, 3, 32, None),
            Err(EngineError::InvalidCard(_))
        ));
        assert!(matches!(
            CreditCard::new("  ", 1.0, 3, 10, None),
            Err(EngineError::InvalidName(_))
        ));
    }

    #[test]
    fn purchase_before_closing_is_due_next_month() {
        let card = card(25, 5);
        assert_eq!(card.statement_due_date(date(2023, 10, 20)), date(2023, 11, 5));
        assert_eq!(card.statement_due_date(date(2023, 10, 25)), date(2023, 11, 5));
    }

    #[test]
    fn purchase_after_closing_rolls_one_cycle() {
        let card = card(25, 5);
        assert_eq!(card.statement_due_date(date(2023, 10, 26)), date(2023, 12, 5));
        assert_eq!(card.statement_due_date(date(2023, 12, 30)), date(2024, 2, 5));
    }

    #[test]
    fn due_after_closing_stays_in_closing_month() {
        let card = card(3, 10);
        assert_eq!(card.statement_due_date(date(2023, 10, 2)), date(2023, 10, 10));
        assert_eq!(card.statement_due_date(date(2023, 10, 4)), date(2023, 11, 10));
    }

    #[test]
    fn anchors_clamp_to_short_months() {
        let c = card(31, 30);
        assert_eq!(c.statement_due_date(date(2024, 2, 29)), date(2024, 3, 30));
        let c = card(20, 31);
        assert_eq!(c.statement_due_date(date(2023, 2, 10)), date(2023, 2, 28));
    }
}
