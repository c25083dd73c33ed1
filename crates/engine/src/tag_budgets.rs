use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, ResultEngine, util::normalize_tag};

/// Planned spending ceiling for every expense carrying `tag`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagBudget {
    pub tag: String,
    pub expected_amount: Money,
}

impl TagBudget {
    /// The tag is normalized the same way transaction tags are.
    pub fn new(tag: &str, expected_amount: Money) -> ResultEngine<Self> {
        let mut budget = Self {
            tag: tag.to_string(),
            expected_amount,
        };
        budget.validate()?;
        Ok(budget)
    }

    /// Normalizes `tag` in place and checks the amount.
    pub(crate) fn validate(&mut self) -> ResultEngine<()> {
        self.tag = normalize_tag(&self.tag)
            .ok_or_else(|| EngineError::InvalidName("tag must not be empty".to_string()))?;
        if self.expected_amount.is_negative() {
            return Err(EngineError::InvalidAmount(format!(
                "expected amount for tag '{}' must be >= 0",
                self.tag
            )));
        }
        Ok(())
    }
}
