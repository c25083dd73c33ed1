use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine, util::normalize_required_name};

/// A savings goal.
///
/// `current_amount` may exceed `target_amount`: an over-achieved goal is
/// valid, only displays clamp its progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: Uuid,
    pub name: String,
    pub current_amount: Money,
    pub target_amount: Money,
    pub deadline: Option<NaiveDate>,
}

impl Goal {
    pub fn new(
        name: &str,
        current_amount: Money,
        target_amount: Money,
        deadline: Option<NaiveDate>,
    ) -> ResultEngine<Self> {
        let goal = Self {
            id: Uuid::new_v4(),
            name: normalize_required_name(name, "goal")?,
            current_amount,
            target_amount,
            deadline,
        };
        goal.validate()?;
        Ok(goal)
    }

    pub(crate) fn validate(&self) -> ResultEngine<()> {
        if !self.target_amount.is_positive() {
            return Err(EngineError::InvalidAmount(format!(
                "target of goal '{}' must be > 0",
                self.name
            )));
        }
        if self.current_amount.is_negative() {
            return Err(EngineError::InvalidAmount(format!(
                "current amount of goal '{}' must be >= 0",
                self.name
            )));
        }
        Ok(())
    }
}
