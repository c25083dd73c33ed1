//! Shopping lists grouped in trips.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, Money, ResultEngine,
    util::{normalize_optional_text, normalize_required_name},
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    pub id: Uuid,
    pub name: String,
    /// Item category (e.g. dairy, cleaning). May be empty.
    pub category: String,
    pub price: Money,
    pub is_bought: bool,
}

impl ShoppingItem {
    pub fn new(name: &str, category: Option<&str>, price: Money) -> ResultEngine<Self> {
        let item = Self {
            id: Uuid::new_v4(),
            name: normalize_required_name(name, "item")?,
            category: normalize_optional_text(category).unwrap_or_default(),
            price,
            is_bought: false,
        };
        item.validate()?;
        Ok(item)
    }

    pub(crate) fn validate(&self) -> ResultEngine<()> {
        if self.price.is_negative() {
            return Err(EngineError::InvalidAmount(format!(
                "price of '{}' must be >= 0",
                self.name
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn bought(mut self) -> Self {
        self.is_bought = true;
        self
    }
}

/// One visit to an establishment and the items planned for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingTrip {
    pub id: Uuid,
    /// Establishment name.
    pub name: String,
    pub date: NaiveDate,
    pub category: String,
    pub items: Vec<ShoppingItem>,
}

impl ShoppingTrip {
    /// The category is not checked here: the store resolves it against its
    /// registry when the trip is added.
    pub fn new(
        name: &str,
        date: NaiveDate,
        category: &str,
        items: Vec<ShoppingItem>,
    ) -> ResultEngine<Self> {
        let trip = Self {
            id: Uuid::new_v4(),
            name: normalize_required_name(name, "trip")?,
            date,
            category: category.to_string(),
            items,
        };
        trip.validate()?;
        Ok(trip)
    }

    pub(crate) fn validate(&self) -> ResultEngine<()> {
        self.items.iter().try_for_each(ShoppingItem::validate)
    }

    pub fn item(&self, item_id: &Uuid) -> Option<&ShoppingItem> {
        self.items.iter().find(|item| item.id == *item_id)
    }
}
