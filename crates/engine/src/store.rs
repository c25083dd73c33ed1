//! The in-memory ledger.
//!
//! `Ledger` is the single owner of every collection. Mutations go through it
//! so validation and the category reassignment rules hold; reads hand out
//! slices that can be passed straight to [`crate::aggregate`].

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Asset, CategoryRegistry, CreditCard, EngineError, Goal, Money, NewTransaction, ResultEngine,
    ShoppingItem, ShoppingTrip, TagBudget, Transaction, TransactionType,
    util::{normalize_required_name, normalize_tag},
};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    transactions: Vec<Transaction>,
    cards: Vec<CreditCard>,
    tag_budgets: Vec<TagBudget>,
    goals: Vec<Goal>,
    assets: Vec<Asset>,
    trips: Vec<ShoppingTrip>,
    trip_categories: CategoryRegistry,
}

fn not_found(kind: &str, id: &Uuid) -> EngineError {
    EngineError::KeyNotFound(format!("{kind} {id}"))
}

fn existing(kind: &str, id: &Uuid) -> EngineError {
    EngineError::ExistingKey(format!("{kind} {id}"))
}

/// Replaces the element whose id matches, keeping its position.
fn replace_by_id<T>(
    items: &mut [T],
    id: &Uuid,
    kind: &str,
    id_of: impl Fn(&T) -> Uuid,
    value: T,
) -> ResultEngine<()> {
    let slot = items
        .iter_mut()
        .find(|item| id_of(item) == *id)
        .ok_or_else(|| not_found(kind, id))?;
    *slot = value;
    Ok(())
}

/// Removes the element whose id matches and returns it.
fn remove_by_id<T>(
    items: &mut Vec<T>,
    id: &Uuid,
    kind: &str,
    id_of: impl Fn(&T) -> Uuid,
) -> ResultEngine<T> {
    let idx = items
        .iter()
        .position(|item| id_of(item) == *id)
        .ok_or_else(|| not_found(kind, id))?;
    Ok(items.remove(idx))
}

impl Ledger {
    /// An empty ledger whose trip categories are `labels` plus `"Other"`.
    pub fn with_trip_categories<I, S>(labels: I) -> ResultEngine<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            trip_categories: CategoryRegistry::with_labels(labels)?,
            ..Self::default()
        })
    }

    // Transactions

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction(&self, id: &Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id == *id)
    }

    /// Transactions of one type, newest first as stored.
    pub fn transactions_of(&self, kind: TransactionType) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(move |tx| tx.kind == kind)
    }

    /// Validates `draft` and inserts it at the front of the list.
    pub fn add_transaction(&mut self, draft: NewTransaction) -> ResultEngine<Uuid> {
        let tx = Transaction::new(draft)?;
        let id = tx.id;
        tracing::debug!(%id, kind = tx.kind.as_str(), amount = %tx.amount, "transaction added");
        self.transactions.insert(0, tx);
        Ok(id)
    }

    /// Replaces the transaction `id` with `draft`, keeping id and position.
    pub fn update_transaction(&mut self, id: &Uuid, draft: NewTransaction) -> ResultEngine<()> {
        let tx = Transaction::with_id(*id, draft)?;
        replace_by_id(&mut self.transactions, id, "transaction", |tx| tx.id, tx)?;
        tracing::debug!(%id, "transaction updated");
        Ok(())
    }

    pub fn remove_transaction(&mut self, id: &Uuid) -> ResultEngine<Transaction> {
        let removed = remove_by_id(&mut self.transactions, id, "transaction", |tx| tx.id)?;
        tracing::debug!(%id, "transaction removed");
        Ok(removed)
    }

    // Cards

    pub fn cards(&self) -> &[CreditCard] {
        &self.cards
    }

    pub fn card(&self, id: &Uuid) -> Option<&CreditCard> {
        self.cards.iter().find(|card| card.id == *id)
    }

    pub fn add_card(&mut self, card: CreditCard) -> ResultEngine<Uuid> {
        card.validate()?;
        if self.card(&card.id).is_some() {
            return Err(existing("card", &card.id));
        }
        let id = card.id;
        self.cards.push(card);
        Ok(id)
    }

    /// Replaces the card `id`. The id of `card` is overwritten with `id`.
    pub fn update_card(&mut self, id: &Uuid, mut card: CreditCard) -> ResultEngine<()> {
        card.id = *id;
        card.validate()?;
        replace_by_id(&mut self.cards, id, "card", |card| card.id, card)
    }

    /// Removes a card. Transactions paid with it are left as they are and
    /// simply stop earning derived cashback.
    pub fn remove_card(&mut self, id: &Uuid) -> ResultEngine<CreditCard> {
        let removed = remove_by_id(&mut self.cards, id, "card", |card| card.id)?;
        tracing::debug!(%id, "card removed");
        Ok(removed)
    }

    // Tag budgets

    pub fn tag_budgets(&self) -> &[TagBudget] {
        &self.tag_budgets
    }

    /// Inserts or replaces the budget of `budget.tag`. The tag is stored
    /// normalized.
    pub fn set_tag_budget(&mut self, mut budget: TagBudget) -> ResultEngine<()> {
        budget.validate()?;
        match self.tag_budgets.iter_mut().find(|b| b.tag == budget.tag) {
            Some(existing) => existing.expected_amount = budget.expected_amount,
            None => self.tag_budgets.push(budget),
        }
        Ok(())
    }

    pub fn remove_tag_budget(&mut self, tag: &str) -> ResultEngine<TagBudget> {
        let tag = normalize_tag(tag)
            .ok_or_else(|| EngineError::KeyNotFound(format!("tag budget {tag}")))?;
        let idx = self
            .tag_budgets
            .iter()
            .position(|b| b.tag == tag)
            .ok_or_else(|| EngineError::KeyNotFound(format!("tag budget {tag}")))?;
        Ok(self.tag_budgets.remove(idx))
    }

    // Goals

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn goal(&self, id: &Uuid) -> Option<&Goal> {
        self.goals.iter().find(|goal| goal.id == *id)
    }

    pub fn add_goal(&mut self, goal: Goal) -> ResultEngine<Uuid> {
        goal.validate()?;
        if self.goal(&goal.id).is_some() {
            return Err(existing("goal", &goal.id));
        }
        let id = goal.id;
        self.goals.push(goal);
        Ok(id)
    }

    pub fn update_goal(&mut self, id: &Uuid, mut goal: Goal) -> ResultEngine<()> {
        goal.id = *id;
        goal.name = normalize_required_name(&goal.name, "goal")?;
        goal.validate()?;
        replace_by_id(&mut self.goals, id, "goal", |goal| goal.id, goal)
    }

    pub fn remove_goal(&mut self, id: &Uuid) -> ResultEngine<Goal> {
        remove_by_id(&mut self.goals, id, "goal", |goal| goal.id)
    }

    /// Adds `amount` (> 0) to the goal and returns the new current amount.
    pub fn contribute_to_goal(&mut self, id: &Uuid, amount: Money) -> ResultEngine<Money> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "contribution must be > 0".to_string(),
            ));
        }
        let goal = self
            .goals
            .iter_mut()
            .find(|goal| goal.id == *id)
            .ok_or_else(|| not_found("goal", id))?;
        goal.current_amount = goal
            .current_amount
            .checked_add(amount)
            .ok_or_else(|| EngineError::InvalidAmount("amount too large".to_string()))?;
        tracing::debug!(%id, current = %goal.current_amount, "goal contribution");
        Ok(goal.current_amount)
    }

    // Assets

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn asset(&self, id: &Uuid) -> Option<&Asset> {
        self.assets.iter().find(|asset| asset.id == *id)
    }

    pub fn add_asset(&mut self, asset: Asset) -> ResultEngine<Uuid> {
        asset.validate()?;
        if self.asset(&asset.id).is_some() {
            return Err(existing("asset", &asset.id));
        }
        let id = asset.id;
        self.assets.push(asset);
        Ok(id)
    }

    pub fn update_asset(&mut self, id: &Uuid, mut asset: Asset) -> ResultEngine<()> {
        asset.id = *id;
        asset.name = normalize_required_name(&asset.name, "asset")?;
        asset.validate()?;
        replace_by_id(&mut self.assets, id, "asset", |asset| asset.id, asset)
    }

    pub fn remove_asset(&mut self, id: &Uuid) -> ResultEngine<Asset> {
        remove_by_id(&mut self.assets, id, "asset", |asset| asset.id)
    }

    // Shopping

    pub fn trips(&self) -> &[ShoppingTrip] {
        &self.trips
    }

    pub fn trip(&self, id: &Uuid) -> Option<&ShoppingTrip> {
        self.trips.iter().find(|trip| trip.id == *id)
    }

    /// Trips filed under `label` (matched through the registry).
    pub fn trips_in_category<'a>(
        &'a self,
        label: &str,
    ) -> impl Iterator<Item = &'a ShoppingTrip> + 'a {
        let resolved = self.trip_categories.resolve(label).map(str::to_string);
        self.trips
            .iter()
            .filter(move |trip| resolved.as_deref() == Some(trip.category.as_str()))
    }

    /// Adds a trip. Its category must be registered and is stored in the
    /// registry's spelling.
    pub fn add_trip(&mut self, mut trip: ShoppingTrip) -> ResultEngine<Uuid> {
        trip.validate()?;
        if self.trip(&trip.id).is_some() {
            return Err(existing("trip", &trip.id));
        }
        self.check_item_ids(&trip)?;
        trip.category = self.resolve_trip_category(&trip.category)?;
        let id = trip.id;
        tracing::debug!(%id, category = %trip.category, "trip added");
        self.trips.push(trip);
        Ok(id)
    }

    pub fn update_trip(&mut self, id: &Uuid, mut trip: ShoppingTrip) -> ResultEngine<()> {
        trip.id = *id;
        trip.name = normalize_required_name(&trip.name, "trip")?;
        trip.validate()?;
        self.check_item_ids(&trip)?;
        trip.category = self.resolve_trip_category(&trip.category)?;
        replace_by_id(&mut self.trips, id, "trip", |trip| trip.id, trip)
    }

    pub fn remove_trip(&mut self, id: &Uuid) -> ResultEngine<ShoppingTrip> {
        remove_by_id(&mut self.trips, id, "trip", |trip| trip.id)
    }

    /// Appends `item` to the trip `trip_id`.
    pub fn add_item(&mut self, trip_id: &Uuid, item: ShoppingItem) -> ResultEngine<Uuid> {
        item.validate()?;
        if self.trips.iter().any(|trip| trip.item(&item.id).is_some()) {
            return Err(existing("item", &item.id));
        }
        let trip = self.trip_mut(trip_id)?;
        let id = item.id;
        trip.items.push(item);
        Ok(id)
    }

    pub fn remove_item(&mut self, trip_id: &Uuid, item_id: &Uuid) -> ResultEngine<ShoppingItem> {
        let trip = self.trip_mut(trip_id)?;
        remove_by_id(&mut trip.items, item_id, "item", |item| item.id)
    }

    /// Flips `is_bought` of the item `item_id`, wherever it is, and returns
    /// the new state.
    pub fn toggle_item(&mut self, item_id: &Uuid) -> ResultEngine<bool> {
        let item = self
            .trips
            .iter_mut()
            .flat_map(|trip| trip.items.iter_mut())
            .find(|item| item.id == *item_id)
            .ok_or_else(|| not_found("item", item_id))?;
        item.is_bought = !item.is_bought;
        Ok(item.is_bought)
    }

    /// Item ids are unique across every trip. Items of the trip being
    /// replaced (same id as `trip`) do not count.
    fn check_item_ids(&self, trip: &ShoppingTrip) -> ResultEngine<()> {
        let mut seen = HashSet::new();
        for item in &trip.items {
            let taken = self
                .trips
                .iter()
                .any(|other| other.id != trip.id && other.item(&item.id).is_some());
            if !seen.insert(item.id) || taken {
                return Err(existing("item", &item.id));
            }
        }
        Ok(())
    }

    fn trip_mut(&mut self, id: &Uuid) -> ResultEngine<&mut ShoppingTrip> {
        self.trips
            .iter_mut()
            .find(|trip| trip.id == *id)
            .ok_or_else(|| not_found("trip", id))
    }

    // Trip categories

    pub fn trip_categories(&self) -> &CategoryRegistry {
        &self.trip_categories
    }

    pub fn add_trip_category(&mut self, label: &str) -> ResultEngine<String> {
        self.trip_categories.add(label)
    }

    /// Renames a category in the registry and on every trip filed under it.
    /// Returns how many trips were relabeled.
    pub fn rename_trip_category(&mut self, from: &str, to: &str) -> ResultEngine<usize> {
        let (old, new) = self.trip_categories.rename(from, to)?;
        let moved = self.relabel_trips(&old, &new);
        tracing::info!(%old, %new, trips = moved, "trip category renamed");
        Ok(moved)
    }

    /// Removes a category. Trips filed under it move to `"Other"`; none is
    /// deleted. Returns how many trips were moved.
    pub fn remove_trip_category(&mut self, label: &str) -> ResultEngine<usize> {
        let removed = self.trip_categories.remove(label)?;
        let fallback = self.trip_categories.fallback().to_string();
        let moved = self.relabel_trips(&removed, &fallback);
        tracing::info!(category = %removed, trips = moved, "trip category removed");
        Ok(moved)
    }

    fn relabel_trips(&mut self, from: &str, to: &str) -> usize {
        let mut moved = 0;
        for trip in self.trips.iter_mut().filter(|trip| trip.category == from) {
            trip.category = to.to_string();
            moved += 1;
        }
        moved
    }

    fn resolve_trip_category(&self, label: &str) -> ResultEngine<String> {
        self.trip_categories
            .resolve(label)
            .map(str::to_string)
            .ok_or_else(|| EngineError::KeyNotFound(format!("trip category {label}")))
    }
}

/// Convenience for building dates in seed data and tests.
pub(crate) fn ymd(year: i32, month: u32, day: u32) -> ResultEngine<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| EngineError::InvalidTransaction(format!("invalid date {year}-{month}-{day}")))
}
