//! Derived financial figures.
//!
//! Every function here is pure: it reads the collections it is given and
//! never mutates them. Empty inputs are ordinary inputs and produce the
//! identity value (`Money::ZERO`, `0.0`, an empty map or vector), so none of
//! these functions can fail.
//!
//! Percentages are returned unrounded; rounding and clamping belong to
//! whoever displays them.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    Asset, AssetType, CreditCard, Goal, Money, ShoppingTrip, TagBudget, Transaction,
    TransactionStatus, TransactionType,
};

/// Label used for expenses without a category.
pub const UNCATEGORIZED_EXPENSE: &str = "Other";
/// Label used for shopping items without a category.
pub const UNCATEGORIZED_ITEM: &str = "Uncategorized";

/// Sum of `amount` over the transactions of `kind`.
pub fn total_by_type<'a, I>(transactions: I, kind: TransactionType) -> Money
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|tx| tx.kind == kind)
        .map(|tx| tx.amount)
        .sum()
}

/// Income minus expenses. Negative when expenses exceed income.
pub fn net_balance(transactions: &[Transaction]) -> Money {
    total_by_type(transactions, TransactionType::Income)
        - total_by_type(transactions, TransactionType::Expense)
}

/// Sum of `amount` over the pending transactions of `kind`.
pub fn pending_total(transactions: &[Transaction], kind: TransactionType) -> Money {
    total_by_type(
        transactions
            .iter()
            .filter(|tx| tx.status == TransactionStatus::Pending),
        kind,
    )
}

/// Folds `items` into a map of key → summed value.
///
/// Only keys produced by at least one item appear in the result; a key is
/// never emitted with a zero entry just because it exists somewhere else.
pub fn group_sum_by_key<T, I, K, V>(items: I, key: K, value: V) -> BTreeMap<String, Money>
where
    I: IntoIterator<Item = T>,
    K: Fn(&T) -> String,
    V: Fn(&T) -> Money,
{
    items.into_iter().fold(BTreeMap::new(), |mut acc, item| {
        *acc.entry(key(&item)).or_insert(Money::ZERO) += value(&item);
        acc
    })
}

/// Returns `label` trimmed, or `fallback` when it is missing or blank.
pub fn label_or(label: Option<&str>, fallback: &str) -> String {
    match label.map(str::trim) {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => fallback.to_string(),
    }
}

/// Expense totals per category; uncategorized expenses go under `"Other"`.
pub fn expenses_by_category(transactions: &[Transaction]) -> BTreeMap<String, Money> {
    group_sum_by_key(
        transactions.iter().filter(|tx| tx.is_expense()),
        |tx| label_or(tx.category.as_deref(), UNCATEGORIZED_EXPENSE),
        |tx| tx.amount,
    )
}

/// Expense totals per tag. An expense counts once under each of its tags;
/// untagged expenses do not appear.
pub fn expenses_by_tag(transactions: &[Transaction]) -> BTreeMap<String, Money> {
    group_sum_by_key(
        transactions
            .iter()
            .filter(|tx| tx.is_expense())
            .flat_map(|tx| tx.tags.iter().map(move |tag| (tag, tx.amount))),
        |(tag, _)| tag.to_string(),
        |(_, amount)| *amount,
    )
}

/// Price totals per item category across every trip; items without a
/// category go under `"Uncategorized"`.
pub fn shopping_by_item_category(trips: &[ShoppingTrip]) -> BTreeMap<String, Money> {
    group_sum_by_key(
        trips.iter().flat_map(|trip| trip.items.iter()),
        |item| label_or(Some(item.category.as_str()), UNCATEGORIZED_ITEM),
        |item| item.price,
    )
}

/// `part / total * 100`, or `0` when `total` is zero.
pub fn percent_of_total(part: Money, total: Money) -> f64 {
    if total.is_zero() {
        return 0.0;
    }
    part.as_f64() / total.as_f64() * 100.0
}

/// `current / target * 100`. Not clamped: an over-achieved goal exceeds 100.
pub fn goal_progress_percent(goal: &Goal) -> f64 {
    percent_of_total(goal.current_amount, goal.target_amount)
}

/// What is still missing to reach the goal. Negative once over-achieved.
pub fn goal_remaining(goal: &Goal) -> Money {
    goal.target_amount - goal.current_amount
}

/// Sum of expenses carrying `tag`.
pub fn tag_budget_actual(transactions: &[Transaction], tag: &str) -> Money {
    transactions
        .iter()
        .filter(|tx| tx.is_expense() && tx.has_tag(tag))
        .map(|tx| tx.amount)
        .sum()
}

/// Planned versus actual spending of one tag budget.
#[derive(Clone, Debug, PartialEq)]
pub struct TagBudgetStatus {
    pub tag: String,
    pub expected: Money,
    pub actual: Money,
    /// `expected - actual`; negative when the budget is exceeded.
    pub remaining: Money,
    pub percent_used: f64,
}

pub fn tag_budget_statuses(
    transactions: &[Transaction],
    budgets: &[TagBudget],
) -> Vec<TagBudgetStatus> {
    budgets
        .iter()
        .map(|budget| {
            let actual = tag_budget_actual(transactions, &budget.tag);
            TagBudgetStatus {
                tag: budget.tag.clone(),
                expected: budget.expected_amount,
                actual,
                remaining: budget.expected_amount - actual,
                percent_used: percent_of_total(actual, budget.expected_amount),
            }
        })
        .collect()
}

/// Share of income kept: `saved / (expense + saved) * 100`, where
/// `saved = income - expense`.
///
/// Returns `0` whenever `saved <= 0`, so breaking even and overspending
/// report the same rate.
pub fn savings_rate(transactions: &[Transaction]) -> f64 {
    let income = total_by_type(transactions, TransactionType::Income);
    let expense = total_by_type(transactions, TransactionType::Expense);
    let saved = income - expense;
    if !saved.is_positive() {
        return 0.0;
    }
    saved.as_f64() / (expense + saved).as_f64() * 100.0
}

/// Sum of every item price of one trip.
pub fn trip_total(trip: &ShoppingTrip) -> Money {
    trip.items.iter().map(|item| item.price).sum()
}

/// Sum of the prices of the items of one trip not bought yet.
pub fn trip_pending(trip: &ShoppingTrip) -> Money {
    trip.items
        .iter()
        .filter(|item| !item.is_bought)
        .map(|item| item.price)
        .sum()
}

/// Cost of every item not bought yet, across all trips and categories.
pub fn pending_shopping_cost(trips: &[ShoppingTrip]) -> Money {
    trips.iter().map(trip_pending).sum()
}

/// Total patrimony.
pub fn total_assets(assets: &[Asset]) -> Money {
    assets.iter().map(|asset| asset.value).sum()
}

/// Each asset's share of total patrimony, in input order.
pub fn asset_shares(assets: &[Asset]) -> Vec<(Uuid, f64)> {
    let total = total_assets(assets);
    assets
        .iter()
        .map(|asset| (asset.id, percent_of_total(asset.value, total)))
        .collect()
}

/// Patrimony per asset type. Types with no asset are omitted.
pub fn assets_by_type(assets: &[Asset]) -> BTreeMap<AssetType, Money> {
    assets.iter().fold(BTreeMap::new(), |mut acc, asset| {
        *acc.entry(asset.kind).or_insert(Money::ZERO) += asset.value;
        acc
    })
}

/// Cashback earned by one expense.
///
/// Resolution order:
/// 1. an explicit `cashback_amount` (zero included) is authoritative;
/// 2. otherwise a card payment earns `amount * default_cashback / 100`;
/// 3. otherwise nothing.
pub fn cashback_for_expense(transaction: &Transaction, cards: &[CreditCard]) -> Money {
    if let Some(explicit) = transaction.cashback_amount {
        return explicit;
    }
    transaction
        .payment_method
        .card_id()
        .and_then(|card_id| cards.iter().find(|card| card.id == card_id))
        .map_or(Money::ZERO, |card| {
            transaction.amount.percent(card.default_cashback)
        })
}

/// Cashback earned across all expenses.
pub fn total_cashback(transactions: &[Transaction], cards: &[CreditCard]) -> Money {
    transactions
        .iter()
        .filter(|tx| tx.is_expense())
        .map(|tx| cashback_for_expense(tx, cards))
        .sum()
}

/// Due date of the statement a card purchase lands in.
pub fn card_statement_due_date(card: &CreditCard, purchase_date: NaiveDate) -> NaiveDate {
    card.statement_due_date(purchase_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NewTransaction, PaymentMethod, ShoppingItem};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 10, d).unwrap()
    }

    fn income(amount: i64) -> Transaction {
        Transaction::new(NewTransaction::income("Salary", Money::new(amount), day(1))).unwrap()
    }

    fn expense(amount: i64) -> Transaction {
        Transaction::new(NewTransaction::expense("Rent", Money::new(amount), day(5))).unwrap()
    }

    fn tagged(amount: i64, tags: &[&str]) -> Transaction {
        Transaction::new(
            NewTransaction::expense("Groceries", Money::new(amount), day(8)).tags(tags.iter().copied()),
        )
        .unwrap()
    }

    #[test]
    fn totals_and_balance() {
        let txs = vec![income(500_000), expense(150_000), expense(45_000)];
        assert_eq!(total_by_type(&txs, TransactionType::Income), Money::new(500_000));
        assert_eq!(total_by_type(&txs, TransactionType::Expense), Money::new(195_000));
        assert_eq!(net_balance(&txs), Money::new(305_000));
    }

    #[test]
    fn balance_goes_negative_when_overspending() {
        let txs = vec![income(1_000), expense(1_500)];
        assert_eq!(net_balance(&txs), Money::new(-500));
    }

    #[test]
    fn empty_inputs_give_identity() {
        assert_eq!(total_by_type(std::iter::empty(), TransactionType::Income), Money::ZERO);
        assert_eq!(net_balance(&[]), Money::ZERO);
        assert!(expenses_by_category(&[]).is_empty());
        assert!(expenses_by_tag(&[]).is_empty());
        assert!(shopping_by_item_category(&[]).is_empty());
        assert!(group_sum_by_key(Vec::<Money>::new(), |_| String::new(), |m| *m).is_empty());
        assert_eq!(savings_rate(&[]), 0.0);
        assert_eq!(pending_shopping_cost(&[]), Money::ZERO);
        assert_eq!(total_assets(&[]), Money::ZERO);
        assert!(asset_shares(&[]).is_empty());
        assert!(assets_by_type(&[]).is_empty());
        assert_eq!(total_cashback(&[], &[]), Money::ZERO);
        assert!(tag_budget_statuses(&[], &[]).is_empty());
    }

    #[test]
    fn percent_of_zero_total_is_zero() {
        assert_eq!(percent_of_total(Money::new(123), Money::ZERO), 0.0);
        assert_eq!(percent_of_total(Money::ZERO, Money::ZERO), 0.0);
        assert_eq!(percent_of_total(Money::new(-5), Money::ZERO), 0.0);
    }

    #[test]
    fn percent_is_unrounded() {
        let pct = percent_of_total(Money::new(1), Money::new(3));
        assert!((pct - 33.333_333_333_333_336).abs() < 1e-12);
    }

    #[test]
    fn category_breakdown_uses_fallback_label() {
        let mut txs = vec![expense(1_000), expense(2_000), income(9_000)];
        txs[1].category = Some("Moradia".to_string());
        let mut blank = expense(500);
        blank.category = Some("   ".to_string());
        txs.push(blank);

        let breakdown = expenses_by_category(&txs);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown["Other"], Money::new(1_500));
        assert_eq!(breakdown["Moradia"], Money::new(2_000));
    }

    #[test]
    fn tag_breakdown_counts_each_tag() {
        let txs = vec![tagged(10_000, &["food", "essentials"]), tagged(2_000, &["food"]), expense(700)];
        let by_tag = expenses_by_tag(&txs);
        assert_eq!(by_tag.len(), 2);
        assert_eq!(by_tag["food"], Money::new(12_000));
        assert_eq!(by_tag["essentials"], Money::new(10_000));
    }

    #[test]
    fn tag_actual_ignores_income() {
        let mut salary = income(500_000);
        salary.tags = vec!["food".to_string()];
        let txs = vec![salary, tagged(10_000, &["food", "essentials"])];
        assert_eq!(tag_budget_actual(&txs, "food"), Money::new(10_000));
        assert_eq!(tag_budget_actual(&txs, "essentials"), Money::new(10_000));
        assert_eq!(tag_budget_actual(&txs, "travel"), Money::ZERO);
    }

    #[test]
    fn tag_actual_matches_inner_whitespace_runs() {
        let txs = vec![tagged(150_000, &["Fixed  Cost"])];
        assert_eq!(tag_budget_actual(&txs, "fixed cost"), Money::new(150_000));
        assert_eq!(tag_budget_actual(&txs, " fixed   COST "), Money::new(150_000));
        assert_eq!(tag_budget_actual(&txs, "   "), Money::ZERO);
    }

    #[test]
    fn tag_budget_status_reports_overrun() {
        let txs = vec![tagged(12_000, &["food"])];
        let budgets = vec![TagBudget::new("food", Money::new(10_000)).unwrap()];
        let statuses = tag_budget_statuses(&txs, &budgets);
        assert_eq!(statuses[0].actual, Money::new(12_000));
        assert_eq!(statuses[0].remaining, Money::new(-2_000));
        assert!((statuses[0].percent_used - 120.0).abs() < 1e-9);
    }

    #[test]
    fn savings_rate_boundaries() {
        assert_eq!(savings_rate(&[income(1_000), expense(1_000)]), 0.0);
        assert_eq!(savings_rate(&[income(1_000), expense(1_500)]), 0.0);
        assert_eq!(savings_rate(&[expense(1_500)]), 0.0);

        let rate = savings_rate(&[income(500_000), expense(150_000), expense(45_000)]);
        assert!((rate - 61.0).abs() < 1e-9);
        assert_eq!(savings_rate(&[income(1_000)]), 100.0);
    }

    #[test]
    fn pending_total_filters_status() {
        let pending = Transaction::new(
            NewTransaction::expense("Internet", Money::new(9_990), day(3)).pending_until(day(15)),
        )
        .unwrap();
        let txs = vec![pending, expense(1_000), income(3_000)];
        assert_eq!(pending_total(&txs, TransactionType::Expense), Money::new(9_990));
        assert_eq!(pending_total(&txs, TransactionType::Income), Money::ZERO);
    }

    #[test]
    fn shopping_totals() {
        let items = vec![
            ShoppingItem::new("Arroz 5kg", Some("Grãos"), Money::new(2_590)).unwrap().bought(),
            ShoppingItem::new("Leite 12un", Some("Laticínios"), Money::new(5_800)).unwrap(),
            ShoppingItem::new("Sabão", None, Money::new(1_200)).unwrap(),
        ];
        let trip = ShoppingTrip::new("Mercado Mensal", day(20), "Mercado", items).unwrap();
        let trips = vec![trip];

        assert_eq!(trip_total(&trips[0]), Money::new(9_590));
        assert_eq!(trip_pending(&trips[0]), Money::new(7_000));
        assert_eq!(pending_shopping_cost(&trips), Money::new(7_000));

        let by_category = shopping_by_item_category(&trips);
        assert_eq!(by_category["Grãos"], Money::new(2_590));
        assert_eq!(by_category["Uncategorized"], Money::new(1_200));
        assert_eq!(by_category.len(), 3);
    }

    #[test]
    fn assets_by_type_sums_per_kind() {
        let assets = vec![
            Asset::new("Nubank", Money::new(500_000), AssetType::Bank).unwrap(),
            Asset::new("Inter", Money::new(100_000), AssetType::Bank).unwrap(),
            Asset::new("Bitcoin", Money::new(350_000), AssetType::Crypto).unwrap(),
        ];
        let by_type = assets_by_type(&assets);
        assert_eq!(by_type[&AssetType::Bank], Money::new(600_000));
        assert_eq!(by_type[&AssetType::Crypto], Money::new(350_000));
        assert!(!by_type.contains_key(&AssetType::Fgts));
    }

    #[test]
    fn cashback_resolution_order() {
        let card = CreditCard::new("Nubank", 2.0, 25, 5, None).unwrap();
        let cards = vec![card.clone()];
        let base = NewTransaction::expense("Jantar", Money::new(10_000), day(10))
            .paid_with(PaymentMethod::Card(card.id));

        let derived = Transaction::new(base.clone()).unwrap();
        assert_eq!(cashback_for_expense(&derived, &cards), Money::new(200));

        let zero = Transaction::new(base.clone().cashback(Money::ZERO)).unwrap();
        assert_eq!(cashback_for_expense(&zero, &cards), Money::ZERO);

        let explicit = Transaction::new(base.cashback(Money::new(555))).unwrap();
        assert_eq!(cashback_for_expense(&explicit, &cards), Money::new(555));

        assert_eq!(cashback_for_expense(&derived, &[]), Money::ZERO);
        assert_eq!(cashback_for_expense(&expense(10_000), &cards), Money::ZERO);
        assert_eq!(total_cashback(&[derived, zero, explicit], &cards), Money::new(755));
    }
}
