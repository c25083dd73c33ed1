//! Builds the serializable views from the ledger.

use std::collections::BTreeMap;

use advisor::Insight;
use api_types::{
    Amount, LabeledAmount,
    dashboard::Dashboard,
    expenses::{ExpenseBreakdown, TagBudgetView},
    goals::GoalProgress,
    insight::{InsightStatus, InsightView},
    patrimony::{AssetShare, Patrimony},
    shopping::{ShoppingOverview, TripSummary},
};
use engine::{Currency, Goal, Ledger, Money, TransactionType, aggregate};

fn amount(value: Money, currency: Currency) -> Amount {
    Amount::new(value.minor(), value.format(currency))
}

fn currency_view(currency: Currency) -> api_types::Currency {
    match currency {
        Currency::Brl => api_types::Currency::Brl,
        Currency::Usd => api_types::Currency::Usd,
        Currency::Gbp => api_types::Currency::Gbp,
    }
}

fn labeled<K: ToString>(
    totals: BTreeMap<K, Money>,
    total: Money,
    currency: Currency,
) -> Vec<LabeledAmount> {
    totals
        .into_iter()
        .map(|(label, value)| LabeledAmount {
            label: label.to_string(),
            amount: amount(value, currency),
            percent: aggregate::percent_of_total(value, total),
        })
        .collect()
}

fn goal_progress(goal: &Goal, currency: Currency) -> GoalProgress {
    GoalProgress {
        id: goal.id,
        name: goal.name.clone(),
        current: amount(goal.current_amount, currency),
        target: amount(goal.target_amount, currency),
        remaining: amount(aggregate::goal_remaining(goal), currency),
        progress_percent: aggregate::goal_progress_percent(goal),
        deadline: goal.deadline,
    }
}

pub fn goals(ledger: &Ledger, currency: Currency) -> Vec<GoalProgress> {
    ledger
        .goals()
        .iter()
        .map(|goal| goal_progress(goal, currency))
        .collect()
}

pub fn dashboard(ledger: &Ledger, currency: Currency) -> Dashboard {
    let txs = ledger.transactions();
    Dashboard {
        currency: currency_view(currency),
        income: amount(aggregate::total_by_type(txs, TransactionType::Income), currency),
        expenses: amount(aggregate::total_by_type(txs, TransactionType::Expense), currency),
        balance: amount(aggregate::net_balance(txs), currency),
        savings_rate: aggregate::savings_rate(txs),
        pending_income: amount(
            aggregate::pending_total(txs, TransactionType::Income),
            currency,
        ),
        pending_expenses: amount(
            aggregate::pending_total(txs, TransactionType::Expense),
            currency,
        ),
        cashback: amount(aggregate::total_cashback(txs, ledger.cards()), currency),
        pending_shopping: amount(aggregate::pending_shopping_cost(ledger.trips()), currency),
        goals: goals(ledger, currency),
    }
}

pub fn expenses(ledger: &Ledger, currency: Currency) -> ExpenseBreakdown {
    let txs = ledger.transactions();
    let total = aggregate::total_by_type(txs, TransactionType::Expense);
    let tag_budgets = aggregate::tag_budget_statuses(txs, ledger.tag_budgets())
        .into_iter()
        .map(|status| TagBudgetView {
            over_budget: status.remaining.is_negative(),
            expected: amount(status.expected, currency),
            actual: amount(status.actual, currency),
            remaining: amount(status.remaining, currency),
            percent_used: status.percent_used,
            tag: status.tag,
        })
        .collect();

    ExpenseBreakdown {
        currency: currency_view(currency),
        total: amount(total, currency),
        by_category: labeled(aggregate::expenses_by_category(txs), total, currency),
        by_tag: labeled(aggregate::expenses_by_tag(txs), total, currency),
        tag_budgets,
    }
}

pub fn shopping(ledger: &Ledger, currency: Currency) -> ShoppingOverview {
    let trips = ledger.trips();
    let items_total: Money = trips.iter().map(aggregate::trip_total).sum();

    ShoppingOverview {
        currency: currency_view(currency),
        categories: ledger.trip_categories().labels().to_vec(),
        pending_total: amount(aggregate::pending_shopping_cost(trips), currency),
        trips: trips
            .iter()
            .map(|trip| TripSummary {
                id: trip.id,
                name: trip.name.clone(),
                date: trip.date,
                category: trip.category.clone(),
                total: amount(aggregate::trip_total(trip), currency),
                pending: amount(aggregate::trip_pending(trip), currency),
                items: trip.items.len(),
                items_bought: trip.items.iter().filter(|item| item.is_bought).count(),
            })
            .collect(),
        by_item_category: labeled(
            aggregate::shopping_by_item_category(trips),
            items_total,
            currency,
        ),
    }
}

pub fn patrimony(ledger: &Ledger, currency: Currency) -> Patrimony {
    let assets = ledger.assets();
    let total = aggregate::total_assets(assets);

    Patrimony {
        currency: currency_view(currency),
        total: amount(total, currency),
        assets: assets
            .iter()
            .zip(aggregate::asset_shares(assets))
            .map(|(asset, (_, share))| AssetShare {
                id: asset.id,
                name: asset.name.clone(),
                kind: asset.kind.as_str().to_string(),
                value: amount(asset.value, currency),
                share_percent: share,
            })
            .collect(),
        by_type: labeled(aggregate::assets_by_type(assets), total, currency),
    }
}

pub fn insight(insight: &Insight) -> InsightView {
    let status = match insight {
        Insight::Advice(_) => InsightStatus::Advice,
        Insight::Failed(_) => InsightStatus::Failed,
        Insight::Cancelled => InsightStatus::Cancelled,
    };
    InsightView {
        status,
        message: insight.message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor::InsightError;

    fn seeded() -> Ledger {
        Ledger::seeded().unwrap()
    }

    #[test]
    fn dashboard_of_seeded_ledger() {
        let view = dashboard(&seeded(), Currency::Brl);

        assert_eq!(view.income, Amount::new(500_000, "R$ 5.000,00"));
        assert_eq!(view.expenses.minor, 195_000);
        assert_eq!(view.balance, Amount::new(305_000, "R$ 3.050,00"));
        assert_eq!(view.pending_shopping.minor, 5_800);
        assert_eq!(view.cashback.minor, 0);
        assert!((view.savings_rate - 305_000.0 / 500_000.0 * 100.0).abs() < 1e-9);
        assert_eq!(view.goals.len(), 2);
    }

    #[test]
    fn expenses_group_by_category_and_tag() {
        let view = expenses(&seeded(), Currency::Usd);

        let categories: Vec<_> = view
            .by_category
            .iter()
            .map(|row| (row.label.as_str(), row.amount.minor))
            .collect();
        assert_eq!(categories, [("Alimentação", 45_000), ("Moradia", 150_000)]);
        assert_eq!(view.tag_budgets[0].tag, "fixo");
        assert!(!view.tag_budgets[0].over_budget);
        assert!((view.tag_budgets[0].percent_used - 100.0).abs() < 1e-9);
        assert_eq!(view.tag_budgets[1].remaining.formatted, "$150.00");
    }

    #[test]
    fn shopping_lists_trips_and_categories() {
        let view = shopping(&seeded(), Currency::Brl);

        assert_eq!(view.categories, ["Mercado", "Farmácia", "Other"]);
        assert_eq!(view.pending_total.minor, 5_800);
        let trip = &view.trips[0];
        assert_eq!(trip.total.formatted, "R$ 83,90");
        assert_eq!((trip.items, trip.items_bought), (2, 1));
        assert_eq!(view.by_item_category.len(), 2);
    }

    #[test]
    fn patrimony_shares_add_up() {
        let view = patrimony(&seeded(), Currency::Gbp);

        assert_eq!(view.total.formatted, "£16,500.00");
        let sum: f64 = view.assets.iter().map(|a| a.share_percent).sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert_eq!(view.assets[1].kind, "Crypto");
        assert_eq!(view.by_type.len(), 3);
    }

    #[test]
    fn insight_views() {
        let view = insight(&Insight::Failed(InsightError::EmptyResponse));
        assert_eq!(view.status, InsightStatus::Failed);
        assert_eq!(view.message, "Could not generate advice at this time.");

        let view = insight(&Insight::Advice("Save more.".to_string()));
        assert_eq!(view.status, InsightStatus::Advice);
        assert_eq!(view.message, "Save more.");
    }
}
