//! Plain-text rendering of the views.

use api_types::{
    LabeledAmount,
    dashboard::Dashboard,
    expenses::ExpenseBreakdown,
    goals::GoalProgress,
    insight::InsightView,
    patrimony::Patrimony,
    shopping::ShoppingOverview,
};

const BAR_WIDTH: usize = 20;

/// Progress bar clamped to `0..=100`.
fn bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn rows(out: &mut String, title: &str, rows: &[LabeledAmount]) {
    out.push_str(&format!("{title}\n"));
    if rows.is_empty() {
        out.push_str("  (none)\n");
    }
    for row in rows {
        out.push_str(&format!(
            "  {:<24} {:>16} {:>6.1}%\n",
            row.label, row.amount.formatted, row.percent
        ));
    }
}

pub fn goals(goals: &[GoalProgress]) -> String {
    let mut out = String::new();
    for goal in goals {
        out.push_str(&format!(
            "  {:<24} {} {:>5.1}%  {} / {}\n",
            goal.name,
            bar(goal.progress_percent),
            goal.progress_percent,
            goal.current.formatted,
            goal.target.formatted
        ));
    }
    if goals.is_empty() {
        out.push_str("  (none)\n");
    }
    out
}

pub fn dashboard(view: &Dashboard) -> String {
    let mut out = String::new();
    out.push_str(&format!("Income        {:>16}\n", view.income.formatted));
    out.push_str(&format!("Expenses      {:>16}\n", view.expenses.formatted));
    out.push_str(&format!("Balance       {:>16}\n", view.balance.formatted));
    out.push_str(&format!("Savings rate  {:>15.1}%\n", view.savings_rate));
    out.push_str(&format!("Pending in    {:>16}\n", view.pending_income.formatted));
    out.push_str(&format!("Pending out   {:>16}\n", view.pending_expenses.formatted));
    out.push_str(&format!("Cashback      {:>16}\n", view.cashback.formatted));
    out.push_str(&format!("Shopping list {:>16}\n", view.pending_shopping.formatted));
    out.push_str("\nGoals\n");
    out.push_str(&goals(&view.goals));
    out
}

pub fn expenses(view: &ExpenseBreakdown) -> String {
    let mut out = String::new();
    out.push_str(&format!("Total expenses {}\n\n", view.total.formatted));
    rows(&mut out, "By category", &view.by_category);
    rows(&mut out, "\nBy tag", &view.by_tag);
    out.push_str("\nTag budgets\n");
    if view.tag_budgets.is_empty() {
        out.push_str("  (none)\n");
    }
    for budget in &view.tag_budgets {
        out.push_str(&format!(
            "  #{:<23} {} {:>5.1}%  {} / {}{}\n",
            budget.tag,
            bar(budget.percent_used),
            budget.percent_used,
            budget.actual.formatted,
            budget.expected.formatted,
            if budget.over_budget { "  over budget" } else { "" }
        ));
    }
    out
}

pub fn shopping(view: &ShoppingOverview) -> String {
    let mut out = String::new();
    out.push_str(&format!("Pending shopping {}\n", view.pending_total.formatted));
    out.push_str(&format!("Categories: {}\n\n", view.categories.join(", ")));
    out.push_str("Trips\n");
    if view.trips.is_empty() {
        out.push_str("  (none)\n");
    }
    for trip in &view.trips {
        out.push_str(&format!(
            "  {} {:<20} [{}] {}/{} bought  total {}  pending {}\n",
            trip.date,
            trip.name,
            trip.category,
            trip.items_bought,
            trip.items,
            trip.total.formatted,
            trip.pending.formatted
        ));
    }
    rows(&mut out, "\nBy item category", &view.by_item_category);
    out
}

pub fn patrimony(view: &Patrimony) -> String {
    let mut out = String::new();
    out.push_str(&format!("Total patrimony {}\n\n", view.total.formatted));
    out.push_str("Assets\n");
    if view.assets.is_empty() {
        out.push_str("  (none)\n");
    }
    for asset in &view.assets {
        out.push_str(&format!(
            "  {:<24} {:<11} {:>16} {:>6.1}%\n",
            asset.name, asset.kind, asset.value.formatted, asset.share_percent
        ));
    }
    rows(&mut out, "\nBy type", &view.by_type);
    out
}

pub fn insight(view: &InsightView) -> String {
    format!("{}\n", view.message.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_is_clamped() {
        assert_eq!(bar(0.0), format!("[{}]", "-".repeat(BAR_WIDTH)));
        assert_eq!(bar(50.0), format!("[{}{}]", "#".repeat(10), "-".repeat(10)));
        assert_eq!(bar(130.0), format!("[{}]", "#".repeat(BAR_WIDTH)));
        assert_eq!(bar(-5.0), bar(0.0));
    }

    #[test]
    fn dashboard_text_mentions_totals() {
        let ledger = engine::Ledger::seeded().unwrap();
        let text = dashboard(&crate::report::dashboard(&ledger, engine::Currency::Brl));
        assert!(text.contains("R$ 5.000,00"));
        assert!(text.contains("Reserva de Emergência"));
        assert!(text.contains("61.0%"));
    }

    #[test]
    fn empty_sections_say_none() {
        let view = Patrimony {
            currency: api_types::Currency::Usd,
            total: api_types::Amount::new(0, "$0.00"),
            assets: Vec::new(),
            by_type: Vec::new(),
        };
        assert_eq!(
            patrimony(&view),
            "Total patrimony $0.00\n\nAssets\n  (none)\n\nBy type\n  (none)\n"
        );
    }
}
