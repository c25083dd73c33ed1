//! The financial snapshot sent to the summarizer and the prompt built from it.

use engine::{Currency, Ledger, Money, TransactionType, aggregate};

/// The figures an analysis is based on.
#[derive(Clone, Debug, PartialEq)]
pub struct FinancialSnapshot {
    pub total_income: Money,
    pub total_expenses: Money,
    pub total_assets: Money,
    pub pending_shopping: Money,
    /// `(goal name, progress %)`, unrounded.
    pub goals: Vec<(String, f64)>,
}

impl FinancialSnapshot {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let transactions = ledger.transactions();
        Self {
            total_income: aggregate::total_by_type(transactions, TransactionType::Income),
            total_expenses: aggregate::total_by_type(transactions, TransactionType::Expense),
            total_assets: aggregate::total_assets(ledger.assets()),
            pending_shopping: aggregate::pending_shopping_cost(ledger.trips()),
            goals: ledger
                .goals()
                .iter()
                .map(|goal| (goal.name.clone(), aggregate::goal_progress_percent(goal)))
                .collect(),
        }
    }
}

/// Rounds half up, so `16.5` becomes `17` and `-0.5` becomes `0`.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn amount(value: Money, currency: Currency) -> String {
    format!("{}{}", currency.symbol(), value.to_major_string())
}

pub fn build_prompt(snapshot: &FinancialSnapshot, currency: Currency) -> String {
    let goals = snapshot
        .goals
        .iter()
        .map(|(name, percent)| format!("{name} ({}% complete)", round_half_up(*percent)))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Analyze the following financial snapshot for a personal finance app called Dohaeris.

Data:
- Monthly Earnings: {income}
- Monthly Expenses: {expenses}
- Total Assets (Patrimony): {assets}
- Pending Shopping List Estimated Cost: {shopping}
- Active Goals: {goals}

Please provide a concise, friendly, and motivating financial advice summary (max 3 short paragraphs).
Focus on:
1. Cash flow health (Earnings vs Expenses).
2. Progress towards goals.
3. A specific tip based on the assets or shopping list.

Keep the tone modern and professional yet accessible.
",
        income = amount(snapshot.total_income, currency),
        expenses = amount(snapshot.total_expenses, currency),
        assets = amount(snapshot.total_assets, currency),
        shopping = amount(snapshot.pending_shopping, currency),
    )
}
