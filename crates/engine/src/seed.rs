//! Static sample data the application starts from.

use crate::{
    Asset, AssetType, CreditCard, Goal, Ledger, Money, NewTransaction, ResultEngine,
    ShoppingItem, ShoppingTrip, TagBudget, store::ymd,
};

/// Trip categories offered out of the box (`"Other"` is implicit).
pub const DEFAULT_TRIP_CATEGORIES: [&str; 2] = ["Mercado", "Farmácia"];

impl Ledger {
    /// A ledger filled with the sample month of October 2023.
    pub fn seeded() -> ResultEngine<Self> {
        let mut ledger = Ledger::with_trip_categories(DEFAULT_TRIP_CATEGORIES)?;

        // add_transaction prepends, so feed the list back to front.
        let drafts = [
            NewTransaction::income("Salário Principal", Money::new(500_000), ymd(2023, 10, 1)?)
                .tags(["salario"]),
            NewTransaction::expense("Aluguel Mensal", Money::new(150_000), ymd(2023, 10, 5)?)
                .category("Moradia")
                .tags(["fixo"]),
            NewTransaction::expense("Mercado Semanal", Money::new(45_000), ymd(2023, 10, 8)?)
                .category("Alimentação")
                .tags(["variavel"]),
        ];
        for draft in drafts.into_iter().rev() {
            ledger.add_transaction(draft)?;
        }

        ledger.add_card(CreditCard::new("Nubank", 1.0, 25, 5, Some("#8b5cf6"))?)?;

        ledger.set_tag_budget(TagBudget::new("fixo", Money::new(150_000))?)?;
        ledger.set_tag_budget(TagBudget::new("variavel", Money::new(60_000))?)?;

        ledger.add_goal(Goal::new(
            "Reserva de Emergência",
            Money::new(500_000),
            Money::new(1_500_000),
            None,
        )?)?;
        ledger.add_goal(Goal::new(
            "Viagem Japão",
            Money::new(200_000),
            Money::new(1_200_000),
            None,
        )?)?;

        ledger.add_asset(Asset::new("Nubank (Reserva)", Money::new(500_000), AssetType::Bank)?)?;
        ledger.add_asset(Asset::new("Bitcoin", Money::new(350_000), AssetType::Crypto)?)?;
        ledger.add_asset(Asset::new(
            "Tesouro Direto",
            Money::new(800_000),
            AssetType::Investment,
        )?)?;

        let items = vec![
            ShoppingItem::new("Arroz 5kg", Some("Grãos"), Money::new(2_590))?.bought(),
            ShoppingItem::new("Leite 12un", Some("Laticínios"), Money::new(5_800))?,
        ];
        ledger.add_trip(ShoppingTrip::new(
            "Mercado Mensal",
            ymd(2023, 10, 20)?,
            "Mercado",
            items,
        )?)?;

        tracing::debug!(
            transactions = ledger.transactions().len(),
            trips = ledger.trips().len(),
            "ledger seeded"
        );
        Ok(ledger)
    }
}
