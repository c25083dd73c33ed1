//! Personal finance ledger.
//!
//! The crate has two halves:
//!
//! - [`Ledger`], the in-memory store owning transactions, cards, tag budgets,
//!   goals, assets and shopping trips;
//! - [`aggregate`], pure functions deriving totals, breakdowns and
//!   percentages from those collections.
//!
//! ```rust
//! use engine::{Ledger, aggregate};
//!
//! let ledger = Ledger::seeded().unwrap();
//! let balance = aggregate::net_balance(ledger.transactions());
//! assert_eq!(balance.minor(), 305_000);
//! ```

pub use assets::{Asset, AssetType};
pub use cards::CreditCard;
pub use categories::{CategoryRegistry, FALLBACK_CATEGORY};
pub use currency::Currency;
pub use error::EngineError;
pub use goals::Goal;
pub use money::Money;
pub use seed::DEFAULT_TRIP_CATEGORIES;
pub use shopping::{ShoppingItem, ShoppingTrip};
pub use store::Ledger;
pub use tag_budgets::TagBudget;
pub use transactions::{
    NewTransaction, PaymentMethod, Transaction, TransactionStatus, TransactionType,
};

pub mod aggregate;
mod assets;
mod cards;
mod categories;
mod currency;
mod error;
mod goals;
mod money;
mod seed;
mod shopping;
mod store;
mod tag_budgets;
mod transactions;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;
