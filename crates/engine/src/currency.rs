use serde::{Deserialize, Serialize};

use crate::EngineError;

/// ISO currency code used to display money values.
///
/// The ledger is mono-currency: every amount is assumed to be in one implicit
/// unit and no conversion ever happens. The currency only drives formatting.
///
/// ## Minor units
///
/// Amounts are stored as an `i64` number of **minor units** (see `Money`).
/// `minor_units()` returns how many decimal digits are used when converting
/// between major units (`10.50`) and stored integers (`1050`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Brl,
    Usd,
    Gbp,
}

/// Separators and symbol placement of a display locale.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Locale {
    pub(crate) symbol: &'static str,
    pub(crate) symbol_separator: &'static str,
    pub(crate) grouping: char,
    pub(crate) decimal: char,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Brl => "BRL",
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Brl => "R$",
            Currency::Usd => "$",
            Currency::Gbp => "£",
        }
    }

    /// Number of fraction digits used when formatting/parsing amounts.
    #[must_use]
    pub const fn minor_units(self) -> u8 {
        match self {
            Currency::Brl | Currency::Usd | Currency::Gbp => 2,
        }
    }

    /// BRL renders in pt-BR style, the others in en-US style.
    pub(crate) const fn locale(self) -> Locale {
        match self {
            Currency::Brl => Locale {
                symbol: self.symbol(),
                symbol_separator: " ",
                grouping: '.',
                decimal: ',',
            },
            Currency::Usd | Currency::Gbp => Locale {
                symbol: self.symbol(),
                symbol_separator: "",
                grouping: ',',
                decimal: '.',
            },
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "BRL" => Ok(Currency::Brl),
            "USD" => Ok(Currency::Usd),
            "GBP" => Ok(Currency::Gbp),
            other => Err(EngineError::UnsupportedCurrency(other.to_string())),
        }
    }
}

impl core::str::FromStr for Currency {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::try_from(s)
    }
}
