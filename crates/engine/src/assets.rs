use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine, util::normalize_required_name};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AssetType {
    #[default]
    Bank,
    Investment,
    Crypto,
    #[serde(rename = "FGTS")]
    Fgts,
    RealEstate,
    Other,
}

impl AssetType {
    pub const ALL: [AssetType; 6] = [
        Self::Bank,
        Self::Investment,
        Self::Crypto,
        Self::Fgts,
        Self::RealEstate,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bank => "Bank",
            Self::Investment => "Investment",
            Self::Crypto => "Crypto",
            Self::Fgts => "FGTS",
            Self::RealEstate => "RealEstate",
            Self::Other => "Other",
        }
    }
}

impl core::fmt::Display for AssetType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something owned that counts towards total patrimony.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: Uuid,
    pub name: String,
    pub value: Money,
    #[serde(rename = "type")]
    pub kind: AssetType,
}

impl Asset {
    pub fn new(name: &str, value: Money, kind: AssetType) -> ResultEngine<Self> {
        let asset = Self {
            id: Uuid::new_v4(),
            name: normalize_required_name(name, "asset")?,
            value,
            kind,
        };
        asset.validate()?;
        Ok(asset)
    }

    pub(crate) fn validate(&self) -> ResultEngine<()> {
        if self.value.is_negative() {
            return Err(EngineError::InvalidAmount(format!(
                "value of asset '{}' must be >= 0",
                self.name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_type_serializes_like_the_forms() {
        assert_eq!(serde_json::to_string(&AssetType::Fgts).unwrap(), "\"FGTS\"");
        assert_eq!(
            serde_json::to_string(&AssetType::RealEstate).unwrap(),
            "\"RealEstate\""
        );
    }

    #[test]
    fn new_rejects_negative_value() {
        assert!(matches!(
            Asset::new("Bitcoin", Money::new(-1), AssetType::Crypto),
            Err(EngineError::InvalidAmount(_))
        ));
    }
}
