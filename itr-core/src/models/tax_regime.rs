use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::TaxBracket;
use crate::calculations::slabs::{NEW_REGIME_BRACKETS, OLD_REGIME_BRACKETS};

/// Ceiling on the deduction the new regime honours.
pub const NEW_REGIME_DEDUCTION_CAP: Decimal = dec!(75000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxRegime {
    Old,
    #[default]
    New,
}

impl TaxRegime {
    pub const ALL: [TaxRegime; 2] = [Self::Old, Self::New];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Old => "old",
            Self::New => "new",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "old" => Some(Self::Old),
            "new" => Some(Self::New),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Old => "Old Regime",
            Self::New => "New Regime",
        }
    }

    pub fn brackets(&self) -> &'static [TaxBracket] {
        match self {
            Self::Old => OLD_REGIME_BRACKETS,
            Self::New => NEW_REGIME_BRACKETS,
        }
    }

    /// `None` means the full deduction total is applied.
    pub fn deduction_cap(&self) -> Option<Decimal> {
        match self {
            Self::Old => None,
            Self::New => Some(NEW_REGIME_DEDUCTION_CAP),
        }
    }
}

impl fmt::Display for TaxRegime {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}
