use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::db::keys;

/// The five heads of income that feed Gross Total Income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IncomeCategory {
    Salary,
    HouseProperty,
    BusinessProfession,
    CapitalGains,
    OtherSources,
}

impl IncomeCategory {
    /// Every category, in the order the summary views list them.
    pub const ALL: [IncomeCategory; 5] = [
        Self::Salary,
        Self::HouseProperty,
        Self::BusinessProfession,
        Self::CapitalGains,
        Self::OtherSources,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Salary => "salary",
            Self::HouseProperty => "house-property",
            Self::BusinessProfession => "business-profession",
            Self::CapitalGains => "capital-gains",
            Self::OtherSources => "other-sources",
        }
    }

    /// Accepts the kebab-case name plus the short codes used in storage keys.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "salary" => Some(Self::Salary),
            "house-property" | "houseproperty" | "hp" => Some(Self::HouseProperty),
            "business-profession" | "businessprofession" | "pgbp" | "business" => {
                Some(Self::BusinessProfession)
            }
            "capital-gains" | "capitalgains" | "cg" => Some(Self::CapitalGains),
            "other-sources" | "othersources" | "os" => Some(Self::OtherSources),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Salary => "Income from Salary",
            Self::HouseProperty => "Income from House Property",
            Self::BusinessProfession => "Profits and Gains of Business or Profession",
            Self::CapitalGains => "Capital Gains",
            Self::OtherSources => "Income from Other Sources",
        }
    }

    /// Key under which the category total is persisted.
    pub fn storage_key(&self) -> &'static str {
        match self {
            Self::Salary => keys::SALARY_TOTAL,
            Self::HouseProperty => keys::HOUSE_PROPERTY_TOTAL,
            Self::BusinessProfession => keys::BUSINESS_PROFESSION_TOTAL,
            Self::CapitalGains => keys::CAPITAL_GAINS_TOTAL,
            Self::OtherSources => keys::OTHER_SOURCES_TOTAL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeCategoryTotal {
    pub category: IncomeCategory,
    pub total: Decimal,
}
