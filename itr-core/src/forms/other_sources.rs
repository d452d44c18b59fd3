use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category_form::LineItem;
use crate::IncomeCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtherSourcesField {
    Interest,
    Dividends,
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherSourcesItem {
    pub interest: Decimal,
    pub dividends: Decimal,
    /// Family pension, gifts, winnings and the like.
    pub other: Decimal,
    total: Decimal,
}

impl LineItem for OtherSourcesItem {
    type Field = OtherSourcesField;

    const CATEGORY: IncomeCategory = IncomeCategory::OtherSources;

    const FIELDS: &'static [OtherSourcesField] = &[
        OtherSourcesField::Interest,
        OtherSourcesField::Dividends,
        OtherSourcesField::Other,
    ];

    fn field_name(field: OtherSourcesField) -> &'static str {
        match field {
            OtherSourcesField::Interest => "interest",
            OtherSourcesField::Dividends => "dividends",
            OtherSourcesField::Other => "other",
        }
    }

    fn field(
        &self,
        field: OtherSourcesField,
    ) -> Decimal {
        match field {
            OtherSourcesField::Interest => self.interest,
            OtherSourcesField::Dividends => self.dividends,
            OtherSourcesField::Other => self.other,
        }
    }

    fn set_field(
        &mut self,
        field: OtherSourcesField,
        value: Decimal,
    ) {
        match field {
            OtherSourcesField::Interest => self.interest = value,
            OtherSourcesField::Dividends => self.dividends = value,
            OtherSourcesField::Other => self.other = value,
        }
        self.total = self.interest + self.dividends + self.other;
    }

    fn amount(&self) -> Decimal {
        self.total
    }
}
