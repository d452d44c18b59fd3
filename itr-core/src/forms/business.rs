//! Business and profession income, by the presumptive scheme or from books.
//!
//! The presumptive figure is 8% of cash turnover, 6% of digital turnover
//! and 50% of professional receipts. The regular figure is receipts less
//! expenses. The schedule total is the larger of the two sums.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::category_form::LineItem;
use crate::IncomeCategory;
use crate::calculations::common::{non_negative, round_half_up};

pub const CASH_TURNOVER_RATE: Decimal = dec!(0.08);
pub const DIGITAL_TURNOVER_RATE: Decimal = dec!(0.06);
pub const PROFESSIONAL_RECEIPTS_RATE: Decimal = dec!(0.50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessField {
    CashTurnover,
    DigitalTurnover,
    ProfessionalReceipts,
    Expenses,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessItem {
    pub cash_turnover: Decimal,
    pub digital_turnover: Decimal,
    pub professional_receipts: Decimal,
    pub expenses: Decimal,
    presumptive: Decimal,
    regular: Decimal,
}

impl BusinessItem {
    pub fn presumptive_income(&self) -> Decimal {
        self.presumptive
    }

    pub fn regular_income(&self) -> Decimal {
        self.regular
    }

    fn recompute(&mut self) {
        self.presumptive = round_half_up(
            self.cash_turnover * CASH_TURNOVER_RATE
                + self.digital_turnover * DIGITAL_TURNOVER_RATE
                + self.professional_receipts * PROFESSIONAL_RECEIPTS_RATE,
        );
        self.regular = self.cash_turnover + self.digital_turnover + self.professional_receipts
            - self.expenses;
    }
}

impl LineItem for BusinessItem {
    type Field = BusinessField;

    const CATEGORY: IncomeCategory = IncomeCategory::BusinessProfession;

    const FIELDS: &'static [BusinessField] = &[
        BusinessField::CashTurnover,
        BusinessField::DigitalTurnover,
        BusinessField::ProfessionalReceipts,
        BusinessField::Expenses,
    ];

    fn field_name(field: BusinessField) -> &'static str {
        match field {
            BusinessField::CashTurnover => "cash_turnover",
            BusinessField::DigitalTurnover => "digital_turnover",
            BusinessField::ProfessionalReceipts => "professional_receipts",
            BusinessField::Expenses => "expenses",
        }
    }

    fn field(
        &self,
        field: BusinessField,
    ) -> Decimal {
        match field {
            BusinessField::CashTurnover => self.cash_turnover,
            BusinessField::DigitalTurnover => self.digital_turnover,
            BusinessField::ProfessionalReceipts => self.professional_receipts,
            BusinessField::Expenses => self.expenses,
        }
    }

    fn set_field(
        &mut self,
        field: BusinessField,
        value: Decimal,
    ) {
        match field {
            BusinessField::CashTurnover => self.cash_turnover = value,
            BusinessField::DigitalTurnover => self.digital_turnover = value,
            BusinessField::ProfessionalReceipts => self.professional_receipts = value,
            BusinessField::Expenses => self.expenses = value,
        }
        self.recompute();
    }

    /// The better of the two methods for this row alone, for display.
    fn amount(&self) -> Decimal {
        self.presumptive.max(self.regular)
    }

    fn category_total(items: &[Self]) -> Decimal {
        let presumptive: Decimal = items.iter().map(BusinessItem::presumptive_income).sum();
        let regular: Decimal = items.iter().map(BusinessItem::regular_income).sum();
        non_negative(presumptive.max(regular))
    }
}
