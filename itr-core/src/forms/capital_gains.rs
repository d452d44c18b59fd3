use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category_form::LineItem;
use crate::IncomeCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapitalGainsField {
    SalePrice,
    PurchasePrice,
    TransferExpenses,
}

/// One asset sold during the year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalGainsItem {
    pub sale_price: Decimal,
    pub purchase_price: Decimal,
    pub transfer_expenses: Decimal,
    gain: Decimal,
}

impl LineItem for CapitalGainsItem {
    type Field = CapitalGainsField;

    const CATEGORY: IncomeCategory = IncomeCategory::CapitalGains;

    const FIELDS: &'static [CapitalGainsField] = &[
        CapitalGainsField::SalePrice,
        CapitalGainsField::PurchasePrice,
        CapitalGainsField::TransferExpenses,
    ];

    fn field_name(field: CapitalGainsField) -> &'static str {
        match field {
            CapitalGainsField::SalePrice => "sale_price",
            CapitalGainsField::PurchasePrice => "purchase_price",
            CapitalGainsField::TransferExpenses => "transfer_expenses",
        }
    }

    fn field(
        &self,
        field: CapitalGainsField,
    ) -> Decimal {
        match field {
            CapitalGainsField::SalePrice => self.sale_price,
            CapitalGainsField::PurchasePrice => self.purchase_price,
            CapitalGainsField::TransferExpenses => self.transfer_expenses,
        }
    }

    fn set_field(
        &mut self,
        field: CapitalGainsField,
        value: Decimal,
    ) {
        match field {
            CapitalGainsField::SalePrice => self.sale_price = value,
            CapitalGainsField::PurchasePrice => self.purchase_price = value,
            CapitalGainsField::TransferExpenses => self.transfer_expenses = value,
        }
        self.gain = self.sale_price - self.purchase_price - self.transfer_expenses;
    }

    fn amount(&self) -> Decimal {
        self.gain
    }
}
