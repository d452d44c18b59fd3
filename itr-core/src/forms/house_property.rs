use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::category_form::LineItem;
use crate::IncomeCategory;
use crate::calculations::common::{non_negative, round_half_up};

/// Flat allowance on net annual value for repairs, whatever was spent.
pub const STANDARD_DEDUCTION_RATE: Decimal = dec!(0.30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HousePropertyField {
    AnnualRent,
    MunicipalTax,
    InterestOnLoan,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousePropertyItem {
    pub annual_rent: Decimal,
    pub municipal_tax: Decimal,
    pub interest_on_loan: Decimal,
    taxable: Decimal,
}

impl HousePropertyItem {
    /// Rent less municipal taxes paid.
    pub fn net_annual_value(&self) -> Decimal {
        self.annual_rent - self.municipal_tax
    }

    pub fn standard_deduction(&self) -> Decimal {
        round_half_up(non_negative(self.net_annual_value()) * STANDARD_DEDUCTION_RATE)
    }
}

impl LineItem for HousePropertyItem {
    type Field = HousePropertyField;

    const CATEGORY: IncomeCategory = IncomeCategory::HouseProperty;

    const FIELDS: &'static [HousePropertyField] = &[
        HousePropertyField::AnnualRent,
        HousePropertyField::MunicipalTax,
        HousePropertyField::InterestOnLoan,
    ];

    fn field_name(field: HousePropertyField) -> &'static str {
        match field {
            HousePropertyField::AnnualRent => "annual_rent",
            HousePropertyField::MunicipalTax => "municipal_tax",
            HousePropertyField::InterestOnLoan => "interest_on_loan",
        }
    }

    fn field(
        &self,
        field: HousePropertyField,
    ) -> Decimal {
        match field {
            HousePropertyField::AnnualRent => self.annual_rent,
            HousePropertyField::MunicipalTax => self.municipal_tax,
            HousePropertyField::InterestOnLoan => self.interest_on_loan,
        }
    }

    fn set_field(
        &mut self,
        field: HousePropertyField,
        value: Decimal,
    ) {
        match field {
            HousePropertyField::AnnualRent => self.annual_rent = value,
            HousePropertyField::MunicipalTax => self.municipal_tax = value,
            HousePropertyField::InterestOnLoan => self.interest_on_loan = value,
        }
        self.taxable = self.net_annual_value() - self.standard_deduction() - self.interest_on_loan;
    }

    fn amount(&self) -> Decimal {
        self.taxable
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn let_out_property_income() {
        let mut item = HousePropertyItem::default();
        item.set_field(HousePropertyField::AnnualRent, dec!(360000));
        item.set_field(HousePropertyField::MunicipalTax, dec!(10000));
        item.set_field(HousePropertyField::InterestOnLoan, dec!(100000));

        // NAV 3,50,000 - 30% (1,05,000) - interest 1,00,000
        assert_eq!(item.net_annual_value(), dec!(350000));
        assert_eq!(item.standard_deduction(), dec!(105000));
        assert_eq!(item.amount(), dec!(145000));
    }

    #[test]
    fn self_occupied_property_is_a_loss() {
        let mut item = HousePropertyItem::default();
        item.set_field(HousePropertyField::InterestOnLoan, dec!(200000));

        assert_eq!(item.standard_deduction(), dec!(0));
        assert_eq!(item.amount(), dec!(-200000));
    }

    #[test]
    fn schedule_total_never_negative() {
        let mut item = HousePropertyItem::default();
        item.set_field(HousePropertyField::InterestOnLoan, dec!(200000));

        assert_eq!(HousePropertyItem::category_total(&[item]), dec!(0));
    }
}
