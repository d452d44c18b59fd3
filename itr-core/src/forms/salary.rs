use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category_form::LineItem;
use crate::IncomeCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryField {
    GrossSalary,
    Perquisites,
    ProfitsInLieu,
    ExemptAllowances,
    ProfessionalTax,
}

/// One employer's salary, as on Form 16.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryItem {
    pub gross_salary: Decimal,
    pub perquisites: Decimal,
    pub profits_in_lieu: Decimal,
    /// HRA, LTA and other exempt allowances.
    pub exempt_allowances: Decimal,
    pub professional_tax: Decimal,
    taxable: Decimal,
}

impl LineItem for SalaryItem {
    type Field = SalaryField;

    const CATEGORY: IncomeCategory = IncomeCategory::Salary;

    const FIELDS: &'static [SalaryField] = &[
        SalaryField::GrossSalary,
        SalaryField::Perquisites,
        SalaryField::ProfitsInLieu,
        SalaryField::ExemptAllowances,
        SalaryField::ProfessionalTax,
    ];

    fn field_name(field: SalaryField) -> &'static str {
        match field {
            SalaryField::GrossSalary => "gross_salary",
            SalaryField::Perquisites => "perquisites",
            SalaryField::ProfitsInLieu => "profits_in_lieu",
            SalaryField::ExemptAllowances => "exempt_allowances",
            SalaryField::ProfessionalTax => "professional_tax",
        }
    }

    fn field(
        &self,
        field: SalaryField,
    ) -> Decimal {
        match field {
            SalaryField::GrossSalary => self.gross_salary,
            SalaryField::Perquisites => self.perquisites,
            SalaryField::ProfitsInLieu => self.profits_in_lieu,
            SalaryField::ExemptAllowances => self.exempt_allowances,
            SalaryField::ProfessionalTax => self.professional_tax,
        }
    }

    fn set_field(
        &mut self,
        field: SalaryField,
        value: Decimal,
    ) {
        match field {
            SalaryField::GrossSalary => self.gross_salary = value,
            SalaryField::Perquisites => self.perquisites = value,
            SalaryField::ProfitsInLieu => self.profits_in_lieu = value,
            SalaryField::ExemptAllowances => self.exempt_allowances = value,
            SalaryField::ProfessionalTax => self.professional_tax = value,
        }
        self.taxable = self.gross_salary + self.perquisites + self.profits_in_lieu
            - self.exempt_allowances
            - self.professional_tax;
    }

    fn amount(&self) -> Decimal {
        self.taxable
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn taxable_salary_adds_perquisites_and_removes_exemptions() {
        let mut item = SalaryItem::default();
        item.set_field(SalaryField::GrossSalary, dec!(1200000));
        item.set_field(SalaryField::Perquisites, dec!(30000));
        item.set_field(SalaryField::ExemptAllowances, dec!(96000));
        item.set_field(SalaryField::ProfessionalTax, dec!(2500));

        assert_eq!(item.amount(), dec!(1131500));
    }

    #[test]
    fn parse_field_accepts_dashes_and_case() {
        assert_eq!(
            SalaryItem::parse_field("Gross-Salary"),
            Some(SalaryField::GrossSalary)
        );
        assert_eq!(SalaryItem::parse_field("bonus"), None);
    }
}
