use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::non_negative;
use super::{FormError, Schedule};
use crate::db::store::{KeyValueStore, StoreError};
use crate::input::{clamp_amount, coerce_amount};
use crate::{IncomeCategory, IncomeCategoryTotal};

/// One editable row of an income schedule.
///
/// Implementors keep their derived amount up to date inside
/// [`LineItem::set_field`]; [`LineItem::amount`] only reads it.
pub trait LineItem: Default + Clone + fmt::Debug + Send + Sync {
    type Field: Copy + fmt::Debug + PartialEq + Send + Sync + 'static;

    const CATEGORY: IncomeCategory;

    /// Every amount-bearing field, in form order.
    const FIELDS: &'static [Self::Field];

    fn field_name(field: Self::Field) -> &'static str;

    fn parse_field(name: &str) -> Option<Self::Field> {
        let name = name.trim().to_ascii_lowercase().replace('-', "_");
        Self::FIELDS
            .iter()
            .copied()
            .find(|field| Self::field_name(*field) == name)
    }

    fn field(
        &self,
        field: Self::Field,
    ) -> Decimal;

    /// Stores `value` and recomputes the derived amount.
    fn set_field(
        &mut self,
        field: Self::Field,
        value: Decimal,
    );

    /// Derived amount of this row. May be negative (a loss).
    fn amount(&self) -> Decimal;

    /// Total persisted for the schedule. Losses offset gains inside the
    /// schedule but the total never drops below zero.
    fn category_total(items: &[Self]) -> Decimal {
        non_negative(items.iter().map(Self::amount).sum())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormLine<L> {
    pub label: String,
    pub item: L,
}

/// Line items of one income schedule plus its aggregated total.
///
/// Totals only reach the store through [`CategoryForm::save`].
#[derive(Debug, Clone)]
pub struct CategoryForm<L: LineItem> {
    lines: Vec<FormLine<L>>,
}

impl<L: LineItem> Default for CategoryForm<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: LineItem> CategoryForm<L> {
    /// A fresh form with a single blank row.
    pub fn new() -> Self {
        Self {
            lines: vec![FormLine::default()],
        }
    }

    pub fn category(&self) -> IncomeCategory {
        L::CATEGORY
    }

    pub fn lines(&self) -> &[FormLine<L>] {
        &self.lines
    }

    /// Appends a blank row and returns its index.
    pub fn add_line_item(&mut self) -> usize {
        self.lines.push(FormLine::default());
        self.lines.len() - 1
    }

    /// Returns `false` when there is no such row.
    pub fn remove_line_item(
        &mut self,
        index: usize,
    ) -> bool {
        if index < self.lines.len() {
            self.lines.remove(index);
            true
        } else {
            false
        }
    }

    /// Row `index`, appending a blank row when `index` is one past the end.
    fn line_mut(
        &mut self,
        index: usize,
    ) -> Result<&mut FormLine<L>, FormError> {
        if index == self.lines.len() {
            self.lines.push(FormLine::default());
        }
        let len = self.lines.len();
        self.lines.get_mut(index).ok_or(FormError::NoSuchLine {
            schedule: Schedule::Income(L::CATEGORY),
            index,
            len,
        })
    }

    pub fn set_label(
        &mut self,
        index: usize,
        label: impl Into<String>,
    ) -> Result<(), FormError> {
        self.line_mut(index)?.label = label.into();
        Ok(())
    }

    /// Sets one field of row `index` from raw text and returns the row's new
    /// derived amount. Malformed or negative input is stored as zero.
    ///
    /// `index` may name an existing row or the next one, which is appended.
    /// Anything further out is [`FormError::NoSuchLine`] and leaves the form
    /// unchanged.
    pub fn set_line_item(
        &mut self,
        index: usize,
        field: L::Field,
        raw: &str,
    ) -> Result<Decimal, FormError> {
        self.set_line_amount(index, field, coerce_amount(raw))
    }

    pub fn set_line_amount(
        &mut self,
        index: usize,
        field: L::Field,
        value: Decimal,
    ) -> Result<Decimal, FormError> {
        let line = self.line_mut(index)?;
        line.item.set_field(field, clamp_amount(value));
        Ok(line.item.amount())
    }

    pub fn total(&self) -> Decimal {
        let items: Vec<L> = self.lines.iter().map(|line| line.item.clone()).collect();
        L::category_total(&items)
    }

    /// Writes the schedule total under its storage key, replacing whatever
    /// was stored before.
    pub async fn save(
        &self,
        store: &dyn KeyValueStore,
    ) -> Result<IncomeCategoryTotal, StoreError> {
        let total = self.total();
        store
            .set(L::CATEGORY.storage_key(), &total.normalize().to_string())
            .await?;

        tracing::info!(category = L::CATEGORY.as_str(), %total, "category total saved");

        Ok(IncomeCategoryTotal {
            category: L::CATEGORY,
            total,
        })
    }

    /// Back to a single blank row. The stored total is left alone.
    pub fn clear(&mut self) {
        self.lines = vec![FormLine::default()];
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::db::keys;
    use crate::db::memory::MemoryStore;
    use crate::forms::capital_gains::{CapitalGainsField, CapitalGainsItem};
    use crate::forms::salary::{SalaryField, SalaryItem};

    // ===== line management tests =====

    #[test]
    fn new_form_has_one_blank_line() {
        let form = CategoryForm::<SalaryItem>::new();

        assert_eq!(form.lines().len(), 1);
        assert_eq!(form.total(), dec!(0));
        assert_eq!(form.category(), IncomeCategory::Salary);
    }

    #[test]
    fn add_and_remove_lines() {
        let mut form = CategoryForm::<SalaryItem>::new();

        assert_eq!(form.add_line_item(), 1);
        assert!(form.remove_line_item(0));
        assert!(!form.remove_line_item(5));
        assert_eq!(form.lines().len(), 1);
    }

    #[test]
    fn label_on_next_line_appends_it() {
        let mut form = CategoryForm::<SalaryItem>::new();

        form.set_label(1, "Second employer").unwrap();

        assert_eq!(form.lines().len(), 2);
        assert_eq!(form.lines()[1].label, "Second employer");
    }

    #[test]
    fn lines_beyond_the_next_are_rejected() {
        let mut form = CategoryForm::<SalaryItem>::new();

        assert_eq!(
            form.set_line_item(2, SalaryField::GrossSalary, "1"),
            Err(FormError::NoSuchLine {
                schedule: Schedule::Income(IncomeCategory::Salary),
                index: 2,
                len: 1,
            })
        );
        assert!(form.set_line_item(usize::MAX - 1, SalaryField::GrossSalary, "1").is_err());
        assert!(form.set_line_item(usize::MAX, SalaryField::GrossSalary, "1").is_err());
        assert!(form.set_label(100_000_000, "far away").is_err());
        assert_eq!(form.lines().len(), 1);
        assert_eq!(form.total(), dec!(0));
    }

    #[test]
    fn oversized_line_amounts_cannot_overflow_the_total() {
        let mut form = CategoryForm::<SalaryItem>::new();
        form.set_line_amount(0, SalaryField::GrossSalary, Decimal::MAX).unwrap();
        form.set_line_amount(1, SalaryField::GrossSalary, Decimal::MAX).unwrap();
        form.set_line_item(2, SalaryField::GrossSalary, "1,000").unwrap();

        assert_eq!(form.total(), dec!(1000));
    }

    // ===== totals tests =====

    #[test]
    fn set_line_item_returns_line_amount() {
        let mut form = CategoryForm::<SalaryItem>::new();

        form.set_line_item(0, SalaryField::GrossSalary, "1200000").unwrap();
        let amount = form.set_line_item(0, SalaryField::ProfessionalTax, "2500").unwrap();

        assert_eq!(amount, dec!(1197500));
    }

    #[test]
    fn losses_offset_gains_but_total_floors_at_zero() {
        let mut form = CategoryForm::<CapitalGainsItem>::new();
        form.set_line_item(0, CapitalGainsField::SalePrice, "100000").unwrap();
        form.set_line_item(0, CapitalGainsField::PurchasePrice, "60000").unwrap();
        form.set_line_item(1, CapitalGainsField::SalePrice, "10000").unwrap();
        form.set_line_item(1, CapitalGainsField::PurchasePrice, "25000").unwrap();

        assert_eq!(form.total(), dec!(25000));

        form.set_line_item(1, CapitalGainsField::PurchasePrice, "90000").unwrap();

        assert_eq!(form.total(), dec!(0));
    }

    #[test]
    fn negative_input_is_stored_as_zero() {
        let mut form = CategoryForm::<SalaryItem>::new();

        form.set_line_amount(0, SalaryField::GrossSalary, dec!(-100)).unwrap();

        assert_eq!(form.lines()[0].item.field(SalaryField::GrossSalary), dec!(0));
    }

    // ===== save tests =====

    #[tokio::test]
    async fn save_overwrites_previous_total() {
        let store = MemoryStore::new();
        let mut form = CategoryForm::<SalaryItem>::new();

        form.set_line_item(0, SalaryField::GrossSalary, "500000").unwrap();
        form.save(&store).await.unwrap();
        form.set_line_item(0, SalaryField::GrossSalary, "650000.50").unwrap();
        let saved = form.save(&store).await.unwrap();

        assert_eq!(saved.total, dec!(650000.50));
        assert_eq!(
            store.get(keys::SALARY_TOTAL).await.unwrap(),
            Some("650000.5".to_string())
        );
    }

    #[tokio::test]
    async fn clear_keeps_stored_total() {
        let store = MemoryStore::new();
        let mut form = CategoryForm::<SalaryItem>::new();
        form.set_line_item(0, SalaryField::GrossSalary, "500000").unwrap();
        form.save(&store).await.unwrap();

        form.clear();

        assert_eq!(form.total(), dec!(0));
        assert_eq!(
            store.get(keys::SALARY_TOTAL).await.unwrap(),
            Some("500000".to_string())
        );
    }
}
