//! Read side of the store: gross total income and the deduction figures.
//!
//! Nothing here is cached. Views call the reader again on every focus so a
//! total saved from another page shows up immediately.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::db::keys;
use crate::db::store::{KeyValueStore, StoreError};
use crate::forms::deductions::decode_deductions_data;
use crate::input::parse_amount;
use crate::{DeductionSection, IncomeCategory, IncomeCategoryTotal};

/// Everything the summary views need, read in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomeSnapshot {
    /// One entry per income head, in [`IncomeCategory::ALL`] order.
    pub categories: Vec<IncomeCategoryTotal>,
    pub gross_total_income: Decimal,
    pub deductions_total: Decimal,
    pub deductions: BTreeMap<DeductionSection, Decimal>,
}

impl IncomeSnapshot {
    pub fn category_total(
        &self,
        category: IncomeCategory,
    ) -> Decimal {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.total)
            .unwrap_or(Decimal::ZERO)
    }
}

pub struct AggregationReader<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> AggregationReader<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Reads a stored total. Absent keys are zero; unparseable or negative
    /// values are zero with a warning.
    async fn read_total(
        &self,
        key: &str,
    ) -> Result<Decimal, StoreError> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(Decimal::ZERO);
        };
        match parse_amount(&raw) {
            Some(value) if !value.is_sign_negative() => Ok(value),
            Some(value) => {
                tracing::warn!(key, %value, "negative stored total read as zero");
                Ok(Decimal::ZERO)
            }
            None => {
                tracing::warn!(key, raw = %raw, "unparseable stored total read as zero");
                Ok(Decimal::ZERO)
            }
        }
    }

    pub async fn read_category_totals(&self) -> Result<Vec<IncomeCategoryTotal>, StoreError> {
        let mut totals = Vec::with_capacity(IncomeCategory::ALL.len());
        for category in IncomeCategory::ALL {
            totals.push(IncomeCategoryTotal {
                category,
                total: self.read_total(category.storage_key()).await?,
            });
        }
        Ok(totals)
    }

    /// Sum of the five persisted income totals.
    pub async fn read_gti(&self) -> Result<Decimal, StoreError> {
        let gti: Decimal = self
            .read_category_totals()
            .await?
            .iter()
            .map(|c| c.total)
            .sum();
        tracing::debug!(%gti, "gross total income read");
        Ok(gti)
    }

    pub async fn read_deductions_total(&self) -> Result<Decimal, StoreError> {
        self.read_total(keys::DEDUCTIONS_TOTAL).await
    }

    pub async fn read_snapshot(&self) -> Result<IncomeSnapshot, StoreError> {
        let categories = self.read_category_totals().await?;
        let gross_total_income: Decimal = categories.iter().map(|c| c.total).sum();
        let deductions_total = self.read_deductions_total().await?;
        let deductions = match self.store.get(keys::DEDUCTIONS_DATA).await? {
            Some(raw) => decode_deductions_data(&raw),
            None => BTreeMap::new(),
        };

        tracing::info!(%gross_total_income, %deductions_total, "store snapshot read");

        Ok(IncomeSnapshot {
            categories,
            gross_total_income,
            deductions_total,
            deductions,
        })
    }
}
