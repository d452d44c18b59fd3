//! Chapter VI-A deductions form.
//!
//! Unlike the income schedules, this form writes through to the store on
//! every change: both `deductions_total` and `deductions_data` are rewritten
//! each time an amount is set.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::DeductionSection;
use crate::db::keys;
use crate::db::store::{KeyValueStore, StoreError};
use crate::input::{clamp_amount, coerce_amount};

/// A section whose entered amount is above its statutory limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverCap {
    pub section: DeductionSection,
    pub entered: Decimal,
    pub cap: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeductionsForm {
    amounts: BTreeMap<DeductionSection, Decimal>,
}

impl DeductionsForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repopulates the form from `deductions_data`. Missing or corrupt data
    /// yields an empty form.
    pub async fn load(store: &dyn KeyValueStore) -> Result<Self, StoreError> {
        let amounts = match store.get(keys::DEDUCTIONS_DATA).await? {
            Some(raw) => decode_deductions_data(&raw),
            None => BTreeMap::new(),
        };
        Ok(Self { amounts })
    }

    pub fn amount(
        &self,
        section: DeductionSection,
    ) -> Decimal {
        self.amounts.get(&section).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn amounts(&self) -> &BTreeMap<DeductionSection, Decimal> {
        &self.amounts
    }

    /// Sum of every entry. Statutory limits are not applied.
    pub fn total(&self) -> Decimal {
        self.amounts.values().copied().sum()
    }

    /// Sections whose entry exceeds the statutory limit. Informational only;
    /// [`DeductionsForm::total`] still counts the full amounts.
    pub fn over_cap_sections(&self) -> Vec<OverCap> {
        self.amounts
            .iter()
            .filter_map(|(section, entered)| {
                section
                    .cap()
                    .filter(|cap| entered > cap)
                    .map(|cap| OverCap {
                        section: *section,
                        entered: *entered,
                        cap,
                    })
            })
            .collect()
    }

    /// Sets one section from raw text and saves immediately. Returns the new
    /// deduction total.
    pub async fn set_amount(
        &mut self,
        section: DeductionSection,
        raw: &str,
        store: &dyn KeyValueStore,
    ) -> Result<Decimal, StoreError> {
        self.set_section_amount(section, coerce_amount(raw), store).await
    }

    pub async fn set_section_amount(
        &mut self,
        section: DeductionSection,
        value: Decimal,
        store: &dyn KeyValueStore,
    ) -> Result<Decimal, StoreError> {
        let value = clamp_amount(value);
        if value.is_zero() {
            self.amounts.remove(&section);
        } else {
            self.amounts.insert(section, value);
        }
        self.save(store).await
    }

    /// Writes `deductions_total` and `deductions_data`.
    pub async fn save(
        &self,
        store: &dyn KeyValueStore,
    ) -> Result<Decimal, StoreError> {
        let total = self.total();
        let data = encode_deductions_data(&self.amounts)?;

        store
            .set(keys::DEDUCTIONS_TOTAL, &total.normalize().to_string())
            .await?;
        store.set(keys::DEDUCTIONS_DATA, &data).await?;

        tracing::info!(%total, sections = self.amounts.len(), "deductions saved");
        Ok(total)
    }

    pub fn clear(&mut self) {
        self.amounts.clear();
    }
}

/// Section code to amount, amounts written as decimal strings.
pub fn encode_deductions_data(
    amounts: &BTreeMap<DeductionSection, Decimal>
) -> Result<String, StoreError> {
    let map: BTreeMap<&str, String> = amounts
        .iter()
        .map(|(section, amount)| (section.code(), amount.normalize().to_string()))
        .collect();

    serde_json::to_string(&map)
        .map_err(|e| StoreError::Database(format!("Failed to encode deductions: {}", e)))
}

/// Decodes `deductions_data`, accepting amounts as JSON numbers or strings.
///
/// Corrupt JSON yields an empty map, and unknown section codes are skipped,
/// both with a warning.
pub fn decode_deductions_data(raw: &str) -> BTreeMap<DeductionSection, Decimal> {
    let parsed: BTreeMap<String, serde_json::Value> = match serde_json::from_str(raw) {
        Ok(map) => map,
        Err(error) => {
            tracing::warn!(%error, "corrupt deductions_data ignored");
            return BTreeMap::new();
        }
    };

    let mut amounts = BTreeMap::new();
    for (code, value) in parsed {
        let Some(section) = DeductionSection::parse(&code) else {
            tracing::warn!(code = %code, "unknown deduction section skipped");
            continue;
        };
        let amount = match &value {
            serde_json::Value::Number(n) => coerce_amount(&n.to_string()),
            serde_json::Value::String(s) => coerce_amount(s),
            _ => Decimal::ZERO,
        };
        if !amount.is_zero() {
            amounts.insert(section, amount);
        }
    }
    amounts
}
