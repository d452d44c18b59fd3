//! Store wiring shared by every command.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use itr_core::db::{MemoryStoreFactory, StoreConfig, StoreRegistry};
use itr_core::forms::DeductionsForm;
use itr_core::{DeductionSection, KeyValueStore, TaxRegime};
use itr_db_sqlite::SqliteStoreFactory;

use crate::state::SummaryState;
use crate::utils::format_inr;
use crate::views::{ComparisonView, TotalIncomeView};

/// Registry with every backend this binary ships: `sqlite` and `memory`.
pub fn build_registry() -> StoreRegistry {
    let mut registry = StoreRegistry::new();
    registry.register(Box::new(SqliteStoreFactory));
    registry.register(Box::new(MemoryStoreFactory));
    registry
}

pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn KeyValueStore>> {
    let store = build_registry()
        .create(config)
        .await
        .with_context(|| {
            format!(
                "Failed to open {} store at '{}'",
                config.backend, config.connection_string
            )
        })?;
    Ok(Arc::from(store))
}

/// Regime comparison as of now.
pub async fn comparison_report(store: &dyn KeyValueStore) -> Result<String> {
    let mut state = SummaryState::default();
    let summary = state.focus(store).await.context("Failed to read saved totals")?;
    Ok(ComparisonView::new(&summary.comparison).to_string())
}

/// Total-income computation under `regime`.
pub async fn total_income_report(
    store: &dyn KeyValueStore,
    regime: TaxRegime,
) -> Result<String> {
    let mut state = SummaryState::new(regime);
    let summary = state.focus(store).await.context("Failed to read saved totals")?;
    Ok(TotalIncomeView {
        snapshot: &summary.snapshot,
        result: summary.comparison.result_for(regime),
    }
    .to_string())
}

/// Sets one deduction section and saves it, as the deductions page does on
/// every edit.
pub async fn set_deduction(
    store: &dyn KeyValueStore,
    section: &str,
    amount: &str,
) -> Result<String> {
    let Some(section) = DeductionSection::parse(section) else {
        bail!("unknown deduction section '{}'", section);
    };

    let mut form = DeductionsForm::load(store)
        .await
        .context("Failed to read saved deductions")?;
    let total = form
        .set_amount(section, amount, store)
        .await
        .context("Failed to save deductions")?;

    let mut report = format!(
        "{} set to {}. Deductions total: {}",
        section.code(),
        format_inr(form.amount(section)),
        format_inr(total)
    );
    for over in form.over_cap_sections() {
        report.push_str(&format!(
            "\nnote: {} entry {} exceeds the {} limit",
            over.section.code(),
            format_inr(over.entered),
            format_inr(over.cap)
        ));
    }
    Ok(report)
}

/// Every stored key and its raw value.
pub async fn dump_store(store: &dyn KeyValueStore) -> Result<String> {
    let keys = store.keys().await.context("Failed to list stored keys")?;
    if keys.is_empty() {
        return Ok("(store is empty)".to_string());
    }

    let mut lines = Vec::with_capacity(keys.len());
    for key in keys {
        let value = store
            .get(&key)
            .await
            .with_context(|| format!("Failed to read '{}'", key))?
            .unwrap_or_default();
        lines.push(format!("{:<18}{}", key, value));
    }
    Ok(lines.join("\n"))
}
