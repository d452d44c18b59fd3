//! State behind the read-only summary views.
//!
//! The comparison and total-income views keep the figures from their last
//! focus only. Every focus re-reads all seven keys from the store, so totals
//! saved from other pages in the meantime are picked up.

use itr_core::calculations::RegimeComparison;
use itr_core::{AggregationReader, IncomeSnapshot, KeyValueStore, StoreError, TaxRegime};

#[derive(Debug, Clone)]
pub struct Summary {
    pub snapshot: IncomeSnapshot,
    pub comparison: RegimeComparison,
}

#[derive(Debug, Clone, Default)]
pub struct SummaryState {
    /// Regime shown by the total-income view when none is requested.
    pub default_regime: TaxRegime,
    current: Option<Summary>,
    focus_count: u64,
}

impl SummaryState {
    pub fn new(default_regime: TaxRegime) -> Self {
        Self {
            default_regime,
            ..Default::default()
        }
    }

    /// Re-reads the store and recomputes both regimes.
    pub async fn focus(
        &mut self,
        store: &dyn KeyValueStore,
    ) -> Result<&Summary, StoreError> {
        let snapshot = AggregationReader::new(store).read_snapshot().await?;
        let comparison =
            RegimeComparison::compare(snapshot.gross_total_income, snapshot.deductions_total);
        self.focus_count += 1;

        tracing::debug!(
            focus = self.focus_count,
            recommended = comparison.recommended.as_str(),
            "summary refreshed"
        );

        Ok(&*self.current.insert(Summary {
            snapshot,
            comparison,
        }))
    }

    /// Figures from the last focus, if any. Possibly stale.
    pub fn current(&self) -> Option<&Summary> {
        self.current.as_ref()
    }
}
