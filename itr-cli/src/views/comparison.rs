use std::fmt;

use itr_core::calculations::RegimeComparison;
use itr_core::{RegimeTaxResult, TaxRegime};
use rust_decimal::Decimal;

use crate::utils::{format_inr, format_rate};

/// Old and new regime in two columns, every intermediate figure shown.
pub struct ComparisonView<'a> {
    pub comparison: &'a RegimeComparison,
}

impl<'a> ComparisonView<'a> {
    pub fn new(comparison: &'a RegimeComparison) -> Self {
        Self { comparison }
    }
}

fn row(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    old: String,
    new: String,
) -> fmt::Result {
    writeln!(f, "{:<24}{:>18}{:>18}", label, old, new)
}

fn money_row(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    pick: fn(&RegimeTaxResult) -> Decimal,
    c: &RegimeComparison,
) -> fmt::Result {
    row(f, label, format_inr(pick(&c.old)), format_inr(pick(&c.new)))
}

impl fmt::Display for ComparisonView<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let c = self.comparison;

        row(
            f,
            "",
            TaxRegime::Old.label().to_string(),
            TaxRegime::New.label().to_string(),
        )?;
        writeln!(f, "{}", "─".repeat(60))?;
        money_row(f, "Gross total income", |r| r.gross_total_income, c)?;
        money_row(f, "Deduction applied", |r| r.deduction_applied, c)?;
        money_row(f, "Taxable income", |r| r.taxable_income, c)?;
        money_row(f, "Slab tax", |r| r.slab_tax, c)?;
        money_row(f, "Cess (4%)", |r| r.cess, c)?;
        row(
            f,
            "Surcharge rate",
            format_rate(c.old.surcharge_rate),
            format_rate(c.new.surcharge_rate),
        )?;
        money_row(f, "Surcharge", |r| r.surcharge, c)?;
        writeln!(f, "{}", "─".repeat(60))?;
        money_row(f, "Final tax", |r| r.final_tax, c)?;
        writeln!(f)?;

        let savings = c.savings();
        if savings.is_zero() {
            write!(
                f,
                "Both regimes cost the same. Recommended: {}",
                c.recommended
            )
        } else {
            write!(
                f,
                "Recommended: {} (saves {})",
                c.recommended,
                format_inr(savings)
            )
        }
    }
}
