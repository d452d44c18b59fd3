use std::fmt;

use itr_core::{IncomeSnapshot, RegimeTaxResult};

use crate::utils::{format_inr, format_rate};

/// Per-head income breakdown followed by one regime's computation.
pub struct TotalIncomeView<'a> {
    pub snapshot: &'a IncomeSnapshot,
    pub result: &'a RegimeTaxResult,
}

impl fmt::Display for TotalIncomeView<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Computation of Total Income ({})", self.result.regime)?;
        writeln!(f, "{}", "─".repeat(62))?;
        for entry in &self.snapshot.categories {
            writeln!(
                f,
                "{:<46}{:>16}",
                entry.category.label(),
                format_inr(entry.total)
            )?;
        }
        writeln!(f, "{}", "─".repeat(62))?;
        writeln!(
            f,
            "{:<46}{:>16}",
            "Gross Total Income",
            format_inr(self.snapshot.gross_total_income)
        )?;
        writeln!(
            f,
            "{:<46}{:>16}",
            format!(
                "Less: Chapter VI-A (claimed {})",
                format_inr(self.snapshot.deductions_total)
            ),
            format_inr(self.result.deduction_applied)
        )?;
        writeln!(
            f,
            "{:<46}{:>16}",
            "Total Taxable Income",
            format_inr(self.result.taxable_income)
        )?;
        writeln!(f)?;
        writeln!(f, "{:<46}{:>16}", "Tax on slabs", format_inr(self.result.slab_tax))?;
        writeln!(
            f,
            "{:<46}{:>16}",
            format!("Surcharge @ {}", format_rate(self.result.surcharge_rate)),
            format_inr(self.result.surcharge)
        )?;
        writeln!(
            f,
            "{:<46}{:>16}",
            "Health & Education Cess @ 4%",
            format_inr(self.result.cess)
        )?;
        write!(
            f,
            "{:<46}{:>16}",
            "Total Tax Payable",
            format_inr(self.result.final_tax)
        )
    }
}
