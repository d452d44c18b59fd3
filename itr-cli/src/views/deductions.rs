use std::fmt;

use itr_core::DeductionSection;
use itr_core::forms::DeductionsForm;

use crate::utils::format_inr;

/// Every Chapter VI-A section with its limit and entered amount. Entries over
/// the limit are marked but still counted in full.
pub struct DeductionsView<'a> {
    pub form: &'a DeductionsForm,
}

impl<'a> DeductionsView<'a> {
    pub fn new(form: &'a DeductionsForm) -> Self {
        Self { form }
    }
}

impl fmt::Display for DeductionsView<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Deductions under Chapter VI-A")?;
        let over: Vec<DeductionSection> = self
            .form
            .over_cap_sections()
            .into_iter()
            .map(|o| o.section)
            .collect();

        for section in DeductionSection::ALL {
            let cap = section
                .cap()
                .map(format_inr)
                .unwrap_or_else(|| "no limit".to_string());
            let entered = self.form.amount(section);
            let marker = if over.contains(&section) {
                "  over limit"
            } else {
                ""
            };
            writeln!(
                f,
                "  {:<10} {:<40} {:>12} {:>12}{}",
                section.code(),
                section.description(),
                cap,
                format_inr(entered),
                marker
            )?;
        }
        write!(
            f,
            "  {:<51} {:>25}",
            "Total (saved)",
            format_inr(self.form.total())
        )
    }
}

#[cfg(test)]
mod tests {
    use itr_core::db::MemoryStore;
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn marks_sections_over_limit() {
        let store = MemoryStore::new();
        let mut form = DeductionsForm::new();
        form.set_amount(DeductionSection::Section80C, "200000", &store)
            .await
            .unwrap();
        form.set_amount(DeductionSection::Section80TTA, "5000", &store)
            .await
            .unwrap();

        let text = DeductionsView::new(&form).to_string();
        let line_80c = text.lines().find(|l| l.trim_start().starts_with("80C ")).unwrap();
        let line_80tta = text.lines().find(|l| l.trim_start().starts_with("80TTA")).unwrap();

        assert!(line_80c.ends_with("over limit"));
        assert!(!line_80tta.ends_with("over limit"));
        assert_eq!(text.lines().count(), 14);
        assert!(text.lines().last().unwrap().ends_with("₹2,05,000"));
    }
}
