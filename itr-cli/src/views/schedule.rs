use std::fmt;

use itr_core::IncomeCategory;
use itr_core::forms::{CategoryForm, IncomeForms, LineItem, Schedule};

use super::DeductionsView;
use crate::utils::format_inr;

/// Line items of one income schedule with their derived amounts.
pub struct ScheduleView<'a, L: LineItem> {
    pub form: &'a CategoryForm<L>,
}

impl<L: LineItem> fmt::Display for ScheduleView<'_, L> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{}", self.form.category().label())?;
        for (i, line) in self.form.lines().iter().enumerate() {
            let label = if line.label.is_empty() {
                "(unlabelled)"
            } else {
                line.label.as_str()
            };
            writeln!(f, "  {:>2}. {:<38}{:>16}", i + 1, label, format_inr(line.item.amount()))?;
            for field in L::FIELDS {
                let value = line.item.field(*field);
                if !value.is_zero() {
                    writeln!(f, "        {:<34}{:>16}", L::field_name(*field), format_inr(value))?;
                }
            }
        }
        write!(
            f,
            "  {:<42}{:>16}  (unsaved until `save {}`)",
            "Total",
            format_inr(self.form.total()),
            L::CATEGORY.as_str()
        )
    }
}

pub fn render_schedule(
    forms: &IncomeForms,
    schedule: Schedule,
) -> String {
    match schedule {
        Schedule::Income(IncomeCategory::Salary) => ScheduleView { form: &forms.salary }.to_string(),
        Schedule::Income(IncomeCategory::HouseProperty) => {
            ScheduleView {
                form: &forms.house_property,
            }
            .to_string()
        }
        Schedule::Income(IncomeCategory::BusinessProfession) => {
            ScheduleView {
                form: &forms.business,
            }
            .to_string()
        }
        Schedule::Income(IncomeCategory::CapitalGains) => {
            ScheduleView {
                form: &forms.capital_gains,
            }
            .to_string()
        }
        Schedule::Income(IncomeCategory::OtherSources) => {
            ScheduleView {
                form: &forms.other_sources,
            }
            .to_string()
        }
        Schedule::Deductions => DeductionsView::new(&forms.deductions).to_string(),
    }
}
