//! Category input forms.
//!
//! Each income schedule keeps editable line items and a derived total; the
//! total reaches the shared store only when the schedule is saved. The
//! deductions form is the exception and saves on every change.

pub mod business;
pub mod capital_gains;
pub mod category_form;
pub mod deductions;
pub mod house_property;
pub mod other_sources;
pub mod salary;

use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use business::{BusinessField, BusinessItem};
pub use capital_gains::{CapitalGainsField, CapitalGainsItem};
pub use category_form::{CategoryForm, FormLine, LineItem};
pub use deductions::{DeductionsForm, OverCap};
pub use house_property::{HousePropertyField, HousePropertyItem};
pub use other_sources::{OtherSourcesField, OtherSourcesItem};
pub use salary::{SalaryField, SalaryItem};

use crate::db::store::{KeyValueStore, StoreError};
use crate::{DeductionSection, IncomeCategory};

/// One input page: an income head or the deductions page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Schedule {
    Income(IncomeCategory),
    Deductions,
}

impl Schedule {
    pub const ALL: [Schedule; 6] = [
        Self::Income(IncomeCategory::Salary),
        Self::Income(IncomeCategory::HouseProperty),
        Self::Income(IncomeCategory::BusinessProfession),
        Self::Income(IncomeCategory::CapitalGains),
        Self::Income(IncomeCategory::OtherSources),
        Self::Deductions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income(category) => category.as_str(),
            Self::Deductions => "deductions",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deductions" | "deduction" | "via" => Some(Self::Deductions),
            other => IncomeCategory::parse(other).map(Self::Income),
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown schedule '{0}'")]
    UnknownSchedule(String),

    #[error("unknown field '{field}' for {schedule}; expected one of: {expected}")]
    UnknownField {
        schedule: Schedule,
        field: String,
        expected: String,
    },

    #[error("unknown deduction section '{0}'")]
    UnknownSection(String),

    #[error("{0} has no line items")]
    NoLineItems(Schedule),

    /// `index` is 0-based; the message counts lines from 1.
    #[error("{schedule} has no line {}; the next new line is {}", .index.saturating_add(1), .len + 1)]
    NoSuchLine {
        schedule: Schedule,
        index: usize,
        len: usize,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

fn unknown_field<L: LineItem>(
    schedule: Schedule,
    field: &str,
) -> FormError {
    FormError::UnknownField {
        schedule,
        field: field.to_string(),
        expected: field_names::<L>().join(", "),
    }
}

fn field_names<L: LineItem>() -> Vec<&'static str> {
    L::FIELDS.iter().map(|f| L::field_name(*f)).collect()
}

fn set_named<L: LineItem>(
    form: &mut CategoryForm<L>,
    index: usize,
    field: &str,
    raw: &str,
) -> Result<Decimal, FormError> {
    let parsed =
        L::parse_field(field).ok_or_else(|| unknown_field::<L>(Schedule::Income(L::CATEGORY), field))?;
    form.set_line_item(index, parsed, raw)
}

/// Every input page of one session, bound to the shared store.
pub struct IncomeForms {
    store: Arc<dyn KeyValueStore>,
    pub salary: CategoryForm<SalaryItem>,
    pub house_property: CategoryForm<HousePropertyItem>,
    pub business: CategoryForm<BusinessItem>,
    pub capital_gains: CategoryForm<CapitalGainsItem>,
    pub other_sources: CategoryForm<OtherSourcesItem>,
    pub deductions: DeductionsForm,
}

impl IncomeForms {
    /// Blank income schedules; the deductions page is repopulated from the
    /// store.
    pub async fn open(store: Arc<dyn KeyValueStore>) -> Result<Self, StoreError> {
        let deductions = DeductionsForm::load(store.as_ref()).await?;
        Ok(Self {
            store,
            salary: CategoryForm::new(),
            house_property: CategoryForm::new(),
            business: CategoryForm::new(),
            capital_gains: CategoryForm::new(),
            other_sources: CategoryForm::new(),
            deductions,
        })
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Field names accepted by [`IncomeForms::set_line_item`] for `schedule`.
    pub fn field_names(schedule: Schedule) -> Vec<&'static str> {
        match schedule {
            Schedule::Income(IncomeCategory::Salary) => field_names::<SalaryItem>(),
            Schedule::Income(IncomeCategory::HouseProperty) => field_names::<HousePropertyItem>(),
            Schedule::Income(IncomeCategory::BusinessProfession) => field_names::<BusinessItem>(),
            Schedule::Income(IncomeCategory::CapitalGains) => field_names::<CapitalGainsItem>(),
            Schedule::Income(IncomeCategory::OtherSources) => field_names::<OtherSourcesItem>(),
            Schedule::Deductions => DeductionSection::ALL.iter().map(|s| s.code()).collect(),
        }
    }

    /// Updates one field of one line and returns the line's derived amount.
    ///
    /// For the deductions page `field` is a section code, `index` is ignored,
    /// the returned figure is the new deduction total, and the change is
    /// saved immediately.
    pub async fn set_line_item(
        &mut self,
        schedule: Schedule,
        index: usize,
        field: &str,
        raw: &str,
    ) -> Result<Decimal, FormError> {
        match schedule {
            Schedule::Income(IncomeCategory::Salary) => set_named(&mut self.salary, index, field, raw),
            Schedule::Income(IncomeCategory::HouseProperty) => {
                set_named(&mut self.house_property, index, field, raw)
            }
            Schedule::Income(IncomeCategory::BusinessProfession) => {
                set_named(&mut self.business, index, field, raw)
            }
            Schedule::Income(IncomeCategory::CapitalGains) => {
                set_named(&mut self.capital_gains, index, field, raw)
            }
            Schedule::Income(IncomeCategory::OtherSources) => {
                set_named(&mut self.other_sources, index, field, raw)
            }
            Schedule::Deductions => {
                let section = DeductionSection::parse(field)
                    .ok_or_else(|| FormError::UnknownSection(field.to_string()))?;
                Ok(self
                    .deductions
                    .set_amount(section, raw, self.store.as_ref())
                    .await?)
            }
        }
    }

    pub fn set_label(
        &mut self,
        schedule: Schedule,
        index: usize,
        label: &str,
    ) -> Result<(), FormError> {
        match schedule {
            Schedule::Income(IncomeCategory::Salary) => self.salary.set_label(index, label),
            Schedule::Income(IncomeCategory::HouseProperty) => self.house_property.set_label(index, label),
            Schedule::Income(IncomeCategory::BusinessProfession) => self.business.set_label(index, label),
            Schedule::Income(IncomeCategory::CapitalGains) => self.capital_gains.set_label(index, label),
            Schedule::Income(IncomeCategory::OtherSources) => self.other_sources.set_label(index, label),
            Schedule::Deductions => Err(FormError::NoLineItems(schedule)),
        }
    }

    pub fn add_line_item(
        &mut self,
        schedule: Schedule,
    ) -> Result<usize, FormError> {
        Ok(match schedule {
            Schedule::Income(IncomeCategory::Salary) => self.salary.add_line_item(),
            Schedule::Income(IncomeCategory::HouseProperty) => self.house_property.add_line_item(),
            Schedule::Income(IncomeCategory::BusinessProfession) => self.business.add_line_item(),
            Schedule::Income(IncomeCategory::CapitalGains) => self.capital_gains.add_line_item(),
            Schedule::Income(IncomeCategory::OtherSources) => self.other_sources.add_line_item(),
            Schedule::Deductions => return Err(FormError::NoLineItems(schedule)),
        })
    }

    /// Returns `Ok(false)` when the line does not exist.
    pub fn remove_line_item(
        &mut self,
        schedule: Schedule,
        index: usize,
    ) -> Result<bool, FormError> {
        Ok(match schedule {
            Schedule::Income(IncomeCategory::Salary) => self.salary.remove_line_item(index),
            Schedule::Income(IncomeCategory::HouseProperty) => self.house_property.remove_line_item(index),
            Schedule::Income(IncomeCategory::BusinessProfession) => self.business.remove_line_item(index),
            Schedule::Income(IncomeCategory::CapitalGains) => self.capital_gains.remove_line_item(index),
            Schedule::Income(IncomeCategory::OtherSources) => self.other_sources.remove_line_item(index),
            Schedule::Deductions => return Err(FormError::NoLineItems(schedule)),
        })
    }

    /// Unsaved total currently shown on the page.
    pub fn total(
        &self,
        schedule: Schedule,
    ) -> Decimal {
        match schedule {
            Schedule::Income(IncomeCategory::Salary) => self.salary.total(),
            Schedule::Income(IncomeCategory::HouseProperty) => self.house_property.total(),
            Schedule::Income(IncomeCategory::BusinessProfession) => self.business.total(),
            Schedule::Income(IncomeCategory::CapitalGains) => self.capital_gains.total(),
            Schedule::Income(IncomeCategory::OtherSources) => self.other_sources.total(),
            Schedule::Deductions => self.deductions.total(),
        }
    }

    /// Persists the schedule's total and returns it.
    pub async fn save(
        &self,
        schedule: Schedule,
    ) -> Result<Decimal, FormError> {
        let store = self.store.as_ref();
        let total = match schedule {
            Schedule::Income(IncomeCategory::Salary) => self.salary.save(store).await?.total,
            Schedule::Income(IncomeCategory::HouseProperty) => self.house_property.save(store).await?.total,
            Schedule::Income(IncomeCategory::BusinessProfession) => self.business.save(store).await?.total,
            Schedule::Income(IncomeCategory::CapitalGains) => self.capital_gains.save(store).await?.total,
            Schedule::Income(IncomeCategory::OtherSources) => self.other_sources.save(store).await?.total,
            Schedule::Deductions => self.deductions.save(store).await?,
        };
        Ok(total)
    }
}
