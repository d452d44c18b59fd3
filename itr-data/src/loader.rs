use std::collections::BTreeSet;
use std::io::Read;

use itr_core::StoreError;
use itr_core::forms::{FormError, IncomeForms, Schedule};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading line items.
#[derive(Debug, Error)]
pub enum LineItemLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Row {row}: unknown schedule '{schedule}'")]
    UnknownSchedule { row: usize, schedule: String },

    #[error("Row {row}: line numbers start at 1")]
    InvalidLine { row: usize },

    #[error("Row {row}: {source}")]
    Form { row: usize, source: FormError },

    #[error("Failed to save {schedule}: {source}")]
    Save { schedule: Schedule, source: FormError },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<csv::Error> for LineItemLoaderError {
    fn from(err: csv::Error) -> Self {
        LineItemLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a line-items CSV file.
///
/// - `schedule`: `salary`, `house-property`, `business-profession`,
///   `capital-gains`, `other-sources` or `deductions`
/// - `line`: 1-based line number within the schedule (empty for deductions)
/// - `label`: optional description of the line
/// - `field`: field name, or the section code for deductions
/// - `amount`: free-form amount; grouping commas and rupee marks are allowed
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LineItemRecord {
    pub schedule: String,
    pub line: Option<usize>,
    #[serde(default)]
    pub label: String,
    pub field: String,
    #[serde(default)]
    pub amount: String,
}

/// What a load changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub records: usize,
    /// Persisted total of every touched schedule, in schedule order.
    pub saved: Vec<(Schedule, Decimal)>,
}

/// Loader that fills [`IncomeForms`] from CSV and saves what it touched.
pub struct LineItemLoader;

impl LineItemLoader {
    /// Parse line-item records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<LineItemRecord>, LineItemLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: LineItemRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Apply `records` to `forms`, then save every income schedule that was
    /// touched. Deductions are saved as each record is applied.
    ///
    /// Rows are applied in file order, so a later row for the same field
    /// overwrites an earlier one.
    pub async fn load(
        forms: &mut IncomeForms,
        records: &[LineItemRecord],
    ) -> Result<LoadSummary, LineItemLoaderError> {
        let mut touched = BTreeSet::new();

        for (i, record) in records.iter().enumerate() {
            // header is row 1
            let row = i + 2;
            let schedule =
                Schedule::parse(&record.schedule).ok_or_else(|| LineItemLoaderError::UnknownSchedule {
                    row,
                    schedule: record.schedule.clone(),
                })?;

            let index = match (schedule, record.line) {
                (Schedule::Deductions, _) => 0,
                (_, Some(line)) if line >= 1 => line - 1,
                _ => return Err(LineItemLoaderError::InvalidLine { row }),
            };

            if !record.label.is_empty() && schedule != Schedule::Deductions {
                forms
                    .set_label(schedule, index, &record.label)
                    .map_err(|source| LineItemLoaderError::Form { row, source })?;
            }

            forms
                .set_line_item(schedule, index, &record.field, &record.amount)
                .await
                .map_err(|source| LineItemLoaderError::Form { row, source })?;

            touched.insert(schedule);
        }

        let mut saved = Vec::with_capacity(touched.len());
        for schedule in touched {
            let total = match schedule {
                Schedule::Deductions => forms.total(schedule),
                _ => forms
                    .save(schedule)
                    .await
                    .map_err(|source| LineItemLoaderError::Save { schedule, source })?,
            };
            saved.push((schedule, total));
        }

        tracing::info!(records = records.len(), schedules = saved.len(), "line items loaded");

        Ok(LoadSummary {
            records: records.len(),
            saved,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_trims_and_allows_empty_line() {
        let csv = "schedule,line,label,field,amount\n salary , 1 , Acme , gross_salary , 500000\ndeductions,,,80C,1000\n";

        let records = LineItemLoader::parse(csv.as_bytes()).unwrap();

        assert_eq!(
            records,
            vec![
                LineItemRecord {
                    schedule: "salary".to_string(),
                    line: Some(1),
                    label: "Acme".to_string(),
                    field: "gross_salary".to_string(),
                    amount: "500000".to_string(),
                },
                LineItemRecord {
                    schedule: "deductions".to_string(),
                    line: None,
                    label: String::new(),
                    field: "80C".to_string(),
                    amount: "1000".to_string(),
                },
            ]
        );
    }

    #[test]
    fn parse_rejects_non_numeric_line() {
        let csv = "schedule,line,label,field,amount\nsalary,one,,gross_salary,1\n";

        let result = LineItemLoader::parse(csv.as_bytes());

        assert!(matches!(result, Err(LineItemLoaderError::CsvParse(_))));
    }
}
