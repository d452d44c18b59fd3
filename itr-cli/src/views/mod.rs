//! Plain-text renderings of the pages.
//!
//! - `comparison` - both regimes side by side with the recommendation
//! - `total_income` - per-head breakdown plus one regime's tax
//! - `schedule` - line items of one income schedule
//! - `deductions` - Chapter VI-A sections with limits

mod comparison;
mod deductions;
mod schedule;
mod total_income;

pub use comparison::ComparisonView;
pub use deductions::DeductionsView;
pub use schedule::{ScheduleView, render_schedule};
pub use total_income::TotalIncomeView;
