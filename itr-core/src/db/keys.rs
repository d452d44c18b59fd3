//! Well-known keys of the shared store.
//!
//! | Key                | Value                                        |
//! |--------------------|----------------------------------------------|
//! | `salary_total`     | Salary total                                 |
//! | `hp_total`         | House property total                         |
//! | `pgbp_total`       | Business/profession total                    |
//! | `cg_total`         | Capital gains total                          |
//! | `os_total`         | Other sources total                          |
//! | `deductions_total` | Sum of all deduction entries                 |
//! | `deductions_data`  | JSON object of section code to amount        |
//!
//! Every value except `deductions_data` is a plain decimal string.

pub const SALARY_TOTAL: &str = "salary_total";
pub const HOUSE_PROPERTY_TOTAL: &str = "hp_total";
pub const BUSINESS_PROFESSION_TOTAL: &str = "pgbp_total";
pub const CAPITAL_GAINS_TOTAL: &str = "cg_total";
pub const OTHER_SOURCES_TOTAL: &str = "os_total";
pub const DEDUCTIONS_TOTAL: &str = "deductions_total";
pub const DEDUCTIONS_DATA: &str = "deductions_data";

/// All seven keys, in display order.
pub const ALL: [&str; 7] = [
    SALARY_TOTAL,
    HOUSE_PROPERTY_TOTAL,
    BUSINESS_PROFESSION_TOTAL,
    CAPITAL_GAINS_TOTAL,
    OTHER_SOURCES_TOTAL,
    DEDUCTIONS_TOTAL,
    DEDUCTIONS_DATA,
];
