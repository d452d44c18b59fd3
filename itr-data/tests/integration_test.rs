//! Integration tests for line-item loading against the SQLite backend.

use std::sync::Arc;

use itr_core::calculations::RegimeComparison;
use itr_core::db::keys;
use itr_core::forms::{FormError, IncomeForms, Schedule};
use itr_core::{AggregationReader, IncomeCategory, KeyValueStore, TaxRegime};
use itr_data::{LineItemLoader, LineItemLoaderError};
use itr_db_sqlite::SqliteStore;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use sqlx::sqlite::SqlitePoolOptions;

const WORKED_EXAMPLE_CSV: &str = include_str!("../test-data/worked_example.csv");
const MALFORMED_CSV: &str = include_str!("../test-data/malformed.csv");

async fn setup_test_store() -> Arc<dyn KeyValueStore> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    let store = SqliteStore::new_with_pool(pool).await;
    store
        .run_migrations()
        .await
        .expect("Failed to run migrations");

    Arc::new(store)
}

#[tokio::test]
async fn test_load_worked_example() {
    let store = setup_test_store().await;
    let mut forms = IncomeForms::open(store.clone()).await.unwrap();
    let records = LineItemLoader::parse(WORKED_EXAMPLE_CSV.as_bytes()).unwrap();

    let summary = LineItemLoader::load(&mut forms, &records).await.unwrap();

    assert_eq!(summary.records, 7);
    assert_eq!(
        summary.saved,
        vec![
            (Schedule::Income(IncomeCategory::Salary), dec!(1200000)),
            (Schedule::Income(IncomeCategory::HouseProperty), dec!(100000)),
            (Schedule::Income(IncomeCategory::CapitalGains), dec!(150000)),
            (Schedule::Income(IncomeCategory::OtherSources), dec!(10000)),
            (Schedule::Deductions, dec!(150000)),
        ]
    );
    assert_eq!(forms.salary.lines()[0].label, "Acme Pvt Ltd");

    let snapshot = AggregationReader::new(store.as_ref())
        .read_snapshot()
        .await
        .unwrap();
    let comparison =
        RegimeComparison::compare(snapshot.gross_total_income, snapshot.deductions_total);

    assert_eq!(snapshot.gross_total_income, dec!(1460000));
    assert_eq!(comparison.old.final_tax, dec!(213720));
    assert_eq!(comparison.new.final_tax, dec!(121680));
    assert_eq!(comparison.recommended, TaxRegime::New);
}

#[tokio::test]
async fn test_untouched_schedules_keep_stored_totals() {
    let store = setup_test_store().await;
    store.set(keys::BUSINESS_PROFESSION_TOTAL, "300000").await.unwrap();
    let mut forms = IncomeForms::open(store.clone()).await.unwrap();
    let records = LineItemLoader::parse(WORKED_EXAMPLE_CSV.as_bytes()).unwrap();

    LineItemLoader::load(&mut forms, &records).await.unwrap();

    assert_eq!(
        AggregationReader::new(store.as_ref()).read_gti().await.unwrap(),
        dec!(1760000)
    );
}

#[tokio::test]
async fn test_reload_is_idempotent() {
    let store = setup_test_store().await;
    let records = LineItemLoader::parse(WORKED_EXAMPLE_CSV.as_bytes()).unwrap();

    for _ in 0..2 {
        let mut forms = IncomeForms::open(store.clone()).await.unwrap();
        LineItemLoader::load(&mut forms, &records).await.unwrap();
    }

    let snapshot = AggregationReader::new(store.as_ref())
        .read_snapshot()
        .await
        .unwrap();
    assert_eq!(snapshot.gross_total_income, dec!(1460000));
    assert_eq!(snapshot.deductions_total, dec!(150000));
}

#[tokio::test]
async fn test_malformed_csv_is_rejected() {
    let result = LineItemLoader::parse(MALFORMED_CSV.as_bytes());

    assert!(matches!(result, Err(LineItemLoaderError::CsvParse(_))));
}

#[tokio::test]
async fn test_unknown_field_reports_row_and_saves_nothing() {
    let store = setup_test_store().await;
    let mut forms = IncomeForms::open(store.clone()).await.unwrap();
    let csv = "schedule,line,label,field,amount\nsalary,1,,gross_salary,500000\nsalary,1,,bonus,1000\n";
    let records = LineItemLoader::parse(csv.as_bytes()).unwrap();

    let result = LineItemLoader::load(&mut forms, &records).await;

    match result {
        Err(LineItemLoaderError::Form {
            row,
            source: FormError::UnknownField { field, .. },
        }) => {
            assert_eq!(row, 3);
            assert_eq!(field, "bonus");
        }
        other => panic!("expected unknown field error, got {:?}", other),
    }
    assert_eq!(store.get(keys::SALARY_TOTAL).await.unwrap(), None);
}

#[tokio::test]
async fn test_unknown_schedule_and_zero_line() {
    let store = setup_test_store().await;
    let mut forms = IncomeForms::open(store.clone()).await.unwrap();

    let bad_schedule =
        LineItemLoader::parse("schedule,line,label,field,amount\nagriculture,1,,income,5\n".as_bytes())
            .unwrap();
    let zero_line =
        LineItemLoader::parse("schedule,line,label,field,amount\nsalary,0,,gross_salary,5\n".as_bytes())
            .unwrap();

    assert!(matches!(
        LineItemLoader::load(&mut forms, &bad_schedule).await,
        Err(LineItemLoaderError::UnknownSchedule { row: 2, .. })
    ));
    assert!(matches!(
        LineItemLoader::load(&mut forms, &zero_line).await,
        Err(LineItemLoaderError::InvalidLine { row: 2 })
    ));
}

#[tokio::test]
async fn test_line_number_past_the_next_line_is_rejected() {
    let store = setup_test_store().await;
    let mut forms = IncomeForms::open(store.clone()).await.unwrap();
    let csv = "schedule,line,label,field,amount\n\
               salary,1,,gross_salary,500000\n\
               salary,2,Second employer,gross_salary,100000\n\
               salary,18446744073709551615,Runaway,gross_salary,1\n";
    let records = LineItemLoader::parse(csv.as_bytes()).unwrap();

    let result = LineItemLoader::load(&mut forms, &records).await;

    match result {
        Err(LineItemLoaderError::Form {
            row,
            source: FormError::NoSuchLine { index, len, .. },
        }) => {
            assert_eq!(row, 4);
            assert_eq!(index, usize::MAX - 1);
            assert_eq!(len, 2);
        }
        other => panic!("expected out-of-range line error, got {:?}", other),
    }
    assert_eq!(forms.salary.lines().len(), 2);
    assert_eq!(store.get(keys::SALARY_TOTAL).await.unwrap(), None);
}
