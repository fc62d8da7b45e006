//! Tests for report arithmetic and period resolution.

use chrono::NaiveDate;
use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::service::ReportService;
use super::types::{DuesTotals, ReportPeriod};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

#[rstest]
#[case(Some(2023), Some(7), 2023, 7)]
#[case(None, None, 2024, 3)]
#[case(Some(0), Some(0), 2024, 3)]
#[case(Some(2023), None, 2023, 3)]
#[case(None, Some(11), 2024, 11)]
fn test_period_resolution(
    #[case] year: Option<i32>,
    #[case] month: Option<u32>,
    #[case] expected_year: i32,
    #[case] expected_month: u32,
) {
    let period = ReportPeriod::resolve(year, month, today());
    assert_eq!(period.year, expected_year);
    assert_eq!(period.month, expected_month);
}

#[test]
fn test_empty_window_is_all_zeros() {
    let period = ReportPeriod {
        year: 2024,
        month: 3,
    };
    let summary = ReportService::build_summary(period, DuesTotals::default(), Decimal::ZERO);

    assert_eq!(summary.total_dues, Decimal::ZERO);
    assert_eq!(summary.total_paid, Decimal::ZERO);
    assert_eq!(summary.total_overdue, Decimal::ZERO);
    assert_eq!(summary.total_expenses, Decimal::ZERO);
    assert_eq!(summary.balance, Decimal::ZERO);
    assert_eq!(summary.paid_count, 0);
    assert_eq!(summary.pending_count, 0);
    assert_eq!(summary.overdue_count, 0);
}

#[test]
fn test_balance_is_paid_minus_expenses() {
    let period = ReportPeriod {
        year: 2024,
        month: 3,
    };
    let dues = DuesTotals {
        total: dec!(1000),
        paid: dec!(600),
        overdue: dec!(250),
        paid_count: 6,
        pending_count: 2,
        overdue_count: 3,
    };

    let summary = ReportService::build_summary(period, dues, dec!(450));
    assert_eq!(summary.balance, dec!(150));
    assert_eq!(summary.total_dues, dec!(1000));
    assert_eq!(summary.total_overdue, dec!(250));
}

proptest! {
    /// For any aggregates, balance equals paid minus expenses exactly.
    #[test]
    fn prop_balance_identity(
        paid in 0i64..1_000_000_000,
        expenses in 0i64..1_000_000_000,
    ) {
        let period = ReportPeriod { year: 2024, month: 1 };
        let dues = DuesTotals {
            paid: Decimal::new(paid, 2),
            ..DuesTotals::default()
        };
        let expenses = Decimal::new(expenses, 2);

        let summary = ReportService::build_summary(period, dues, expenses);
        prop_assert_eq!(summary.balance, summary.total_paid - summary.total_expenses);
    }

    /// Input aggregates are carried through unchanged.
    #[test]
    fn prop_totals_pass_through(
        total in 0i64..1_000_000_000,
        paid in 0i64..1_000_000_000,
        overdue in 0i64..1_000_000_000,
    ) {
        let period = ReportPeriod { year: 2024, month: 1 };
        let dues = DuesTotals {
            total: Decimal::new(total, 2),
            paid: Decimal::new(paid, 2),
            overdue: Decimal::new(overdue, 2),
            paid_count: 0,
            pending_count: 0,
            overdue_count: 0,
        };

        let summary = ReportService::build_summary(period, dues, Decimal::ZERO);
        prop_assert_eq!(summary.total_dues, dues.total);
        prop_assert_eq!(summary.total_paid, dues.paid);
        prop_assert_eq!(summary.total_overdue, dues.overdue);
    }
}
