//! Comprehensive tests for domain_investment

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{GoalId, UserId};

use domain_investment::goal::{goal_ordering, Goal};
use domain_investment::projection::{
    compound_future_value, future_value, project_investment, projection_series,
    simple_future_value, InterestType, ProjectionInput, ProjectionPoint, ProjectionSummary,
};
use domain_investment::InvestmentError;
use test_utils::{interest_type_strategy, projection_input_strategy};

fn input(p: f64, c: f64, rate: f64, months: u32, kind: InterestType) -> ProjectionInput {
    ProjectionInput::new(p, c, rate, months, kind).unwrap()
}

// ============================================================================
// Projection Tests
// ============================================================================

mod projection_tests {
    use super::*;

    #[test]
    fn test_compound_scenario_monthly_rate_one_percent() {
        let i = input(1000.0, 500.0, 12.0, 12, InterestType::Compound);
        assert!((i.monthly_rate() - 0.01).abs() < 1e-15);

        let expected = 1000.0 * 1.01f64.powf(12.0) + 500.0 * ((1.01f64.powf(12.0) - 1.0) / 0.01);
        let value = project_investment(&i);
        assert!((value - expected).abs() < 1e-6);
        assert!((value - 7468.1).abs() < 0.05);
    }

    #[test]
    fn test_compound_without_contribution_is_pure_growth() {
        let i = input(2500.0, 0.0, 9.0, 36, InterestType::Compound);
        let expected = 2500.0 * (1.0 + 9.0 / 1200.0f64).powf(36.0);
        assert!((project_investment(&i) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_compound_zero_rate_guard() {
        let i = input(1000.0, 300.0, 0.0, 600, InterestType::Compound);
        let value = project_investment(&i);
        assert!(value.is_finite());
        assert_eq!(value, 1000.0 + 300.0 * 600.0);
    }

    #[test]
    fn test_simple_zero_rate_is_total_invested() {
        let i = input(1000.0, 300.0, 0.0, 24, InterestType::Simple);
        assert_eq!(project_investment(&i), 1000.0 + 300.0 * 24.0);
    }

    #[test]
    fn test_simple_single_month() {
        // r = 0.01: 100 + 10 + 1 + 10*0.01*1
        let value = simple_future_value(100.0, 10.0, 0.01, 1);
        assert!((value - 111.1).abs() < 1e-12);
    }

    #[test]
    fn test_raw_calculators_at_month_zero() {
        assert_eq!(simple_future_value(42.0, 10.0, 0.02, 0), 42.0);
        assert_eq!(compound_future_value(42.0, 10.0, 0.02, 0), 42.0);
    }

    #[test]
    fn test_future_value_dispatches_on_method() {
        let simple = input(1000.0, 100.0, 10.0, 12, InterestType::Simple);
        let compound = ProjectionInput {
            interest_type: InterestType::Compound,
            ..simple
        };
        assert!(future_value(&compound, 12) > future_value(&simple, 12));
    }

    #[test]
    fn test_interest_type_text() {
        assert_eq!(InterestType::Simple.as_str(), "SIMPLE");
        assert_eq!("COMPOUND".parse::<InterestType>().unwrap(), InterestType::Compound);
        assert!("compound".parse::<InterestType>().is_err());
        assert_eq!(serde_json::to_string(&InterestType::Compound).unwrap(), "\"COMPOUND\"");
    }

    #[test]
    fn test_validation_names_the_field() {
        let err = ProjectionInput::new(0.0, -5.0, 1.0, 12, InterestType::Simple).unwrap_err();
        assert_eq!(err.field(), Some("monthlyContribution"));
        assert_eq!(err.to_string(), "Aporte mensal não pode ser negativo");

        let err = ProjectionInput::new(0.0, 0.0, 1.0, 601, InterestType::Simple).unwrap_err();
        assert_eq!(
            err,
            InvestmentError::InvalidProjection {
                field: "periodMonths",
                message: "Período máximo de 50 anos".to_string(),
            }
        );
    }

    #[test]
    fn test_boundaries_are_accepted() {
        assert!(ProjectionInput::new(0.0, 0.0, 0.0, 1, InterestType::Simple).is_ok());
        assert!(ProjectionInput::new(999_999_999.0, 999_999_999.0, 100.0, 600, InterestType::Compound).is_ok());
    }
}

// ============================================================================
// Series Tests
// ============================================================================

mod series_tests {
    use super::*;

    #[test]
    fn test_three_month_series_has_four_points() {
        let i = input(1000.0, 100.0, 12.0, 3, InterestType::Compound);
        let points: Vec<ProjectionPoint> = projection_series(&i).collect();

        assert_eq!(points.len(), 4);
        assert_eq!(points[0].month, 0);
        assert_eq!(points[0].total_invested, 1000.0);
        assert_eq!(points[0].interest, 0.0);
        assert_eq!(points[3].month, 3);
        assert_eq!(points[3].total_invested, 1300.0);
    }

    #[test]
    fn test_simple_series_starts_at_principal() {
        let i = input(500.0, 50.0, 6.0, 2, InterestType::Simple);
        let first = projection_series(&i).next().unwrap();
        assert_eq!(first.total_with_interest, 500.0);
        assert_eq!(first.interest, 0.0);
    }

    #[test]
    fn test_series_is_restartable() {
        let i = input(1000.0, 100.0, 8.0, 12, InterestType::Simple);
        let mut series = projection_series(&i);
        let replay = series.clone();
        series.next();
        series.next();

        assert_eq!(series.len(), 11);
        assert_eq!(replay.len(), 13);
        let again: Vec<ProjectionPoint> = projection_series(&i).collect();
        let first: Vec<ProjectionPoint> = replay.collect();
        assert_eq!(again, first);
    }

    #[test]
    fn test_last_point_matches_summary() {
        let i = input(1000.0, 500.0, 12.0, 12, InterestType::Compound);
        let last = projection_series(&i).last().unwrap();
        let summary = ProjectionSummary::from_input(&i);

        assert_eq!(summary.final_amount, last.total_with_interest);
        assert_eq!(summary.total_invested, last.total_invested);
        assert_eq!(summary.total_interest, last.interest);
        assert_eq!(summary.total_invested, 7000.0);
    }
}

// ============================================================================
// Goal Tests
// ============================================================================

mod goal_tests {
    use super::*;

    fn goal(target: Decimal, current: Decimal, priority: u8, deadline: NaiveDate) -> Goal {
        let now = Utc::now();
        Goal {
            id: GoalId::new_v7(),
            user_id: UserId::new(),
            name: "Reserva".to_string(),
            description: None,
            target_amount: target,
            current_amount: current,
            deadline,
            priority,
            is_completed: current >= target,
            created_at: now,
            updated_at: now,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_progress_rounds() {
        let g = goal(dec!(3000), dec!(1000), 1, date(2025, 1, 1));
        assert_eq!(g.progress_percent(), 33);
        let g = goal(dec!(200), dec!(1), 1, date(2025, 1, 1));
        assert_eq!(g.progress_percent(), 1);
    }

    #[test]
    fn test_days_left_negative_when_overdue() {
        let g = goal(dec!(100), dec!(0), 1, date(2024, 6, 10));
        assert_eq!(g.days_left(date(2024, 6, 1)), 9);
        assert_eq!(g.days_left(date(2024, 6, 15)), -5);
    }

    #[test]
    fn test_remaining_amount_never_negative() {
        let g = goal(dec!(100), dec!(150), 1, date(2025, 1, 1));
        assert_eq!(g.remaining_amount(), Decimal::ZERO);
    }

    #[test]
    fn test_ordering() {
        let done = goal(dec!(100), dec!(100), 5, date(2024, 1, 1));
        let low = goal(dec!(100), dec!(0), 1, date(2024, 1, 1));
        let high_late = goal(dec!(100), dec!(0), 5, date(2025, 1, 1));
        let high_soon = goal(dec!(100), dec!(0), 5, date(2024, 6, 1));

        let mut goals = vec![done.clone(), low.clone(), high_late.clone(), high_soon.clone()];
        goals.sort_by(goal_ordering);

        let ids: Vec<GoalId> = goals.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![high_soon.id, high_late.id, low.id, done.id]);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #[test]
    fn longer_periods_never_decrease_value(
        p in 0.0f64..1_000_000.0,
        c in 0.0f64..100_000.0,
        rate in 0.0f64..=100.0,
        months in 1u32..600u32,
        kind in interest_type_strategy()
    ) {
        let i = input(p, c, rate, months, kind);
        let longer = ProjectionInput { period_months: months + 1, ..i };
        prop_assert!(project_investment(&longer) >= project_investment(&i));
    }

    #[test]
    fn zero_rate_compound_is_linear(
        p in 0.0f64..1_000_000.0,
        c in 0.0f64..100_000.0,
        months in 1u32..=600u32
    ) {
        let i = input(p, c, 0.0, months, InterestType::Compound);
        prop_assert_eq!(project_investment(&i), p + c * months as f64);
    }

    #[test]
    fn simple_literal_matches_reduced_form(
        p in 0.0f64..1_000_000.0,
        c in 0.0f64..100_000.0,
        rate in 0.0f64..=100.0,
        months in 1u32..=600u32
    ) {
        let r = rate / 100.0 / 12.0;
        let n = months as f64;
        let reduced = p + c * n + p * r * n + c * r * (n + 1.0) / 2.0;
        let literal = simple_future_value(p, c, r, months);
        prop_assert!((literal - reduced).abs() <= 1e-9 * reduced.max(1.0));
    }

    #[test]
    fn series_has_period_plus_one_points(
        months in 1u32..=600u32,
        kind in interest_type_strategy()
    ) {
        let i = input(100.0, 10.0, 5.0, months, kind);
        let series = projection_series(&i);
        prop_assert_eq!(series.len(), months as usize + 1);
        prop_assert_eq!(series.count(), months as usize + 1);
    }

    #[test]
    fn results_are_finite_for_valid_inputs(i in projection_input_strategy()) {
        prop_assert!(project_investment(&i).is_finite());
    }

    #[test]
    fn interest_is_never_negative(
        p in 0.0f64..1_000_000.0,
        c in 0.0f64..100_000.0,
        rate in 0.0f64..=100.0,
        months in 1u32..=120u32,
        kind in interest_type_strategy()
    ) {
        let i = input(p, c, rate, months, kind);
        for point in projection_series(&i) {
            prop_assert!(point.interest >= -1e-6 * point.total_invested.max(1.0));
        }
    }
}
