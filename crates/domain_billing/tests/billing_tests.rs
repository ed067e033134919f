//! Comprehensive tests for domain_billing

use chrono::{Datelike, NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::money::to_f64;
use core_kernel::{CardPurchaseId, CreditCardId, UserId, YearMonth};

use domain_billing::card::{CardBrand, CreditCard};
use domain_billing::cycle::{
    allocate_billing_month, installment_schedule, statement_total, InstallmentPlan,
    StatementSummary,
};
use domain_billing::error::BillingError;
use domain_billing::purchase::CardPurchase;
use test_utils::{date_strategy, day_of_month_strategy, everyday_amount_strategy, installments_strategy};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ym(y: i32, m: u32) -> YearMonth {
    YearMonth::new(y, m).unwrap()
}

fn card(limit: Decimal, closing_day: u32) -> CreditCard {
    let now = Utc::now();
    CreditCard {
        id: CreditCardId::new_v7(),
        user_id: UserId::new(),
        name: "Nubank".to_string(),
        last_digits: Some("1234".to_string()),
        brand: CardBrand::Mastercard,
        limit,
        closing_day,
        due_day: 17,
        color: "#8b5cf6".to_string(),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

fn purchase(card: &CreditCard, name: &str, total: Decimal, installments: u32, on: NaiveDate) -> CardPurchase {
    let now = Utc::now();
    CardPurchase {
        id: CardPurchaseId::new_v7(),
        user_id: card.user_id,
        credit_card_id: card.id,
        category_id: None,
        name: name.to_string(),
        description: None,
        total_amount: total,
        installments,
        purchase_date: on,
        created_at: now,
        updated_at: now,
    }
}

// ============================================================================
// Allocator Tests
// ============================================================================

mod allocator_tests {
    use super::*;

    #[test]
    fn test_purchase_after_closing_day_skips_purchase_month() {
        // closing day 10, bought on the 15th in 3x of 100
        let plan = InstallmentPlan::new(300.0, 3, date(2024, 3, 15));
        let schedule = installment_schedule(&plan, 10).unwrap();

        assert_eq!(schedule.len(), 3);
        assert!(schedule.iter().all(|i| i.amount == 100.0));
        let months: Vec<YearMonth> = schedule.iter().map(|i| i.billing_month).collect();
        assert_eq!(months, vec![ym(2024, 4), ym(2024, 5), ym(2024, 6)]);
        assert_eq!(allocate_billing_month(&plan, 10, ym(2024, 3)).unwrap(), 0.0);
    }

    #[test]
    fn test_purchase_on_closing_day_stays_in_cycle() {
        let plan = InstallmentPlan::new(90.0, 3, date(2024, 3, 10));
        let schedule = installment_schedule(&plan, 10).unwrap();

        assert_eq!(schedule[0].billing_month, ym(2024, 3));
        assert_eq!(schedule[0].number, 1);
        assert_eq!(schedule[2].billing_month, ym(2024, 5));
        assert_eq!(schedule[2].number, 3);
    }

    #[test]
    fn test_day_after_closing_day_moves_to_next_cycle() {
        let plan = InstallmentPlan::new(90.0, 1, date(2024, 3, 11));
        assert_eq!(allocate_billing_month(&plan, 10, ym(2024, 3)).unwrap(), 0.0);
        assert_eq!(allocate_billing_month(&plan, 10, ym(2024, 4)).unwrap(), 90.0);
    }

    #[test]
    fn test_closing_day_31_in_february() {
        // No 31 February is ever built; the 29th is simply on or before day 31.
        let plan = InstallmentPlan::new(60.0, 2, date(2024, 2, 29));
        let schedule = installment_schedule(&plan, 31).unwrap();
        assert_eq!(schedule[0].billing_month, ym(2024, 2));
        assert_eq!(schedule[1].billing_month, ym(2024, 3));
    }

    #[test]
    fn test_uneven_split_keeps_float_remainder() {
        let plan = InstallmentPlan::new(100.0, 3, date(2024, 1, 5));
        let amount = allocate_billing_month(&plan, 10, ym(2024, 1)).unwrap();
        assert_eq!(amount, 100.0 / 3.0);
    }

    #[test]
    fn test_long_plan_crosses_years() {
        let plan = InstallmentPlan::new(4800.0, 48, date(2024, 12, 20));
        let schedule = installment_schedule(&plan, 5).unwrap();
        assert_eq!(schedule.first().unwrap().billing_month, ym(2025, 1));
        assert_eq!(schedule.last().unwrap().billing_month, ym(2028, 12));
    }

    #[test]
    fn test_zero_installments_is_rejected() {
        let plan = InstallmentPlan::new(10.0, 0, date(2024, 1, 1));
        assert_eq!(
            installment_schedule(&plan, 10),
            Err(BillingError::InvalidInstallments(0))
        );
    }

    #[test]
    fn test_invalid_closing_day_is_rejected() {
        let plan = InstallmentPlan::new(10.0, 1, date(2024, 1, 1));
        assert_eq!(
            allocate_billing_month(&plan, 0, ym(2024, 1)),
            Err(BillingError::InvalidClosingDay(0))
        );
        assert_eq!(
            statement_total(&[plan], 32, ym(2024, 1)),
            Err(BillingError::InvalidClosingDay(32))
        );
    }

    #[test]
    fn test_statement_total_sums_purchases() {
        let plans = [
            InstallmentPlan::new(300.0, 3, date(2024, 3, 15)), // Apr, May, Jun
            InstallmentPlan::new(50.0, 1, date(2024, 4, 2)),   // Apr
            InstallmentPlan::new(200.0, 2, date(2024, 2, 1)),  // Feb, Mar
        ];
        assert_eq!(statement_total(&plans, 10, ym(2024, 4)).unwrap(), 150.0);
        assert_eq!(statement_total(&plans, 10, ym(2024, 3)).unwrap(), 100.0);
        assert_eq!(statement_total(&[], 10, ym(2024, 3)).unwrap(), 0.0);
    }
}

// ============================================================================
// Statement Summary Tests
// ============================================================================

mod summary_tests {
    use super::*;

    #[test]
    fn test_utilization_and_available_credit() {
        let summary = StatementSummary::new(250.0, Some(1000.0));
        assert_eq!(summary.total, 250.0);
        assert_eq!(summary.utilization_percent, 25.0);
        assert_eq!(summary.available_credit, 750.0);
    }

    #[test]
    fn test_zero_limit_yields_zero_utilization() {
        let summary = StatementSummary::new(250.0, Some(0.0));
        assert_eq!(summary.utilization_percent, 0.0);
        assert_eq!(summary.available_credit, 0.0);
    }

    #[test]
    fn test_card_statement_lists_billed_installments() {
        let card = card(dec!(1000), 10);
        let purchases = vec![
            purchase(&card, "Geladeira", dec!(300), 3, date(2024, 3, 15)),
            purchase(&card, "Mercado", dec!(80), 1, date(2024, 4, 9)),
            purchase(&card, "Cinema", dec!(40), 1, date(2024, 4, 12)),
        ];

        let statement = card.statement(&purchases, ym(2024, 4)).unwrap();

        assert_eq!(statement.reference_month, ym(2024, 4));
        assert_eq!(statement.lines.len(), 2);
        assert_eq!(statement.lines[0].name, "Geladeira");
        assert_eq!(statement.lines[0].installment_number, 1);
        assert_eq!(statement.lines[0].installments, 3);
        assert_eq!(statement.summary.total, 180.0);
        assert_eq!(statement.summary.utilization_percent, 18.0);
        assert_eq!(statement.summary.available_credit, 820.0);
    }

    #[test]
    fn test_summary_matches_statement_total() {
        let card = card(dec!(500), 25);
        let purchases = vec![
            purchase(&card, "A", dec!(120), 4, date(2024, 1, 26)),
            purchase(&card, "B", dec!(35.5), 1, date(2024, 2, 25)),
        ];

        let summary = card.statement_summary(&purchases, ym(2024, 2)).unwrap();
        let statement = card.statement(&purchases, ym(2024, 2)).unwrap();
        assert_eq!(summary, statement.summary);
        assert_eq!(summary.total, 65.5);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

fn plan_strategy() -> impl Strategy<Value = (InstallmentPlan, u32)> {
    (
        everyday_amount_strategy(),
        installments_strategy(),
        date_strategy(),
        day_of_month_strategy(),
    )
        .prop_map(|(amount, installments, purchase_date, closing_day)| {
            let plan = InstallmentPlan::new(to_f64(amount), installments, purchase_date);
            (plan, closing_day)
        })
}

proptest! {
    #[test]
    fn single_installment_is_never_split((plan, closing_day) in plan_strategy()) {
        let plan = InstallmentPlan { installments: 1, ..plan };
        let purchase_month = YearMonth::from_date(plan.purchase_date);
        let expected = if plan.purchase_date.day() > closing_day {
            purchase_month.add_months(1)
        } else {
            purchase_month
        };

        let schedule = installment_schedule(&plan, closing_day).unwrap();
        prop_assert_eq!(schedule.len(), 1);
        prop_assert_eq!(schedule[0].billing_month, expected);
        prop_assert_eq!(schedule[0].amount, plan.total_amount);
    }

    #[test]
    fn installments_sum_to_total((plan, closing_day) in plan_strategy()) {
        let schedule = installment_schedule(&plan, closing_day).unwrap();
        let sum: f64 = schedule.iter().map(|i| i.amount).sum();

        prop_assert_eq!(schedule.len() as u32, plan.installments);
        prop_assert!((sum - plan.total_amount).abs() <= 1e-6 * plan.total_amount.max(1.0));
    }

    #[test]
    fn schedule_months_are_consecutive((plan, closing_day) in plan_strategy()) {
        let schedule = installment_schedule(&plan, closing_day).unwrap();
        for pair in schedule.windows(2) {
            prop_assert_eq!(pair[0].billing_month.add_months(1), pair[1].billing_month);
        }
    }

    #[test]
    fn allocation_agrees_with_schedule(
        (plan, closing_day) in plan_strategy(),
        offset in -2i64..52i64
    ) {
        let reference = YearMonth::from_date(plan.purchase_date).add_months(offset);
        let from_schedule: f64 = installment_schedule(&plan, closing_day)
            .unwrap()
            .iter()
            .filter(|i| i.billing_month == reference)
            .map(|i| i.amount)
            .sum();

        prop_assert_eq!(allocate_billing_month(&plan, closing_day, reference).unwrap(), from_schedule);
    }

    #[test]
    fn utilization_stays_in_bounds(total in 0.0f64..1e9, limit in 0.01f64..1e9) {
        let summary = StatementSummary::new(total, Some(limit));
        prop_assert!(summary.utilization_percent >= 0.0);
        prop_assert!(summary.utilization_percent <= 100.0);
        prop_assert!(summary.available_credit >= 0.0);
    }
}
