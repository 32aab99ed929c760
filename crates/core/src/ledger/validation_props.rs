//! Property tests for batch validation.

use chrono::NaiveDate;
use kopera_shared::types::{DetailAccountId, GeneralAccountId, Money};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{DetailAccountInfo, LedgerLineInput, MovementType};
use super::validation::validate_batch;

fn money(cents: i64) -> Money {
    Money::from_decimal(Decimal::new(cents, 2))
}

/// A batch over one well-formed detail/general pair: per-line movement type
/// and amount are generated, so balance is a property of the data alone.
fn batch_strategy() -> impl Strategy<Value = Vec<(bool, i64)>> {
    prop::collection::vec((prop::bool::ANY, 1i64..100_000i64), 1..20)
}

fn build_lines(
    detail: DetailAccountId,
    general: GeneralAccountId,
    movements: &[(bool, i64)],
) -> Vec<LedgerLineInput> {
    movements.iter()
        .map(|(is_debit, cents)| LedgerLineInput {
            detail_account_id: detail,
            general_account_id: general,
            movement_type: if *is_debit {
                MovementType::Debit
            } else {
                MovementType::Credit
            },
            amount: money(*cents),
            description: "prop".to_string(),
            ledger_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A batch is accepted exactly when its debit and credit totals match.
    #[test]
    fn prop_accepted_iff_balanced(movements in batch_strategy()) {
        let general = GeneralAccountId::new();
        let detail = DetailAccountId::new();
        let lines = build_lines(detail, general, &movements);

        let debit: i64 = movements.iter().filter(|(d, _)| *d).map(|(_, c)| c).sum();
        let credit: i64 = movements.iter().filter(|(d, _)| !*d).map(|(_, c)| c).sum();

        let lookup = |id: DetailAccountId| {
            (id == detail).then(|| DetailAccountInfo {
                id,
                general_id: general,
                number: "1101.01".to_string(),
            })
        };
        let result = validate_batch(&lines, lookup, |g| g == general);

        if debit == credit {
            let totals = result.unwrap();
            prop_assert_eq!(totals.debit, money(debit));
            prop_assert_eq!(totals.credit, money(credit));
        } else {
            let is_unbalanced = matches!(result, Err(LedgerError::UnbalancedJournal { .. }));
            prop_assert!(is_unbalanced);
        }
    }

    /// Validation totals never depend on line order.
    #[test]
    fn prop_totals_order_independent(movements in batch_strategy()) {
        let general = GeneralAccountId::new();
        let detail = DetailAccountId::new();

        let mut reversed = movements.clone();
        reversed.reverse();

        let lookup = |id: DetailAccountId| {
            (id == detail).then(|| DetailAccountInfo {
                id,
                general_id: general,
                number: "1101.01".to_string(),
            })
        };

        let forward = validate_batch(&build_lines(detail, general, &movements), lookup, |g| g == general);
        let backward =
            validate_batch(&build_lines(detail, general, &reversed), lookup, |g| g == general);

        match (forward, backward) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.debit, b.debit);
                prop_assert_eq!(a.credit, b.credit);
            }
            (Err(_), Err(_)) => {}
            (a, b) => prop_assert!(false, "divergent outcomes: {a:?} vs {b:?}"),
        }
    }
}
