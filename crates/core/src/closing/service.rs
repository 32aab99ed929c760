//! Net-result computation for period closing.

use kopera_shared::types::Money;

use crate::account::NormalSide;

use super::types::{NetResultBreakdown, ResultAccountBalance};

/// Stateless service computing the yearly net result.
///
/// The sums run over *cumulative* account balances, not the target year's
/// movements alone; this mirrors the lifetime-result behavior of the source
/// system (see DESIGN.md).
pub struct ClosingService;

impl ClosingService {
    /// Computes total revenue, total expense, and the signed net result
    /// across the given result-type accounts.
    ///
    /// Credit-normal accounts contribute their cumulative credit to revenue;
    /// debit-normal accounts contribute their cumulative debit to expense.
    #[must_use]
    pub fn compute_net_result(accounts: &[ResultAccountBalance]) -> NetResultBreakdown {
        let revenue: Money = accounts
            .iter()
            .filter(|a| a.normal_side == NormalSide::Credit)
            .map(|a| a.cumulative.normal_amount(a.normal_side))
            .sum();
        let expense: Money = accounts
            .iter()
            .filter(|a| a.normal_side == NormalSide::Debit)
            .map(|a| a.cumulative.normal_amount(a.normal_side))
            .sum();

        NetResultBreakdown {
            revenue,
            expense,
            net_result: revenue - expense,
        }
    }

    /// Splits a signed net result into the credit/debit components written
    /// onto the equity account's accumulation pair.
    ///
    /// A surplus lands on the credit side, a deficit on the debit side; the
    /// other side is zero.
    #[must_use]
    pub fn split_net_result(net_result: Money) -> (Money, Money) {
        if net_result.is_negative() {
            (Money::ZERO, net_result.abs())
        } else {
            (net_result, Money::ZERO)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::BalancePair;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn money(cents: i64) -> Money {
        Money::from_decimal(Decimal::new(cents, 2))
    }

    fn result_account(side: NormalSide, credit: i64, debit: i64) -> ResultAccountBalance {
        ResultAccountBalance {
            number: "4101.01".to_string(),
            normal_side: side,
            cumulative: BalancePair::new(money(credit), money(debit)),
        }
    }

    #[test]
    fn test_net_result_revenue_minus_expense() {
        let accounts = vec![
            result_account(NormalSide::Credit, 150_000, 0),
            result_account(NormalSide::Credit, 50_000, 1_000),
            result_account(NormalSide::Debit, 0, 80_000),
        ];

        let breakdown = ClosingService::compute_net_result(&accounts);
        assert_eq!(breakdown.revenue, money(200_000));
        assert_eq!(breakdown.expense, money(80_000));
        assert_eq!(breakdown.net_result, money(120_000));
    }

    #[test]
    fn test_net_result_can_be_negative() {
        let accounts = vec![
            result_account(NormalSide::Credit, 10_000, 0),
            result_account(NormalSide::Debit, 0, 25_000),
        ];

        let breakdown = ClosingService::compute_net_result(&accounts);
        assert_eq!(breakdown.net_result, money(-15_000));
    }

    #[test]
    fn test_no_accounts_zero_result() {
        let breakdown = ClosingService::compute_net_result(&[]);
        assert!(breakdown.net_result.is_zero());
        assert!(breakdown.revenue.is_zero());
        assert!(breakdown.expense.is_zero());
    }

    #[test]
    fn test_split_surplus_to_credit_side() {
        let (credit, debit) = ClosingService::split_net_result(money(120_000));
        assert_eq!(credit, money(120_000));
        assert!(debit.is_zero());
    }

    #[test]
    fn test_split_deficit_to_debit_side() {
        let (credit, debit) = ClosingService::split_net_result(money(-15_000));
        assert!(credit.is_zero());
        assert_eq!(debit, money(15_000));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The split always reassembles to the signed net result.
        #[test]
        fn prop_split_reassembles(net_cents in -1_000_000i64..1_000_000i64) {
            let net = money(net_cents);
            let (credit, debit) = ClosingService::split_net_result(net);
            prop_assert_eq!(credit - debit, net);
            prop_assert!(credit.is_zero() || debit.is_zero());
            prop_assert!(!credit.is_negative());
            prop_assert!(!debit.is_negative());
        }

        /// Net result equals revenue minus expense for any account mix.
        #[test]
        fn prop_net_is_revenue_minus_expense(
            balances in prop::collection::vec(
                (prop::bool::ANY, 0i64..1_000_000i64, 0i64..1_000_000i64),
                0..20,
            )
        ) {
            let accounts: Vec<ResultAccountBalance> = balances
                .iter()
                .map(|(credit_normal, credit, debit)| result_account(
                    if *credit_normal { NormalSide::Credit } else { NormalSide::Debit },
                    *credit,
                    *debit,
                ))
                .collect();

            let breakdown = ClosingService::compute_net_result(&accounts);
            prop_assert_eq!(breakdown.net_result, breakdown.revenue - breakdown.expense);
        }
    }
}
