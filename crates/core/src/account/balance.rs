//! Account balance pairs and delta application.
//!
//! Balances are only ever adjusted by relative deltas, applied as pure
//! functions of (current pair, delta) inside the caller's transaction scope.

use kopera_shared::types::Money;
use serde::{Deserialize, Serialize};

use super::types::NormalSide;

/// A cumulative credit/debit amount pair carried by every account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancePair {
    /// Cumulative credit amount.
    pub credit: Money,
    /// Cumulative debit amount.
    pub debit: Money,
}

impl BalancePair {
    /// Creates a balance pair.
    #[must_use]
    pub const fn new(credit: Money, debit: Money) -> Self {
        Self { credit, debit }
    }

    /// Applies a positive delta to both sides, returning the new pair.
    #[must_use]
    pub fn incremented(self, credit_delta: Money, debit_delta: Money) -> Self {
        Self {
            credit: self.credit + credit_delta,
            debit: self.debit + debit_delta,
        }
    }

    /// Applies a negative delta to both sides, returning the new pair.
    ///
    /// Exact inverse of [`BalancePair::incremented`].
    #[must_use]
    pub fn decremented(self, credit_delta: Money, debit_delta: Money) -> Self {
        Self {
            credit: self.credit - credit_delta,
            debit: self.debit - debit_delta,
        }
    }

    /// Net balance seen from the account's normal side.
    #[must_use]
    pub fn net(self, side: NormalSide) -> Money {
        match side {
            NormalSide::Debit => self.debit - self.credit,
            NormalSide::Credit => self.credit - self.debit,
        }
    }

    /// The cumulative amount on the account's normal side.
    ///
    /// This is the figure period closing reads: credit-normal accounts
    /// contribute their credit total, debit-normal their debit total.
    #[must_use]
    pub const fn normal_amount(self, side: NormalSide) -> Money {
        match side {
            NormalSide::Debit => self.debit,
            NormalSide::Credit => self.credit,
        }
    }
}

impl NormalSide {
    /// Balance change contributed by a movement, seen from this side.
    ///
    /// Debit-normal: change = debit - credit. Credit-normal: credit - debit.
    #[must_use]
    pub fn balance_change(self, debit: Money, credit: Money) -> Money {
        match self {
            Self::Debit => debit - credit,
            Self::Credit => credit - debit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn money(cents: i64) -> Money {
        Money::from_decimal(Decimal::new(cents, 2))
    }

    /// Strategy for generating amounts in cents.
    fn money_strategy() -> impl Strategy<Value = Money> {
        (0i64..1_000_000i64).prop_map(money)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Increment followed by the same decrement restores the pair.
        #[test]
        fn prop_increment_decrement_round_trip(
            start_credit in money_strategy(),
            start_debit in money_strategy(),
            credit_delta in money_strategy(),
            debit_delta in money_strategy(),
        ) {
            let start = BalancePair::new(start_credit, start_debit);
            let round_trip = start
                .incremented(credit_delta, debit_delta)
                .decremented(credit_delta, debit_delta);
            prop_assert_eq!(round_trip, start);
        }

        /// Net balance flips sign with the normal side.
        #[test]
        fn prop_net_is_antisymmetric(
            credit in money_strategy(),
            debit in money_strategy(),
        ) {
            let pair = BalancePair::new(credit, debit);
            prop_assert_eq!(pair.net(NormalSide::Debit), -pair.net(NormalSide::Credit));
        }

        /// The balance-change formula matches the normal side.
        #[test]
        fn prop_balance_change_formula(
            debit in money_strategy(),
            credit in money_strategy(),
        ) {
            prop_assert_eq!(
                NormalSide::Debit.balance_change(debit, credit),
                debit - credit
            );
            prop_assert_eq!(
                NormalSide::Credit.balance_change(debit, credit),
                credit - debit
            );
        }
    }

    #[test]
    fn test_incremented_adds_both_sides() {
        let pair = BalancePair::new(money(10_000), money(5_000));
        let next = pair.incremented(money(100), money(200));
        assert_eq!(next.credit, money(10_100));
        assert_eq!(next.debit, money(5_200));
    }

    #[test]
    fn test_normal_amount_picks_side() {
        let pair = BalancePair::new(money(700), money(300));
        assert_eq!(pair.normal_amount(NormalSide::Credit), money(700));
        assert_eq!(pair.normal_amount(NormalSide::Debit), money(300));
    }
}
