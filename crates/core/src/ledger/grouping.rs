//! Posting aggregation: grouping pending ledger lines into journal groups.

use std::collections::HashMap;

use kopera_shared::types::{DetailAccountId, Money};

use super::types::MovementType;

/// The view of a pending ledger line the posting engine aggregates over.
#[derive(Debug, Clone)]
pub struct PendingLine {
    /// The detail account the movement belongs to.
    pub detail_account_id: DetailAccountId,
    /// Whether this is a debit or credit movement.
    pub movement_type: MovementType,
    /// Movement amount.
    pub amount: Money,
}

/// One journal group: the per-detail-account aggregate of a posting run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalGroup {
    /// The detail account all grouped lines belong to.
    pub detail_account_id: DetailAccountId,
    /// Sum of debit movement amounts in the group.
    pub debit_total: Money,
    /// Sum of credit movement amounts in the group.
    pub credit_total: Money,
    /// Number of lines aggregated into this group.
    pub line_count: usize,
}

/// Groups pending lines by detail account, summing debit and credit amounts
/// separately. Groups come back in first-seen line order.
#[must_use]
pub fn group_by_detail_account(lines: &[PendingLine]) -> Vec<JournalGroup> {
    let mut index: HashMap<DetailAccountId, usize> = HashMap::new();
    let mut groups: Vec<JournalGroup> = Vec::new();

    for line in lines {
        let slot = *index.entry(line.detail_account_id).or_insert_with(|| {
            groups.push(JournalGroup {
                detail_account_id: line.detail_account_id,
                debit_total: Money::ZERO,
                credit_total: Money::ZERO,
                line_count: 0,
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        match line.movement_type {
            MovementType::Debit => group.debit_total = group.debit_total + line.amount,
            MovementType::Credit => group.credit_total = group.credit_total + line.amount,
        }
        group.line_count += 1;
    }

    groups
}

/// Sums the debit and credit totals across a set of journal groups.
///
/// Invariant check helper: these must equal the totals of the lines that
/// produced the groups.
#[must_use]
pub fn grouped_totals(groups: &[JournalGroup]) -> (Money, Money) {
    let debit = groups.iter().map(|g| g.debit_total).sum();
    let credit = groups.iter().map(|g| g.credit_total).sum();
    (debit, credit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn money(cents: i64) -> Money {
        Money::from_decimal(Decimal::new(cents, 2))
    }

    fn pending(detail: DetailAccountId, movement_type: MovementType, cents: i64) -> PendingLine {
        PendingLine {
            detail_account_id: detail,
            movement_type,
            amount: money(cents),
        }
    }

    #[test]
    fn test_one_group_per_detail_account() {
        let detail_a = DetailAccountId::new();
        let detail_b = DetailAccountId::new();

        // 3 lines on A, 2 on B, all the same day: exactly 2 groups.
        let lines = vec![
            pending(detail_a, MovementType::Debit, 10_000),
            pending(detail_a, MovementType::Debit, 2_500),
            pending(detail_a, MovementType::Credit, 500),
            pending(detail_b, MovementType::Credit, 12_000),
            pending(detail_b, MovementType::Debit, 1_000),
        ];

        let groups = group_by_detail_account(&lines);
        assert_eq!(groups.len(), 2);

        assert_eq!(groups[0].detail_account_id, detail_a);
        assert_eq!(groups[0].debit_total, money(12_500));
        assert_eq!(groups[0].credit_total, money(500));
        assert_eq!(groups[0].line_count, 3);

        assert_eq!(groups[1].detail_account_id, detail_b);
        assert_eq!(groups[1].debit_total, money(1_000));
        assert_eq!(groups[1].credit_total, money(12_000));
        assert_eq!(groups[1].line_count, 2);
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        assert!(group_by_detail_account(&[]).is_empty());
    }

    /// Strategy: lines over a small pool of accounts so grouping happens.
    fn lines_strategy() -> impl Strategy<Value = Vec<PendingLine>> {
        let accounts: Vec<DetailAccountId> = (0..4).map(|_| DetailAccountId::new()).collect();
        prop::collection::vec(
            (0usize..4, prop::bool::ANY, 1i64..1_000_000i64).prop_map(move |(idx, debit, cents)| {
                PendingLine {
                    detail_account_id: accounts[idx],
                    movement_type: if debit {
                        MovementType::Debit
                    } else {
                        MovementType::Credit
                    },
                    amount: money(cents),
                }
            }),
            0..40,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Group totals preserve the line totals exactly.
        #[test]
        fn prop_grouping_preserves_sums(lines in lines_strategy()) {
            let groups = group_by_detail_account(&lines);
            let (grouped_debit, grouped_credit) = grouped_totals(&groups);

            let line_debit: Money = lines
                .iter()
                .filter(|l| l.movement_type == MovementType::Debit)
                .map(|l| l.amount)
                .sum();
            let line_credit: Money = lines
                .iter()
                .filter(|l| l.movement_type == MovementType::Credit)
                .map(|l| l.amount)
                .sum();

            prop_assert_eq!(grouped_debit, line_debit);
            prop_assert_eq!(grouped_credit, line_credit);
        }

        /// Exactly one group per distinct detail account.
        #[test]
        fn prop_one_group_per_account(lines in lines_strategy()) {
            let groups = group_by_detail_account(&lines);
            let distinct: std::collections::HashSet<_> =
                lines.iter().map(|l| l.detail_account_id).collect();
            prop_assert_eq!(groups.len(), distinct.len());
        }

        /// Line counts across groups account for every line.
        #[test]
        fn prop_line_counts_add_up(lines in lines_strategy()) {
            let groups = group_by_detail_account(&lines);
            let counted: usize = groups.iter().map(|g| g.line_count).sum();
            prop_assert_eq!(counted, lines.len());
        }
    }
}
