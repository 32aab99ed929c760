//! Batch validation for bulk ledger intake.
//!
//! Validation is pure: account resolution is injected through closures so
//! the persistence layer decides where the data comes from while the rules
//! stay testable without a database.

use std::collections::HashMap;

use kopera_shared::types::{DetailAccountId, GeneralAccountId, Money};
use uuid::Uuid;

use super::error::{LedgerError, RelationMismatch};
use super::types::{BatchTotals, DetailAccountInfo, LedgerLineInput, MovementType};

/// Validates a batch of proposed ledger lines.
///
/// Performs the intake checks in order, each reporting every violation it
/// finds rather than the first:
/// 1. Every amount is positive.
/// 2. Every referenced detail and general account resolves to an active
///    account (`detail_lookup` / `general_exists`).
/// 3. Every line's general account is the referenced detail's parent.
/// 4. Debit and credit totals are equal at 2-decimal precision.
///
/// Returns the batch totals on success.
///
/// # Errors
///
/// Returns a [`LedgerError`] describing the first failed check.
pub fn validate_batch<D, G>(
    lines: &[LedgerLineInput],
    mut detail_lookup: D,
    mut general_exists: G,
) -> Result<BatchTotals, LedgerError>
where
    D: FnMut(DetailAccountId) -> Option<DetailAccountInfo>,
    G: FnMut(GeneralAccountId) -> bool,
{
    if lines.is_empty() {
        return Err(LedgerError::EmptyBatch);
    }

    let non_positive: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| !line.amount.is_positive())
        .map(|(i, _)| i)
        .collect();
    if !non_positive.is_empty() {
        return Err(LedgerError::InvalidAmount(format!(
            "amounts must be positive (lines {non_positive:?})"
        )));
    }

    // Resolve each distinct reference once; remember misses for the error list.
    let mut details: HashMap<DetailAccountId, Option<DetailAccountInfo>> = HashMap::new();
    let mut generals: HashMap<GeneralAccountId, bool> = HashMap::new();
    for line in lines {
        details
            .entry(line.detail_account_id)
            .or_insert_with(|| detail_lookup(line.detail_account_id));
        generals
            .entry(line.general_account_id)
            .or_insert_with(|| general_exists(line.general_account_id));
    }

    let mut missing: Vec<Uuid> = details
        .iter()
        .filter(|(_, info)| info.is_none())
        .map(|(id, _)| id.into_inner())
        .collect();
    missing.extend(
        generals
            .iter()
            .filter(|(_, found)| !**found)
            .map(|(id, _)| id.into_inner()),
    );
    if !missing.is_empty() {
        missing.sort_unstable();
        return Err(LedgerError::AccountsNotFound(missing));
    }

    let mismatches: Vec<RelationMismatch> = lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| {
            let info = details
                .get(&line.detail_account_id)
                .and_then(Option::as_ref)?;
            (info.general_id != line.general_account_id).then_some(RelationMismatch {
                line: i,
                detail_account: line.detail_account_id,
                given_general: line.general_account_id,
                actual_general: info.general_id,
            })
        })
        .collect();
    if !mismatches.is_empty() {
        return Err(LedgerError::AccountRelationMismatch(mismatches));
    }

    let debit: Money = lines
        .iter()
        .filter(|l| l.movement_type == MovementType::Debit)
        .map(|l| l.amount)
        .sum();
    let credit: Money = lines
        .iter()
        .filter(|l| l.movement_type == MovementType::Credit)
        .map(|l| l.amount)
        .sum();

    let totals = BatchTotals::new(debit, credit);
    if !totals.is_balanced {
        return Err(LedgerError::UnbalancedJournal { debit, credit });
    }

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn money(s: &str) -> Money {
        Money::parse(s).unwrap()
    }

    fn line(
        detail: DetailAccountId,
        general: GeneralAccountId,
        movement_type: MovementType,
        amount: &str,
    ) -> LedgerLineInput {
        LedgerLineInput {
            detail_account_id: detail,
            general_account_id: general,
            movement_type,
            amount: money(amount),
            description: "Test movement".to_string(),
            ledger_date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
        }
    }

    /// A lookup over a fixed set of (detail, parent) pairs.
    fn lookup_for(
        pairs: &[(DetailAccountId, GeneralAccountId)],
    ) -> impl FnMut(DetailAccountId) -> Option<DetailAccountInfo> + '_ {
        move |id| {
            pairs.iter().find(|(d, _)| *d == id).map(|(d, g)| DetailAccountInfo {
                id: *d,
                general_id: *g,
                number: "1101.01".to_string(),
            })
        }
    }

    #[test]
    fn test_balanced_batch_accepted() {
        let general = GeneralAccountId::new();
        let detail_a = DetailAccountId::new();
        let detail_b = DetailAccountId::new();
        let pairs = [(detail_a, general), (detail_b, general)];

        let lines = vec![
            line(detail_a, general, MovementType::Debit, "100.00"),
            line(detail_b, general, MovementType::Credit, "100.00"),
        ];

        let totals = validate_batch(&lines, lookup_for(&pairs), |g| g == general).unwrap();
        assert!(totals.is_balanced);
        assert_eq!(totals.debit, money("100.00"));
        assert_eq!(totals.credit, money("100.00"));
    }

    #[test]
    fn test_unbalanced_batch_reports_both_totals() {
        let general = GeneralAccountId::new();
        let detail_a = DetailAccountId::new();
        let detail_b = DetailAccountId::new();
        let pairs = [(detail_a, general), (detail_b, general)];

        let lines = vec![
            line(detail_a, general, MovementType::Debit, "100.00"),
            line(detail_b, general, MovementType::Credit, "99.99"),
        ];

        let err = validate_batch(&lines, lookup_for(&pairs), |g| g == general).unwrap_err();
        match err {
            LedgerError::UnbalancedJournal { debit, credit } => {
                assert_eq!(debit, Money::from_decimal(dec!(100.00)));
                assert_eq!(credit, Money::from_decimal(dec!(99.99)));
            }
            other => panic!("expected UnbalancedJournal, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_accounts_all_listed() {
        let general = GeneralAccountId::new();
        let known_detail = DetailAccountId::new();
        let missing_detail = DetailAccountId::new();
        let missing_general = GeneralAccountId::new();
        let pairs = [(known_detail, general)];

        let lines = vec![
            line(known_detail, general, MovementType::Debit, "50.00"),
            line(missing_detail, missing_general, MovementType::Credit, "50.00"),
        ];

        let err = validate_batch(&lines, lookup_for(&pairs), |g| g == general).unwrap_err();
        match err {
            LedgerError::AccountsNotFound(missing) => {
                assert_eq!(missing.len(), 2);
                assert!(missing.contains(&missing_detail.into_inner()));
                assert!(missing.contains(&missing_general.into_inner()));
            }
            other => panic!("expected AccountsNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_relation_mismatch_lists_every_violation() {
        let parent = GeneralAccountId::new();
        let other = GeneralAccountId::new();
        let detail_a = DetailAccountId::new();
        let detail_b = DetailAccountId::new();
        let pairs = [(detail_a, parent), (detail_b, parent)];

        let lines = vec![
            line(detail_a, other, MovementType::Debit, "10.00"),
            line(detail_b, parent, MovementType::Credit, "10.00"),
            line(detail_b, other, MovementType::Debit, "5.00"),
        ];

        let exists = |g: GeneralAccountId| g == parent || g == other;
        let err = validate_batch(&lines, lookup_for(&pairs), exists).unwrap_err();
        match err {
            LedgerError::AccountRelationMismatch(mismatches) => {
                let lines_listed: Vec<usize> = mismatches.iter().map(|m| m.line).collect();
                assert_eq!(lines_listed, vec![0, 2]);
                assert_eq!(mismatches[0].actual_general, parent);
                assert_eq!(mismatches[0].given_general, other);
            }
            other => panic!("expected AccountRelationMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_batch_rejected() {
        let err = validate_batch(&[], |_| None, |_| false).unwrap_err();
        assert!(matches!(err, LedgerError::EmptyBatch));
    }

    #[test]
    fn test_non_positive_amounts_rejected() {
        let general = GeneralAccountId::new();
        let detail = DetailAccountId::new();
        let pairs = [(detail, general)];

        let mut zero = line(detail, general, MovementType::Debit, "0.00");
        zero.amount = Money::ZERO;
        let lines = vec![
            zero,
            line(detail, general, MovementType::Credit, "10.00"),
        ];

        let err = validate_batch(&lines, lookup_for(&pairs), |g| g == general).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
    }
}
