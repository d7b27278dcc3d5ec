use std::cmp::Ordering;
use std::collections::BTreeMap;

use jba_events::{DistributionEvent, PaymentEvent, ProjectId, SplitShare};
use jba_numeric::{Amount, Percentage, SignedAmount};

use crate::{Anomaly, Discrepancy, FeeAudit, PayoutAudit, ReconcileConfig, ReconcileError};

/// Outcome of recomputing one distribution's fee.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeeCheck {
    pub project_id: ProjectId,
    pub tx_hash: String,
    pub fee_base: Amount,
    pub expected_fee: Amount,
    pub recorded_fee: Amount,
    /// `recorded_fee - expected_fee`.
    pub difference: SignedAmount,
    /// `difference` is strictly greater than the tolerance.
    pub exceeds_tolerance: bool,
}

/// Stateless reconciliation over an immutable config.
#[derive(Clone, Debug)]
pub struct ReconcileEngine {
    config: ReconcileConfig,
}

impl ReconcileEngine {
    pub fn new(config: ReconcileConfig) -> Result<Self, ReconcileError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Split vs. payment
    // -----------------------------------------------------------------------

    /// Expected amount per split recipient project.
    ///
    /// External-wallet splits (project 0) are skipped. When a project appears
    /// in more than one split of the same event the last entry wins.
    pub fn expected_amounts(
        &self,
        event: &DistributionEvent,
    ) -> Result<BTreeMap<ProjectId, Amount>, ReconcileError> {
        let total = event
            .distributed_amount
            .as_ref()
            .ok_or_else(|| ReconcileError::MissingField {
                tx_hash: event.tx_hash.clone(),
                field: "distributedAmount",
            })?;

        let mut expected = BTreeMap::new();
        for (index, split) in event.splits.iter().enumerate() {
            if split.is_external_wallet() {
                continue;
            }
            let percent = match &split.share {
                SplitShare::Percent(p) => *p,
                SplitShare::Amount(_) => {
                    return Err(ReconcileError::UnexpectedSplitShare {
                        tx_hash: event.tx_hash.clone(),
                        index,
                        expected: "a percent",
                    })
                }
            };
            let amount = percent
                .of(total, self.config.splits_total_percent)
                .ok_or(ReconcileError::ZeroDenominator {
                    name: "splits_total_percent",
                })?;
            expected.insert(split.split_project_id, amount);
        }
        Ok(expected)
    }

    /// Compare one distribution against the payments observed in its tx.
    ///
    /// Underpayments go into `audit.ledger`. Overpayments and payments to
    /// projects without an expected amount become anomalies. Payments to the
    /// protocol project are fees and are ignored.
    pub fn reconcile_payouts(
        &self,
        event: &DistributionEvent,
        payments: &[PaymentEvent],
        audit: &mut PayoutAudit,
    ) -> Result<(), ReconcileError> {
        let expected = self.expected_amounts(event)?;
        audit.distributions_checked += 1;

        for payment in payments {
            if payment.project_id == self.config.protocol_project_id {
                continue;
            }
            audit.payments_checked += 1;

            let Some(expected_amount) = expected.get(&payment.project_id) else {
                audit.anomalies.push(Anomaly::UnexpectedRecipient {
                    project_id: payment.project_id,
                    tx_hash: event.tx_hash.clone(),
                    received: payment.amount.clone(),
                });
                continue;
            };

            match expected_amount.cmp(&payment.amount) {
                Ordering::Greater => audit.ledger.record(
                    payment.project_id,
                    Discrepancy {
                        difference: expected_amount.abs_diff(&payment.amount),
                        expected: expected_amount.clone(),
                        received: payment.amount.clone(),
                        tx_hash: event.tx_hash.clone(),
                    },
                ),
                Ordering::Less => audit.anomalies.push(Anomaly::Overpayment {
                    project_id: payment.project_id,
                    tx_hash: event.tx_hash.clone(),
                    expected: expected_amount.clone(),
                    received: payment.amount.clone(),
                    excess: payment.amount.abs_diff(expected_amount),
                }),
                Ordering::Equal => {}
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Fees
    // -----------------------------------------------------------------------

    /// `beneficiaryDistributionAmount` plus every external-wallet split amount.
    pub fn fee_base(&self, event: &DistributionEvent) -> Result<Amount, ReconcileError> {
        let mut base = event
            .beneficiary_distribution_amount
            .clone()
            .ok_or_else(|| ReconcileError::MissingField {
                tx_hash: event.tx_hash.clone(),
                field: "beneficiaryDistributionAmount",
            })?;

        for (index, split) in event.splits.iter().enumerate() {
            if !split.is_external_wallet() {
                continue;
            }
            match &split.share {
                SplitShare::Amount(a) => base += a,
                SplitShare::Percent(_) => {
                    return Err(ReconcileError::UnexpectedSplitShare {
                        tx_hash: event.tx_hash.clone(),
                        index,
                        expected: "an amount",
                    })
                }
            }
        }
        Ok(base)
    }

    /// Recompute one distribution's fee and compare it to the recorded fee.
    pub fn check_fee(&self, event: &DistributionEvent) -> Result<FeeCheck, ReconcileError> {
        let missing = |field| ReconcileError::MissingField {
            tx_hash: event.tx_hash.clone(),
            field,
        };
        let project_id = event.project_id.ok_or_else(|| missing("projectId"))?;
        let recorded_fee = event.fee.clone().ok_or_else(|| missing("fee"))?;

        let fee_base = self.fee_base(event)?;
        let expected_fee = Percentage::new(self.config.fee_rate)
            .of(&fee_base, self.config.fee_denominator)
            .ok_or(ReconcileError::ZeroDenominator {
                name: "fee_denominator",
            })?;

        let difference = recorded_fee.signed_sub(&expected_fee);
        let exceeds_tolerance = difference.exceeds(&self.config.fee_tolerance);

        Ok(FeeCheck {
            project_id,
            tx_hash: event.tx_hash.clone(),
            fee_base,
            expected_fee,
            recorded_fee,
            difference,
            exceeds_tolerance,
        })
    }

    /// Check one distribution's fee, recording it when over tolerance.
    pub fn reconcile_fee(
        &self,
        event: &DistributionEvent,
        audit: &mut FeeAudit,
    ) -> Result<FeeCheck, ReconcileError> {
        let check = self.check_fee(event)?;
        audit.distributions_checked += 1;
        if check.exceeds_tolerance {
            // Exceeding a non-negative tolerance implies a non-negative difference.
            if let Some(excess) = check.difference.to_amount() {
                audit.ledger.record(check.project_id, &excess);
            }
        }
        Ok(check)
    }

    /// Check every distribution's fee. Stops at the first error.
    pub fn reconcile_fees(&self, events: &[DistributionEvent]) -> Result<FeeAudit, ReconcileError> {
        let mut audit = FeeAudit::new();
        for event in events {
            self.reconcile_fee(event, &mut audit)?;
        }
        Ok(audit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jba_events::SplitEntry;

    fn engine() -> ReconcileEngine {
        ReconcileEngine::new(ReconcileConfig::default()).unwrap()
    }

    #[test]
    fn duplicate_split_target_last_write_wins() {
        let ev = DistributionEvent::payout(
            "0x1",
            Amount::from_wei(1_000),
            vec![
                SplitEntry::percent(5, 100_000_000),
                SplitEntry::percent(5, 300_000_000),
            ],
        );
        let expected = engine().expected_amounts(&ev).unwrap();
        assert_eq!(expected.get(&5), Some(&Amount::from_wei(300)));
        assert_eq!(expected.len(), 1);
    }

    #[test]
    fn payments_to_protocol_project_are_ignored() {
        let ev = DistributionEvent::payout("0x1", Amount::from_wei(1_000), vec![]);
        let mut audit = PayoutAudit::new();
        engine()
            .reconcile_payouts(&ev, &[PaymentEvent::new(1, Amount::from_wei(25))], &mut audit)
            .unwrap();
        assert!(audit.ledger.is_empty());
        assert!(audit.anomalies.is_empty());
        assert_eq!(audit.payments_checked, 0);
        assert_eq!(audit.distributions_checked, 1);
    }

    #[test]
    fn payout_event_without_total_is_an_error() {
        let ev = DistributionEvent::with_fee("0x1", 3, Amount::zero(), Amount::zero(), vec![]);
        assert_eq!(
            engine().expected_amounts(&ev),
            Err(ReconcileError::MissingField {
                tx_hash: "0x1".to_string(),
                field: "distributedAmount"
            })
        );
    }

    #[test]
    fn fee_pipeline_rejects_percent_external_split() {
        let ev = DistributionEvent::with_fee(
            "0x1",
            3,
            Amount::zero(),
            Amount::zero(),
            vec![SplitEntry::percent(0, 10)],
        );
        assert!(matches!(
            engine().fee_base(&ev),
            Err(ReconcileError::UnexpectedSplitShare { index: 0, .. })
        ));
    }

    #[test]
    fn fee_base_does_not_mutate_event() {
        let ev = DistributionEvent::with_fee(
            "0x1",
            3,
            Amount::zero(),
            Amount::from_wei(10),
            vec![SplitEntry::amount(0, Amount::from_wei(5))],
        );
        assert_eq!(engine().fee_base(&ev).unwrap(), Amount::from_wei(15));
        assert_eq!(ev.beneficiary_distribution_amount, Some(Amount::from_wei(10)));
    }

    #[test]
    fn recorded_shortfall_is_the_full_difference() {
        // expected 25_000, recorded 25_007 -> 7 recorded, not 7 - tolerance.
        let ev = DistributionEvent::with_fee(
            "0x1",
            3,
            Amount::from_wei(25_007),
            Amount::from_wei(1_000_000),
            vec![],
        );
        let mut audit = FeeAudit::new();
        let check = engine().reconcile_fee(&ev, &mut audit).unwrap();
        assert!(check.exceeds_tolerance);
        assert_eq!(check.difference.to_amount(), Some(Amount::from_wei(7)));
        assert_eq!(audit.ledger.get(3).unwrap().total, Amount::from_wei(7));
    }

    #[test]
    fn under_recorded_fee_is_never_flagged() {
        // expected 25_000, recorded 24_000 -> diff -1000.
        let ev = DistributionEvent::with_fee(
            "0x1",
            3,
            Amount::from_wei(24_000),
            Amount::from_wei(1_000_000),
            vec![],
        );
        let mut audit = FeeAudit::new();
        let check = engine().reconcile_fee(&ev, &mut audit).unwrap();
        assert_eq!(check.difference.to_string(), "-1000");
        assert!(!check.exceeds_tolerance);
        assert!(audit.ledger.is_empty());
    }
}
