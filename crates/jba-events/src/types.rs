use jba_numeric::{Amount, Percentage};

/// Numeric project identifier as assigned by the protocol.
pub type ProjectId = u64;

/// Split target meaning "an external wallet, not a tracked project".
pub const EXTERNAL_WALLET_PROJECT_ID: ProjectId = 0;

/// How a split entry expresses its portion of the payout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SplitShare {
    /// Percent numerator over the splits total-percent denominator.
    Percent(Percentage),
    /// Amount already computed downstream by the protocol.
    Amount(Amount),
}

/// One line item of a distribution's split configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitEntry {
    pub split_project_id: ProjectId,
    pub share: SplitShare,
}

impl SplitEntry {
    pub fn percent(project_id: ProjectId, numerator: u64) -> Self {
        Self {
            split_project_id: project_id,
            share: SplitShare::Percent(Percentage::new(numerator)),
        }
    }

    pub fn amount(project_id: ProjectId, amount: Amount) -> Self {
        Self {
            split_project_id: project_id,
            share: SplitShare::Amount(amount),
        }
    }

    pub fn is_external_wallet(&self) -> bool {
        self.split_project_id == EXTERNAL_WALLET_PROJECT_ID
    }
}

/// One payout distribution.
///
/// `tx_hash` is not a unique key: a single transaction may emit several
/// distributions. Pipeline-specific fields are `None` when the pipeline's
/// query did not select them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistributionEvent {
    pub tx_hash: String,
    /// Source project (fee pipeline).
    pub project_id: Option<ProjectId>,
    /// Total distributed (payout pipeline).
    pub distributed_amount: Option<Amount>,
    /// Fee recorded by the protocol (fee pipeline).
    pub fee: Option<Amount>,
    /// Portion paid straight to the beneficiary (fee pipeline).
    pub beneficiary_distribution_amount: Option<Amount>,
    pub splits: Vec<SplitEntry>,
}

impl DistributionEvent {
    /// A payout-pipeline distribution.
    pub fn payout(
        tx_hash: impl Into<String>,
        distributed_amount: Amount,
        splits: Vec<SplitEntry>,
    ) -> Self {
        Self {
            tx_hash: tx_hash.into(),
            project_id: None,
            distributed_amount: Some(distributed_amount),
            fee: None,
            beneficiary_distribution_amount: None,
            splits,
        }
    }

    /// A fee-pipeline distribution.
    pub fn with_fee(
        tx_hash: impl Into<String>,
        project_id: ProjectId,
        fee: Amount,
        beneficiary_distribution_amount: Amount,
        splits: Vec<SplitEntry>,
    ) -> Self {
        Self {
            tx_hash: tx_hash.into(),
            project_id: Some(project_id),
            distributed_amount: None,
            fee: Some(fee),
            beneficiary_distribution_amount: Some(beneficiary_distribution_amount),
            splits,
        }
    }
}

/// Value received by a project, correlated to a distribution by tx hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentEvent {
    pub project_id: ProjectId,
    pub amount: Amount,
}

impl PaymentEvent {
    pub fn new(project_id: ProjectId, amount: Amount) -> Self {
        Self { project_id, amount }
    }
}
