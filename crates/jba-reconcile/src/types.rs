use std::collections::BTreeMap;
use std::fmt;

use jba_events::ProjectId;
use jba_numeric::Amount;

/// One underpayment observed in one transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Discrepancy {
    /// `expected - received`; always positive for recorded discrepancies.
    pub difference: Amount,
    pub expected: Amount,
    pub received: Amount,
    pub tx_hash: String,
}

/// All underpayments of a single project plus their running total.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectUnderpayments {
    pub project_id: ProjectId,
    pub discrepancies: Vec<Discrepancy>,
    pub total: Amount,
}

/// Underpayments keyed by project, iterated in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnderpaymentLedger {
    order: Vec<ProjectId>,
    projects: BTreeMap<ProjectId, ProjectUnderpayments>,
}

impl UnderpaymentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a discrepancy and bump the project's running total.
    pub fn record(&mut self, project_id: ProjectId, discrepancy: Discrepancy) {
        let entry = self.projects.entry(project_id).or_insert_with(|| {
            self.order.push(project_id);
            ProjectUnderpayments {
                project_id,
                discrepancies: Vec::new(),
                total: Amount::zero(),
            }
        });
        entry.total += &discrepancy.difference;
        entry.discrepancies.push(discrepancy);
    }

    pub fn get(&self, project_id: ProjectId) -> Option<&ProjectUnderpayments> {
        self.projects.get(&project_id)
    }

    /// Projects in the order their first discrepancy was recorded.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectUnderpayments> {
        self.order.iter().filter_map(|id| self.projects.get(id))
    }

    pub fn project_ids(&self) -> &[ProjectId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Sum of every project's total.
    pub fn grand_total(&self) -> Amount {
        self.projects
            .values()
            .fold(Amount::zero(), |acc, p| acc + p.total.clone())
    }
}

/// Non-fatal observations during payout reconciliation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Anomaly {
    /// A payment went to a project with no expected split amount.
    UnexpectedRecipient {
        project_id: ProjectId,
        tx_hash: String,
        received: Amount,
    },
    /// A project received more than its split entitles it to.
    Overpayment {
        project_id: ProjectId,
        tx_hash: String,
        expected: Amount,
        received: Amount,
        excess: Amount,
    },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::UnexpectedRecipient {
                project_id,
                tx_hash,
                received,
            } => write!(
                f,
                "project {project_id} not found in expected amounts (received {} in tx {tx_hash})",
                received.to_eth_string()
            ),
            Anomaly::Overpayment {
                project_id,
                tx_hash,
                excess,
                ..
            } => write!(
                f,
                "project {project_id} was overpaid by {} in tx {tx_hash}",
                excess.to_eth_string()
            ),
        }
    }
}

/// Accumulated result of payout reconciliation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PayoutAudit {
    pub ledger: UnderpaymentLedger,
    pub anomalies: Vec<Anomaly>,
    pub distributions_checked: usize,
    pub payments_checked: usize,
}

impl PayoutAudit {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Per-project fee shortfall: summed excess and offending tx count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeeShortfall {
    pub project_id: ProjectId,
    pub total: Amount,
    pub count: u64,
}

/// Fee shortfalls keyed by project, iterated in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeeShortfallLedger {
    order: Vec<ProjectId>,
    projects: BTreeMap<ProjectId, FeeShortfall>,
}

impl FeeShortfallLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, project_id: ProjectId, shortfall: &Amount) {
        let entry = self.projects.entry(project_id).or_insert_with(|| {
            self.order.push(project_id);
            FeeShortfall {
                project_id,
                total: Amount::zero(),
                count: 0,
            }
        });
        entry.total += shortfall;
        entry.count += 1;
    }

    pub fn get(&self, project_id: ProjectId) -> Option<&FeeShortfall> {
        self.projects.get(&project_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeeShortfall> {
        self.order.iter().filter_map(|id| self.projects.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Accumulated result of fee reconciliation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeeAudit {
    pub ledger: FeeShortfallLedger,
    pub distributions_checked: usize,
}

impl FeeAudit {
    pub fn new() -> Self {
        Self::default()
    }
}
