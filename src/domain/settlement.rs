//! Submission statuses, review decisions, and the settlement plan.
//!
//! Settlement is the one place money moves: a decline/reject refunds the
//! artist, an accept pays the curator. [`SettlementPlan`] captures that
//! decision as pure data so the store can execute it inside a single
//! transaction and tests can verify it without a database.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::accounts::LedgerKind;

/// Lifecycle status of a submission. The transition out of `Pending`
/// is one-way and happens exactly once, inside settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    /// Awaiting curator review.
    Pending,
    /// Curator accepted the song; fee transferred to the curator.
    Accepted,
    /// Curator declined; fee refunded to the artist.
    Declined,
    /// Curator rejected (e.g. guideline violation); fee refunded.
    Rejected,
}

impl SubmissionStatus {
    /// Database representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a stored status string. Returns `None` on unknown input.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "declined" => Some(Self::Declined),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Whether this status is terminal (settlement already happened).
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// A curator's review decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Accept the song onto the playlist.
    Accept,
    /// Decline the song.
    Decline,
    /// Reject the song outright.
    Reject,
}

impl Decision {
    /// Parses the decision vocabulary used by clients. `"approved"` is
    /// an accepted alias for `"accepted"`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "accepted" | "approved" | "accept" => Some(Self::Accept),
            "declined" | "decline" => Some(Self::Decline),
            "rejected" | "reject" => Some(Self::Reject),
            _ => None,
        }
    }

    /// Terminal status this decision settles the submission into.
    #[must_use]
    pub const fn final_status(self) -> SubmissionStatus {
        match self {
            Self::Accept => SubmissionStatus::Accepted,
            Self::Decline => SubmissionStatus::Declined,
            Self::Reject => SubmissionStatus::Rejected,
        }
    }
}

/// Which party a settlement credit goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Beneficiary {
    /// The submitting artist (refund path).
    Artist,
    /// The playlist's owning curator (earning path).
    Curator,
}

/// A single balance credit plus its ledger entry, produced by settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerCredit {
    /// Who receives the credit.
    pub beneficiary: Beneficiary,
    /// Ledger kind recorded for the credit.
    pub kind: LedgerKind,
    /// Amount in minor currency units.
    pub amount: i64,
}

/// The full effect of settling one submission: the new status and at
/// most one balance credit. Total funds are conserved — the credit
/// amount always equals what the artist originally paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlementPlan {
    /// Terminal status to write.
    pub new_status: SubmissionStatus,
    /// Balance credit to apply, `None` for zero-fee submissions.
    pub credit: Option<LedgerCredit>,
}

impl SettlementPlan {
    /// Builds the plan for settling a submission.
    ///
    /// Returns `None` when the submission is already terminal: the
    /// guarded transition makes repeat settlement a no-op instead of a
    /// double payment.
    #[must_use]
    pub fn build(current: SubmissionStatus, decision: Decision, amount_paid: i64) -> Option<Self> {
        if current.is_terminal() {
            return None;
        }

        let credit = (amount_paid > 0).then(|| match decision {
            Decision::Accept => LedgerCredit {
                beneficiary: Beneficiary::Curator,
                kind: LedgerKind::Earning,
                amount: amount_paid,
            },
            Decision::Decline | Decision::Reject => LedgerCredit {
                beneficiary: Beneficiary::Artist,
                kind: LedgerKind::Refund,
                amount: amount_paid,
            },
        });

        Some(Self {
            new_status: decision.final_status(),
            credit,
        })
    }
}

/// Structured result of a settlement call. Expected failure modes are
/// values, not faults — the caller always receives a well-formed result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementOutcome {
    /// The submission was settled by this call.
    Settled {
        /// Submission that was settled.
        submission_id: Uuid,
        /// Status it transitioned into.
        new_status: SubmissionStatus,
        /// Credit applied, if the submission carried a positive fee.
        credit: Option<LedgerCredit>,
    },
    /// No submission with the given ID exists; nothing was mutated.
    NotFound {
        /// The unknown submission ID.
        submission_id: Uuid,
    },
    /// The submission was already terminal; nothing was mutated.
    AlreadySettled {
        /// Submission that was already settled.
        submission_id: Uuid,
        /// Its existing terminal status.
        status: SubmissionStatus,
    },
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn decline_refunds_the_artist() {
        let Some(plan) = SettlementPlan::build(SubmissionStatus::Pending, Decision::Decline, 3000)
        else {
            panic!("pending submission must settle");
        };
        assert_eq!(plan.new_status, SubmissionStatus::Declined);
        assert_eq!(
            plan.credit,
            Some(LedgerCredit {
                beneficiary: Beneficiary::Artist,
                kind: LedgerKind::Refund,
                amount: 3000,
            })
        );
    }

    #[test]
    fn reject_refunds_like_decline() {
        let Some(plan) = SettlementPlan::build(SubmissionStatus::Pending, Decision::Reject, 500)
        else {
            panic!("pending submission must settle");
        };
        assert_eq!(plan.new_status, SubmissionStatus::Rejected);
        let Some(credit) = plan.credit else {
            panic!("paid submission must produce a credit");
        };
        assert_eq!(credit.beneficiary, Beneficiary::Artist);
        assert_eq!(credit.kind, LedgerKind::Refund);
    }

    #[test]
    fn accept_pays_the_curator() {
        let Some(plan) = SettlementPlan::build(SubmissionStatus::Pending, Decision::Accept, 3000)
        else {
            panic!("pending submission must settle");
        };
        assert_eq!(plan.new_status, SubmissionStatus::Accepted);
        assert_eq!(
            plan.credit,
            Some(LedgerCredit {
                beneficiary: Beneficiary::Curator,
                kind: LedgerKind::Earning,
                amount: 3000,
            })
        );
    }

    #[test]
    fn zero_fee_settles_without_a_credit() {
        let Some(plan) = SettlementPlan::build(SubmissionStatus::Pending, Decision::Accept, 0)
        else {
            panic!("pending submission must settle");
        };
        assert_eq!(plan.new_status, SubmissionStatus::Accepted);
        assert_eq!(plan.credit, None);
    }

    #[test]
    fn terminal_status_blocks_resettlement() {
        for status in [
            SubmissionStatus::Accepted,
            SubmissionStatus::Declined,
            SubmissionStatus::Rejected,
        ] {
            assert_eq!(SettlementPlan::build(status, Decision::Accept, 3000), None);
        }
    }

    #[test]
    fn approved_is_an_accept_alias() {
        assert_eq!(Decision::parse("approved"), Some(Decision::Accept));
        assert_eq!(Decision::parse("accepted"), Some(Decision::Accept));
        assert_eq!(Decision::parse("declined"), Some(Decision::Decline));
        assert_eq!(Decision::parse("maybe"), None);
    }
}
