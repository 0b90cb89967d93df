//! Core marketplace domain types.
//!
//! Closed enums for every discriminator that crosses a boundary (roles,
//! submission statuses, review decisions, ledger kinds, analytics events)
//! plus the pure settlement plan that decides how money moves. Nothing in
//! this module touches the network or the database.

pub mod accounts;
pub mod analytics;
pub mod link;
pub mod settlement;

pub use accounts::{LedgerKind, Role};
pub use analytics::AnalyticsEvent;
pub use link::{new_slug, normalize_url};
pub use settlement::{
    Beneficiary, Decision, LedgerCredit, SettlementOutcome, SettlementPlan, SubmissionStatus,
};
