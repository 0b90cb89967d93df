//! Profile roles and ledger entry kinds.

use serde::{Deserialize, Serialize};

/// Role attached to a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Submits songs, pays fees, receives refunds.
    Artist,
    /// Owns playlists, reviews submissions, earns fees.
    Curator,
    /// Operates the marketplace.
    Admin,
}

impl Role {
    /// Database representation of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Artist => "artist",
            Self::Curator => "curator",
            Self::Admin => "admin",
        }
    }

    /// Parses a stored role string. Returns `None` on unknown input.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "artist" => Some(Self::Artist),
            "curator" => Some(Self::Curator),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// Kind of an immutable ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerKind {
    /// Artist paid a submission fee.
    Payment,
    /// Fee returned to the artist after a decline/reject.
    Refund,
    /// Fee transferred to the curator after an accept.
    Earning,
    /// Balance paid out to a user.
    Withdrawal,
    /// Funds added to a balance from outside.
    Deposit,
}

impl LedgerKind {
    /// Database representation of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Refund => "refund",
            Self::Earning => "earning",
            Self::Withdrawal => "withdrawal",
            Self::Deposit => "deposit",
        }
    }

    /// Parses a stored kind string. Returns `None` on unknown input.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "payment" => Some(Self::Payment),
            "refund" => Some(Self::Refund),
            "earning" => Some(Self::Earning),
            "withdrawal" => Some(Self::Withdrawal),
            "deposit" => Some(Self::Deposit),
            _ => None,
        }
    }
}
