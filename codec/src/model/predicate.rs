//! Claim predicates and claimants of claimable balances.

use serde::{Deserialize, Serialize};

use super::account::{AccountId, Hash};

/// A condition tree gating when a claimable balance may be claimed.
///
/// Each node owns its children outright; the tree cannot share subtrees or
/// contain cycles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimPredicate {
    /// Always claimable.
    Unconditional,
    /// All children must hold.
    And(Vec<ClaimPredicate>),
    /// Any child must hold.
    Or(Vec<ClaimPredicate>),
    /// The (optional) child must not hold.
    Not(Option<Box<ClaimPredicate>>),
    /// Claimable before this unix time (seconds).
    BeforeAbsoluteTime(i64),
    /// Claimable within this many seconds of the balance's creation.
    BeforeRelativeTime(i64),
}

impl ClaimPredicate {
    /// Symbolic discriminator name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unconditional => "CLAIM_PREDICATE_UNCONDITIONAL",
            Self::And(_) => "CLAIM_PREDICATE_AND",
            Self::Or(_) => "CLAIM_PREDICATE_OR",
            Self::Not(_) => "CLAIM_PREDICATE_NOT",
            Self::BeforeAbsoluteTime(_) => "CLAIM_PREDICATE_BEFORE_ABSOLUTE_TIME",
            Self::BeforeRelativeTime(_) => "CLAIM_PREDICATE_BEFORE_RELATIVE_TIME",
        }
    }

    /// Depth of the tree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Self::And(children) | Self::Or(children) => {
                1 + children.iter().map(Self::depth).max().unwrap_or(0)
            }
            Self::Not(Some(child)) => 1 + child.depth(),
            _ => 1,
        }
    }
}

/// Who may claim a balance, and when (`CLAIMANT_TYPE_V0`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claimant {
    /// Account allowed to claim.
    pub destination: AccountId,
    /// Condition under which it may.
    pub predicate: ClaimPredicate,
}

/// Id of a claimable balance (`CLAIMABLE_BALANCE_ID_TYPE_V0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimableBalanceId {
    /// sha256 of the creating operation id.
    V0(Hash),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
