//! Classification lattice.
//!
//! A domain, mail server or address is classified as one of a small set of
//! values. Evidence from several sources is folded with one of two merge
//! operators:
//!
//! - [`Classification::combine`] treats every source as authoritative. Any
//!   disagreement yields [`Classification::Mixed`].
//! - [`Classification::any_disposable`] is used when guessing. A single
//!   disposable signal outranks conflicting non-disposable evidence.
//!
//! [`Classification::Unknown`] is the identity element of both operators.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// What a domain (or the infrastructure behind it) is believed to be.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Classification {
    /// No evidence either way.
    #[default]
    Unknown,
    /// Throwaway / temporary mail provider.
    Disposable,
    /// Ordinary mail provider.
    Regular,
    /// Forwarding or alias provider.
    Alias,
    /// Mail cannot be delivered: no resolvable mail server.
    Dead,
    /// Conflicting evidence was merged.
    Mixed,
}

impl Classification {
    /// Folds two authoritative classifications into one.
    ///
    /// `Unknown` yields the other operand, equal values are kept, anything
    /// else is `Mixed`.
    pub fn combine(self, other: Classification) -> Classification {
        match (self, other) {
            (x, Classification::Unknown) => x,
            (Classification::Unknown, y) => y,
            (x, y) if x == y => x,
            _ => Classification::Mixed,
        }
    }

    /// Like [`combine`](Self::combine), but a disagreement involving
    /// `Disposable` resolves to `Disposable`.
    ///
    /// Only used to guess the classification of a not yet classified domain
    /// from the servers and addresses it shares with known domains.
    pub fn any_disposable(self, other: Classification) -> Classification {
        match (self, other) {
            (x, Classification::Unknown) => x,
            (Classification::Unknown, y) => y,
            (x, y) if x == y => x,
            (Classification::Disposable, _) | (_, Classification::Disposable) => {
                Classification::Disposable
            }
            _ => Classification::Mixed,
        }
    }

    pub fn is_unknown(self) -> bool {
        self == Classification::Unknown
    }
}

/// Why a domain got its classification.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Heuristic {
    /// No inference took place (loaded classification, or no evidence).
    #[default]
    None,
    /// Inferred from a mail server shared with classified domains.
    Mx,
    /// Inferred from an address shared with classified mail servers.
    Ip,
    /// No MX record and the domain itself does not resolve.
    NoFallbackMx,
    /// MX records exist but none of their targets resolve.
    NoResolvableMx,
}
