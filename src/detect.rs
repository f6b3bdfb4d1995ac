//! Staleness detection
//!
//! Pairs each channel package with the first same-named local package and
//! classifies the pair. Only pairings that need action are yielded; packages
//! whose trees compare equal produce nothing.

use serde::Serialize;

use crate::compare::TreeComparator;
use crate::registry::Package;

/// Why a pairing needs action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Staleness {
    /// No same-named local package exists
    MissingLocally,
    /// A local package exists but its tree differs from the channel tree
    Outdated,
}

/// A channel package matched (or not) with a same-named local package.
///
/// Transient: valid for one detection pass, recomputed from scratch on the
/// next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackagePairing {
    pub channel: Package,
    pub local: Option<Package>,
    pub staleness: Staleness,
}

/// Yield a pairing for every channel package that is missing locally or out
/// of sync, in channel-list order.
///
/// Lazy and single-pass. Name equality is the sole pairing key
/// (case-sensitive, no normalization); when several local packages share a
/// name, the first in input order wins. The data model carries no recency
/// signal to break the tie with.
pub fn detect_outdated<'a, C: TreeComparator + ?Sized>(
    channel: &'a [Package],
    local: &'a [Package],
    comparator: &'a C,
) -> impl Iterator<Item = PackagePairing> + 'a {
    channel.iter().filter_map(move |c| {
        let paired = local.iter().find(|l| l.name == c.name);
        match paired {
            None => Some(PackagePairing {
                channel: c.clone(),
                local: None,
                staleness: Staleness::MissingLocally,
            }),
            Some(l) if !comparator.trees_equal(&c.root, &l.root) => Some(PackagePairing {
                channel: c.clone(),
                local: Some(l.clone()),
                staleness: Staleness::Outdated,
            }),
            Some(_) => None,
        }
    })
}
