//! Structural events and their default logging

use std::fmt;

use crate::traits::Observer;


/// The three structural invariants of a cover tree
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum Invariant {
    /// A child is exactly one level below its parent
    Level,

    /// A child lies within the covering distance of its parent
    Covering,

    /// Siblings are farther apart than the separating distance of their parent
    Separating,
}

impl fmt::Display for Invariant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            Invariant::Level => "level",
            Invariant::Covering => "covering",
            Invariant::Separating => "separating",
        };
        f.write_str(name)
    }
}


/// A single violation of an invariant
///
/// Every variant names the level of the parent node whose edge or children
/// are at fault.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Violation {
    /// A child is not exactly one level below its parent
    Level {
        /// Level of the parent
        parent_level: i64,
        /// Level the child actually sits on
        child_level: i64,
    },

    /// A child lies beyond the covering distance of its parent
    Covering {
        /// Level of the parent
        level: i64,
        /// Distance between parent and child
        distance: f64,
        /// Covering distance of the parent
        bound: f64,
    },

    /// Two siblings lie within the separating distance of their parent
    Separating {
        /// Level of the parent
        level: i64,
        /// Distance between the siblings
        distance: f64,
        /// Separating distance of the parent
        bound: f64,
    },
}

impl Violation {
    /// The violated invariant
    pub fn invariant(&self) -> Invariant {
        match *self {
            Violation::Level { .. } => Invariant::Level,
            Violation::Covering { .. } => Invariant::Covering,
            Violation::Separating { .. } => Invariant::Separating,
        }
    }

    /// Level of the parent node at fault
    pub fn level(&self) -> i64 {
        match *self {
            Violation::Level { parent_level, .. } => parent_level,
            Violation::Covering { level, .. } | Violation::Separating { level, .. } => level,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Violation::Level { parent_level, child_level } => write!(
                f, "level invariant violated below level {}: child at {}, expected {}",
                parent_level, child_level, parent_level - 1
            ),
            Violation::Covering { level, distance, bound } => write!(
                f, "covering invariant violated below level {}: {} > {}",
                level, distance, bound
            ),
            Violation::Separating { level, distance, bound } => write!(
                f, "separating invariant violated below level {}: {} <= {}",
                level, distance, bound
            ),
        }
    }
}


/// A structural decision taken by the tree
///
/// Levels always refer to the level of the node after the event.
#[derive(PartialEq, Debug)]
pub enum TreeEvent<'a, P> {
    /// The root had no children and its level was raised
    LevelRaised {
        /// New root level
        level: i64,
    },

    /// A leaf was detached from the tree and became the root
    LeafPromoted {
        /// The point of the former leaf
        point: &'a P,
        /// New root level
        level: i64,
    },

    /// A freshly inserted point became the root
    RootReplaced {
        /// The inserted point
        point: &'a P,
        /// New root level
        level: i64,
    },

    /// A freshly inserted point was attached as a new leaf
    LeafAttached {
        /// The inserted point
        point: &'a P,
        /// Level of the new leaf
        level: i64,
    },

    /// The tree was torn down and rebuilt around a new root
    Rebuilt {
        /// The point of the new root
        point: &'a P,
        /// Level of the new root
        level: i64,
    },

    /// A verification pass found a broken invariant
    InvariantViolated(Violation),
}


/// Observer that forwards events to `tracing`
///
/// Restructuring is reported at `debug`, leaf attachment at `trace` and
/// invariant violations at `warn`. Points are not part of the records, so
/// this works for any point type.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl<P> Observer<P> for TracingObserver {
    fn observe(&self, event: &TreeEvent<'_, P>) {
        match *event {
            TreeEvent::LevelRaised { level } =>
                tracing::debug!(level, "raised level of single-node root"),
            TreeEvent::LeafPromoted { level, .. } =>
                tracing::debug!(level, "promoted leaf to root"),
            TreeEvent::RootReplaced { level, .. } =>
                tracing::debug!(level, "inserted point became the root"),
            TreeEvent::LeafAttached { level, .. } =>
                tracing::trace!(level, "attached leaf"),
            TreeEvent::Rebuilt { level, .. } =>
                tracing::debug!(level, "rebuilt tree around a new root"),
            TreeEvent::InvariantViolated(ref violation) =>
                tracing::warn!(
                    invariant = %violation.invariant(),
                    level = violation.level(),
                    "{}", violation
                ),
        }
    }
}


#[cfg(test)]
mod test {
    use super::{Invariant, Violation};

    #[test]
    fn violation_display() {
        let violation = Violation::Separating { level: 2, distance: 2.0, bound: 2.0 };
        assert_eq!(
            violation.to_string(),
            "separating invariant violated below level 2: 2 <= 2"
        );
        assert_eq!(violation.invariant(), Invariant::Separating);
    }

    #[test]
    fn level_violation_keeps_levels() {
        let violation = Violation::Level { parent_level: 2, child_level: 0 };
        assert_eq!(violation.invariant(), Invariant::Level);
        assert_eq!(violation.level(), 2);
        assert_eq!(
            violation.to_string(),
            "level invariant violated below level 2: child at 0, expected 1"
        );
    }

    #[test]
    fn invariant_display() {
        assert_eq!(Invariant::Covering.to_string(), "covering");
    }
}
