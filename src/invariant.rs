//! Verification of the cover tree invariants
//!
//! These checks are independent of the insertion engine. They walk the tree
//! breadth-first and recompute every distance, so they are meant for tests
//! and debugging rather than for hot paths.

use itertools::Itertools;
#[cfg(any(test, feature = "arbitrary"))]
use quickcheck::TestResult;

use crate::config::CoverTreeConfig;
use crate::cover_tree::CoverTree;
use crate::error::Result;
use crate::event::{Invariant, TreeEvent, Violation};
use crate::node::Node;
use crate::traits::{Metric, Observer};


/// Collect the violations of one invariant among the children of `parent`
fn inspect<P, M, F>(invariant: Invariant, parent: &Node<P>, metric: &M, config: &CoverTreeConfig, report: &mut F)
    where M: Metric<P>,
          F: FnMut(Violation),
{
    let level = parent.level();
    match invariant {
        Invariant::Level =>
            for child in parent.children() {
                if child.level() != level - 1 {
                    report(Violation::Level { parent_level: level, child_level: child.level() });
                }
            },
        Invariant::Covering => {
            let bound = config.covering_distance(level);
            for child in parent.children() {
                let distance = metric.distance(parent.point(), child.point());
                if distance > bound {
                    report(Violation::Covering { level: level, distance: distance, bound: bound });
                }
            }
        },
        Invariant::Separating => {
            let bound = config.separating_distance(level);
            for (a, b) in parent.children().iter().tuple_combinations() {
                let distance = metric.distance(a.point(), b.point());
                if distance <= bound {
                    report(Violation::Separating { level: level, distance: distance, bound: bound });
                }
            }
        },
    }
}

impl<P, M, O> CoverTree<P, M, O>
    where M: Metric<P>,
          O: Observer<P>,
{
    fn find_violation(&self, invariant: Invariant) -> Result<Option<Violation>> {
        let root = self.nonempty_root()?;
        for parent in root.iter() {
            let mut found = None;
            inspect(invariant, parent, self.metric(), self.config(), &mut |violation| {
                if found.is_none() {
                    found = Some(violation);
                }
            });
            if let Some(violation) = found {
                self.observer().observe(&TreeEvent::InvariantViolated(violation));
                return Ok(Some(violation));
            }
        }
        Ok(None)
    }

    /// Check that every child is exactly one level below its parent
    pub fn check_level_invariant(&self) -> Result<bool> {
        Ok(self.find_violation(Invariant::Level)?.is_none())
    }

    /// Check that every child lies within the covering distance of its parent
    pub fn check_covering_invariant(&self) -> Result<bool> {
        Ok(self.find_violation(Invariant::Covering)?.is_none())
    }

    /// Check that siblings lie farther apart than the separating distance of
    /// their parent
    ///
    /// The inequality is strict: siblings exactly at the separating distance
    /// violate the invariant.
    pub fn check_separating_invariant(&self) -> Result<bool> {
        Ok(self.find_violation(Invariant::Separating)?.is_none())
    }

    /// Check all three invariants
    pub fn is_valid(&self) -> Result<bool> {
        Ok(self.check_level_invariant()?
           && self.check_covering_invariant()?
           && self.check_separating_invariant()?)
    }

    /// Every violation of any invariant
    ///
    /// Unlike the `check_*` family this does not stop at the first violation.
    /// Each violation is also reported to the observer.
    pub fn violations(&self) -> Result<Vec<Violation>> {
        let root = self.nonempty_root()?;
        let mut violations = vec![];
        for parent in root.iter() {
            for &invariant in &[Invariant::Level, Invariant::Covering, Invariant::Separating] {
                inspect(invariant, parent, self.metric(), self.config(), &mut |violation| {
                    violations.push(violation)
                });
            }
        }
        for violation in &violations {
            self.observer().observe(&TreeEvent::InvariantViolated(*violation));
        }
        Ok(violations)
    }
}


/// Validity is preserved by every single insertion
///
/// Inserts `points` one by one into an empty tree and checks all invariants
/// after each step.
#[cfg(any(test, feature = "arbitrary"))]
pub fn prop_valid_after_each_insert<P, M>(points: Vec<P>, metric: M, config: CoverTreeConfig) -> TestResult
    where M: Metric<P>,
{
    let mut tree = CoverTree::with_config(metric, config).with_observer(());
    for point in points {
        tree.insert(point);
        match tree.is_valid() {
            Ok(true) => (),
            _ => return TestResult::failed(),
        }
    }
    TestResult::passed()
}


/// Every insertion is accounted for
///
/// After inserting `points`, duplicates included, both the point listing and
/// the level view of the tree hold exactly one entry per insertion.
#[cfg(any(test, feature = "arbitrary"))]
pub fn prop_len_matches_insertions<P, M>(points: Vec<P>, metric: M) -> TestResult
    where P: Clone,
          M: Metric<P>,
{
    if points.is_empty() {
        return TestResult::discard();
    }
    let n = points.len();
    let tree = CoverTree::from_points(points, metric);
    let listed = tree.points().map(|points| points.len());
    let by_level = tree.nodes_by_level()
        .map(|levels| levels.values().map(Vec::len).sum::<usize>());
    TestResult::from_bool(tree.len() == n && listed.ok() == Some(n) && by_level.ok() == Some(n))
}
