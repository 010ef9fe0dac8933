//! Common abstractions for cover trees

use crate::event::TreeEvent;


/// A distance function between points
///
/// Implementations are expected to satisfy the metric axioms, i.e. distances
/// are non-negative, symmetric and obey the triangle inequality. The tree
/// trusts its metric and does not check any of this. Feeding it something
/// that is not a metric may yield trees that violate their invariants.
///
/// The metric is invoked for every comparison during insertion and
/// verification, so its cost dominates the cost of the tree.
///
/// # Type parameters
///
/// - `P` is the type of point the metric measures.
pub trait Metric<P> {

    /// The distance between two points
    fn distance(&self, a: &P, b: &P) -> f64;
}

impl<P, F> Metric<P> for F
    where F: Fn(&P, &P) -> f64
{
    fn distance(&self, a: &P, b: &P) -> f64 {
        self(a, b)
    }
}


/// A receiver of structural events
///
/// The tree reports every structural decision it takes to its observer. This
/// keeps the tree itself free of output, leaving it to the observer whether
/// events are logged, counted or dropped.
///
/// Closures taking a `&TreeEvent` are observers, and so is `()`, which
/// ignores everything.
pub trait Observer<P> {

    /// Handle a single event
    fn observe(&self, event: &TreeEvent<'_, P>);
}

impl<P, F> Observer<P> for F
    where F: Fn(&TreeEvent<'_, P>)
{
    fn observe(&self, event: &TreeEvent<'_, P>) {
        self(event)
    }
}

impl<P> Observer<P> for () {
    fn observe(&self, _: &TreeEvent<'_, P>) {}
}
