//! The cover tree and its insertion engine.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::io;

use crate::config::CoverTreeConfig;
use crate::error::{CoverTreeError, Result};
use crate::event::{TracingObserver, TreeEvent};
use crate::iter::{Generations, Iter};
use crate::node::Node;
use crate::traits::{Metric, Observer};


/// A cover tree over points in a metric space
///
/// The tree arranges its points on integer levels. With `C` the covering
/// constant of its configuration, every edge and sibling pair satisfies
///
/// - the level invariant: a child is exactly one level below its parent,
/// - the covering invariant: a child lies within `C^l` of its parent at
///   level `l`,
/// - the separating invariant: children of a parent at level `l` are more
///   than `C^(l-1)` apart.
///
/// # Type parameters
///
/// - `P` is the point type.
/// - `M` is the metric measuring distances between points.
/// - `O` receives the structural events of the tree, by default they are
///   forwarded to `tracing`.
#[derive(Clone, Debug)]
pub struct CoverTree<P, M, O = TracingObserver> {
    root: Option<Node<P>>,
    len: usize,
    metric: M,
    config: CoverTreeConfig,
    observer: O,
}

impl<P, M> CoverTree<P, M> {
    /// Construct an empty tree with the default configuration
    pub fn new(metric: M) -> CoverTree<P, M> {
        CoverTree::with_config(metric, CoverTreeConfig::default())
    }

    /// Construct an empty tree with a custom configuration
    pub fn with_config(metric: M, config: CoverTreeConfig) -> CoverTree<P, M> {
        CoverTree {
            root: None,
            len: 0,
            metric: metric,
            config: config,
            observer: TracingObserver,
        }
    }
}

#[cfg(test)]
impl<P, M> CoverTree<P, M, ()> {
    /// A tree around a hand-made root, which may break any invariant
    pub(crate) fn from_root(root: Node<P>, metric: M) -> CoverTree<P, M, ()> {
        CoverTree {
            len: root.iter().count(),
            root: Some(root),
            metric: metric,
            config: CoverTreeConfig::default(),
            observer: (),
        }
    }
}

impl<P, M> CoverTree<P, M>
    where M: Metric<P>,
{
    /// Construct a tree by inserting points one after another
    pub fn from_points<I>(points: I, metric: M) -> CoverTree<P, M>
        where I: IntoIterator<Item = P>,
    {
        let mut tree = CoverTree::new(metric);
        tree.insert_all(points);
        tree
    }
}

impl<P, M, O> CoverTree<P, M, O> {
    /// Replace the observer of structural events
    pub fn with_observer<Q>(self, observer: Q) -> CoverTree<P, M, Q> {
        CoverTree {
            root: self.root,
            len: self.len,
            metric: self.metric,
            config: self.config,
            observer: observer,
        }
    }

    /// The configuration of the tree
    pub fn config(&self) -> &CoverTreeConfig {
        &self.config
    }

    /// The metric of the tree
    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// The observer of the tree
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// The root node, if the tree is not empty
    pub fn root(&self) -> Option<&Node<P>> {
        self.root.as_ref()
    }

    /// Number of points stored, duplicates included
    pub fn len(&self) -> usize {
        self.len
    }

    /// Does the tree store no point at all?
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Level of the root node
    ///
    /// This is zero for an empty tree. Note that this is not the depth of the
    /// tree.
    pub fn level(&self) -> i64 {
        self.root.as_ref().map_or(0, Node::level)
    }

    /// Number of levels occupied by nodes
    pub fn depth(&self) -> usize {
        self.generations().count()
    }

    /// Iterate over all nodes in breadth-first order
    pub fn iter(&self) -> Iter<'_, P> {
        Iter::new(self.root.as_ref())
    }

    /// Iterate over the generations of nodes, from the root downwards
    pub fn generations(&self) -> Generations<'_, P> {
        Generations::new(self.root.as_ref())
    }

    pub(crate) fn nonempty_root(&self) -> Result<&Node<P>> {
        self.root.as_ref().ok_or(CoverTreeError::EmptyTree)
    }

    /// Drop all points and start over from a single root
    pub(crate) fn replace_root(&mut self, point: P, level: i64) {
        self.len = 1;
        self.root = Some(Node::leaf(point, level));
    }
}

impl<P, M, O> CoverTree<P, M, O>
    where M: Metric<P>,
          O: Observer<P>,
{
    /// Insert a point
    ///
    /// The first point becomes the root at level zero. Any later point either
    /// descends into the tree, if the root covers it, or becomes the new root
    /// after the tree has been raised far enough to cover the old root from
    /// there. Points are not deduplicated.
    pub fn insert(&mut self, point: P) {
        self.len += 1;
        match self.root {
            None => self.root = Some(Node::leaf(point, 0)),
            Some(ref mut root) =>
                grow(root, point, &self.metric, &self.config, &self.observer),
        }
    }

    /// Insert points one after another
    pub fn insert_all<I>(&mut self, points: I)
        where I: IntoIterator<Item = P>,
    {
        for point in points {
            self.insert(point);
        }
    }
}

/// Insert a point below an existing root
fn grow<P, M, O>(root: &mut Node<P>, point: P, metric: &M, config: &CoverTreeConfig, observer: &O)
    where M: Metric<P>,
          O: Observer<P>,
{
    let mut distance = metric.distance(root.point(), &point);
    if distance <= config.covering_distance(root.level()) {
        let leaf = root.descend(point, metric, config);
        observer.observe(&TreeEvent::LeafAttached { point: leaf.point(), level: leaf.level() });
        return;
    }

    // Raise the root until the point is within reach of the level above it,
    // i.e. within `C` times the covering distance of the root. A lone root is
    // simply lifted, otherwise a leaf is pulled out of the tree to sit on top
    // of it, since the old root has to keep its level.
    while distance > config.covering_distance(root.level() + 1) {
        match root.find_leaf() {
            None => {
                root.raise();
                observer.observe(&TreeEvent::LevelRaised { level: root.level() });
            },
            Some(path) => {
                let leaf = root.detach(&path);
                root.push_down(leaf.into_point());
                observer.observe(&TreeEvent::LeafPromoted { point: root.point(), level: root.level() });
                distance = metric.distance(root.point(), &point);
            },
        }
    }

    root.push_down(point);
    observer.observe(&TreeEvent::RootReplaced { point: root.point(), level: root.level() });
}

impl<P, M, O> Extend<P> for CoverTree<P, M, O>
    where M: Metric<P>,
          O: Observer<P>,
{
    fn extend<I: IntoIterator<Item = P>>(&mut self, points: I) {
        self.insert_all(points)
    }
}

impl<P, M, O> CoverTree<P, M, O>
    where P: Clone,
{
    /// All points in breadth-first order
    pub fn points(&self) -> Result<Vec<P>> {
        let root = self.nonempty_root()?;
        Ok(root.iter().map(|node| node.point().clone()).collect())
    }

    /// All points grouped by the level of their node
    ///
    /// Every node contributes one entry. The order of points within a level
    /// is unspecified.
    pub fn nodes_by_level(&self) -> Result<BTreeMap<i64, Vec<P>>> {
        let root = self.nonempty_root()?;
        let mut levels = BTreeMap::new();
        for node in root.iter() {
            levels.entry(node.level())
                .or_insert_with(Vec::new)
                .push(node.point().clone());
        }
        Ok(levels)
    }
}

impl<P, M, O> CoverTree<P, M, O>
    where P: Clone + Ord,
{
    /// The level of every distinct point
    ///
    /// If equal points are stored at several levels, the one visited last in
    /// breadth-first order wins. This is a lossy convenience view, use
    /// `nodes_by_level` to see every node.
    pub fn nodes_to_level(&self) -> Result<BTreeMap<P, i64>> {
        let root = self.nonempty_root()?;
        Ok(root.iter()
            .map(|node| (node.point().clone(), node.level()))
            .collect())
    }
}

impl<P, M, O> CoverTree<P, M, O>
    where P: Display,
{
    /// Write a human-readable dump of the tree, one line per level
    ///
    /// Each line holds the level followed by the points on it, as in
    /// `"3: 8 -2"`. This is meant for debugging and is no serialization
    /// format.
    pub fn print<W: io::Write>(&self, mut out: W) -> Result<()> {
        self.nonempty_root()?;
        for generation in self.generations() {
            write!(out, "{}:", generation[0].level())?;
            for node in generation {
                write!(out, " {}", node.point())?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod test {
    use std::cell::RefCell;

    use crate::config::CoverTreeConfig;
    use crate::error::CoverTreeError;
    use crate::event::TreeEvent;
    use crate::metric::AbsoluteDifference;
    use super::CoverTree;

    fn tree() -> CoverTree<i64, AbsoluteDifference, ()> {
        CoverTree::new(AbsoluteDifference).with_observer(())
    }

    fn describe(event: &TreeEvent<'_, i64>) -> (&'static str, i64, Option<i64>) {
        match *event {
            TreeEvent::LevelRaised { level } => ("raised", level, None),
            TreeEvent::LeafPromoted { point, level } => ("promoted", level, Some(*point)),
            TreeEvent::RootReplaced { point, level } => ("replaced", level, Some(*point)),
            TreeEvent::LeafAttached { point, level } => ("attached", level, Some(*point)),
            TreeEvent::Rebuilt { point, level } => ("rebuilt", level, Some(*point)),
            TreeEvent::InvariantViolated(_) => ("violated", 0, None),
        }
    }

    #[test]
    fn empty_tree() {
        let tree = tree();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.level(), 0);
        assert_eq!(tree.depth(), 0);
        assert!(tree.root().is_none());
        match tree.points() {
            Err(CoverTreeError::EmptyTree) => (),
            other => panic!("expected an empty tree error, got {:?}", other),
        }
        assert!(tree.nodes_by_level().is_err());
        assert!(tree.nodes_to_level().is_err());
        assert!(tree.print(Vec::new()).is_err());
    }

    #[test]
    fn single_point_is_root_at_level_zero() {
        let mut tree = tree();
        tree.insert(0);
        assert_eq!(tree.level(), 0);
        assert_eq!(tree.points().unwrap(), vec![0]);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn lone_root_is_raised_before_replacement() {
        let mut tree = tree();
        tree.insert_all(vec![0, 100]);
        assert_eq!(tree.level(), 7);
        assert_eq!(tree.points().unwrap(), vec![100, 0]);
        let levels = tree.nodes_by_level().unwrap();
        assert_eq!(levels[&7], vec![100]);
        assert_eq!(levels[&6], vec![0]);
    }

    #[test]
    fn covered_point_becomes_leaf() {
        let mut tree = tree();
        tree.insert_all(vec![0, 1]);
        assert_eq!(tree.level(), 0);
        let root = tree.root().unwrap();
        assert_eq!(root.children().len(), 1);
        assert_eq!(*root.children()[0].point(), 1);
        assert_eq!(root.children()[0].level(), -1);
    }

    #[test]
    fn leaves_are_promoted_while_far_away() {
        let events = RefCell::new(vec![]);
        let mut tree = CoverTree::new(AbsoluteDifference)
            .with_observer(|event: &TreeEvent<'_, i64>| events.borrow_mut().push(describe(event)));
        tree.insert_all(vec![0, 1, 10]);
        assert_eq!(
            *events.borrow(),
            vec![
                ("attached", -1, Some(1)),
                ("promoted", 1, Some(1)),
                ("promoted", 2, Some(0)),
                ("promoted", 3, Some(1)),
                ("replaced", 4, Some(10)),
            ]
        );
        assert_eq!(tree.points().unwrap(), vec![10, 1, 0]);
        assert_eq!(tree.level(), 4);
    }

    #[test]
    fn raised_levels_are_reported() {
        let events = RefCell::new(vec![]);
        let mut tree = CoverTree::new(AbsoluteDifference)
            .with_observer(|event: &TreeEvent<'_, i64>| events.borrow_mut().push(describe(event)));
        tree.insert_all(vec![0, 5]);
        assert_eq!(
            *events.borrow(),
            vec![
                ("raised", 1, None),
                ("raised", 2, None),
                ("replaced", 3, Some(5)),
            ]
        );
    }

    #[test]
    fn duplicates_are_kept() {
        let mut tree = tree();
        tree.insert_all(vec![3, 3, 3]);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.points().unwrap(), vec![3, 3, 3]);
        assert_eq!(tree.nodes_to_level().unwrap().len(), 1);
    }

    #[test]
    fn nodes_to_level_last_write_wins() {
        let mut tree = tree();
        tree.insert_all(vec![3, 3]);
        // Breadth-first, the duplicate one level below the root comes last
        assert_eq!(tree.nodes_to_level().unwrap()[&3], -1);
    }

    #[test]
    fn nodes_by_level_counts_every_node() {
        let mut tree = tree();
        let points = vec![5, -3, 12, 0, 0, 7, 40, -100, 6];
        tree.insert_all(points.clone());
        let levels = tree.nodes_by_level().unwrap();
        assert_eq!(levels.values().map(Vec::len).sum::<usize>(), points.len());
        assert_eq!(*levels.keys().next_back().unwrap(), tree.level());
    }

    #[test]
    fn from_points_and_extend_match_insert() {
        let points = vec![1, 8, -4, 33, 2];
        let built = CoverTree::from_points(points.clone(), AbsoluteDifference);
        let mut extended = tree();
        extended.extend(points.clone());
        let mut inserted = tree();
        for &p in &points {
            inserted.insert(p);
        }
        assert_eq!(built.points().unwrap(), inserted.points().unwrap());
        assert_eq!(extended.points().unwrap(), inserted.points().unwrap());
        assert_eq!(built.level(), inserted.level());
    }

    #[test]
    fn custom_covering_constant() {
        let config = CoverTreeConfig::new(4.0).unwrap();
        let mut tree = CoverTree::with_config(AbsoluteDifference, config).with_observer(());
        tree.insert_all(vec![0, 100]);
        // 4^3 = 64 < 100 <= 4 * 64
        assert_eq!(tree.level(), 4);
        assert_eq!(tree.config().covering_constant(), 4.0);
    }

    #[test]
    fn print_groups_points_by_level() {
        let mut tree = tree();
        tree.insert_all(vec![0, 100]);
        let mut out = Vec::new();
        tree.print(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "7: 100\n6: 0\n");
    }

    #[test]
    fn depth_counts_generations() {
        let mut tree = tree();
        tree.insert_all(vec![0, 1, 10]);
        assert_eq!(tree.depth(), 3);
    }
}
