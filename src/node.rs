//! Cover tree nodes

use std::collections::VecDeque;
use std::mem;

use crate::config::CoverTreeConfig;
use crate::iter::Iter;
use crate::traits::Metric;


/// A node of a cover tree
///
/// Every node stores one point at an integer level and owns its children.
/// The order of the children reflects the insertion history only and carries
/// no meaning.
#[derive(Clone, Debug)]
pub struct Node<P> {
    point: P,
    level: i64,
    children: Vec<Node<P>>,
}

impl<P> Node<P> {
    /// Create a leaf
    pub(crate) fn leaf(point: P, level: i64) -> Node<P> {
        Node {
            point: point,
            level: level,
            children: vec![],
        }
    }

    /// Create a node with the given children, whether they fit or not
    #[cfg(test)]
    pub(crate) fn branch(point: P, level: i64, children: Vec<Node<P>>) -> Node<P> {
        Node {
            point: point,
            level: level,
            children: children,
        }
    }

    /// The point stored in this node
    pub fn point(&self) -> &P {
        &self.point
    }

    /// The level of this node
    pub fn level(&self) -> i64 {
        self.level
    }

    /// The children of this node
    pub fn children(&self) -> &[Node<P>] {
        &self.children
    }

    /// Is this a leaf?
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Iterate breadth-first over this node and all its descendants
    pub fn iter(&self) -> Iter<'_, P> {
        Iter::new(Some(self))
    }

    pub(crate) fn into_point(self) -> P {
        self.point
    }

    /// Raise the level of a node without children
    pub(crate) fn raise(&mut self) {
        debug_assert!(self.is_leaf());
        self.level += 1;
    }

    /// Put a new point on top of this node
    ///
    /// The current contents of the node move into a single child, while the
    /// node itself takes `point` one level higher.
    pub(crate) fn push_down(&mut self, point: P) {
        let level = self.level + 1;
        let demoted = mem::replace(self, Node::leaf(point, level));
        self.children.push(demoted);
    }

    /// Locate a leaf strictly below this node
    ///
    /// The search runs breadth-first and returns the child slots leading from
    /// this node to the first leaf encountered, i.e. one of the shallowest
    /// leaves. There is no such leaf iff this node has no children.
    pub(crate) fn find_leaf(&self) -> Option<LeafPath> {
        // Every queued inner node is recorded as its slot and the record of
        // its parent, so the path is only spelled out for the leaf found.
        let mut records: Vec<(Option<usize>, usize)> = vec![];
        let mut queue = VecDeque::new();
        queue.push_back((self, None));
        while let Some((node, record)) = queue.pop_front() {
            for (slot, child) in node.children.iter().enumerate() {
                if child.is_leaf() {
                    let mut parents = vec![];
                    let mut current = record;
                    while let Some(index) = current {
                        let (parent, parent_slot) = records[index];
                        parents.push(parent_slot);
                        current = parent;
                    }
                    parents.reverse();
                    return Some(LeafPath { parents: parents, slot: slot });
                }
                records.push((record, slot));
                queue.push_back((child, Some(records.len() - 1)));
            }
        }
        None
    }

    /// Remove the descendant a path leads to
    ///
    /// `path` must have been produced by `find_leaf` on this very node, with
    /// no mutation in between.
    pub(crate) fn detach(&mut self, path: &LeafPath) -> Node<P> {
        let mut parent = self;
        for &i in &path.parents {
            parent = &mut parent.children[i];
        }
        parent.children.swap_remove(path.slot)
    }

    /// Insert a point somewhere below this node by covering descent
    ///
    /// The point descends into the first child that covers it, until it
    /// reaches a node none of whose children do, and is attached there as a
    /// new leaf. Returns the new leaf.
    ///
    /// The caller is responsible for this node covering the point.
    pub(crate) fn descend<M>(&mut self, point: P, metric: &M, config: &CoverTreeConfig) -> &Node<P>
        where M: Metric<P>
    {
        let mut node = self;
        loop {
            let next = node.children.iter().position(|child|
                metric.distance(&child.point, &point) <= config.covering_distance(child.level)
            );
            match next {
                Some(i) => node = &mut node.children[i],
                None => {
                    let level = node.level - 1;
                    node.children.push(Node::leaf(point, level));
                    return &node.children[node.children.len() - 1];
                },
            }
        }
    }
}


/// Child slots leading from a node to one of its descendants
#[derive(PartialEq, Eq, Clone, Debug)]
pub(crate) struct LeafPath {
    /// Slots of the ancestors below the starting node
    parents: Vec<usize>,

    /// Slot of the descendant within its parent
    slot: usize,
}
