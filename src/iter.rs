//! Breadth-first tree iterators.

use std::collections::VecDeque;

use crate::node::Node;


/// An iterator over the nodes of a tree in breadth-first order.
pub struct Iter<'a, P: 'a> {
    nodes: VecDeque<&'a Node<P>>,
}

impl<'a, P> Iter<'a, P> {
    /// Create a new iterator starting at `root`, if any.
    pub fn new(root: Option<&'a Node<P>>) -> Iter<'a, P> {
        Iter { nodes: root.into_iter().collect() }
    }
}

impl<'a, P> Iterator for Iter<'a, P> {
    type Item = &'a Node<P>;

    fn next(&mut self) -> Option<&'a Node<P>> {
        let node = self.nodes.pop_front()?;
        self.nodes.extend(node.children());
        Some(node)
    }
}


/// An iterator over the generations of a tree.
///
/// Each item holds all nodes at the same distance from the root, in
/// breadth-first order. In a tree that satisfies the level invariant, a
/// generation is exactly the set of nodes on one level.
pub struct Generations<'a, P: 'a> {
    current: Vec<&'a Node<P>>,
}

impl<'a, P> Generations<'a, P> {
    /// Create a new iterator starting at `root`, if any.
    pub fn new(root: Option<&'a Node<P>>) -> Generations<'a, P> {
        Generations { current: root.into_iter().collect() }
    }
}

impl<'a, P> Iterator for Generations<'a, P> {
    type Item = Vec<&'a Node<P>>;

    fn next(&mut self) -> Option<Vec<&'a Node<P>>> {
        if self.current.is_empty() {
            return None;
        }
        let next = self.current.iter()
            .flat_map(|&node| node.children())
            .collect();
        Some(std::mem::replace(&mut self.current, next))
    }
}
