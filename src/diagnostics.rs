//! Diagnostics along the covering path of a query point
//!
//! Starting at the root, the covering path of a query descends into the first
//! child whose covering distance contains the query, until no child does.
//! The distances met on the way tell how well the tree is shaped around the
//! query. A cover is called harmonic along the path, if the query gets no
//! farther away from the nodes while descending.

use std::cmp::Ordering;

use itertools::Itertools;

use crate::cover_tree::CoverTree;
use crate::error::{CoverTreeError, Result};
use crate::event::TreeEvent;
use crate::node::Node;
use crate::traits::{Metric, Observer};


/// Distances recorded along the covering path of a query point
#[derive(PartialEq, Clone, Debug)]
pub struct DistanceProfile<P> {
    /// Distance from the query to every visited node covering it, from the
    /// root downwards
    pub edge_distances: Vec<f64>,

    /// Distance from the root to every node the path descended into
    pub root_distances: Vec<f64>,

    /// Point of the last node on the path
    pub terminal: P,

    /// Level of the last node on the path
    pub terminal_level: i64,
}

impl<P> DistanceProfile<P> {
    /// Do the edge distances never increase down the path?
    pub fn is_harmonic(&self) -> bool {
        non_increasing(&self.edge_distances)
    }
}

fn non_increasing(distances: &[f64]) -> bool {
    distances.windows(2).all(|pair| pair[0] >= pair[1])
}


/// Outcome of a harmonic check
#[derive(PartialEq, Clone, Debug)]
pub struct HarmonicReport<P> {
    /// Whether the edge distances never increase down the path
    pub harmonic: bool,

    /// Level a root at the terminal point would need to cover the recorded
    /// distances
    ///
    /// Only present if at least two distances were recorded and the largest
    /// of them is positive.
    pub suggested_level: Option<i64>,

    /// The distances the report is based on
    pub profile: DistanceProfile<P>,
}


struct Path<'a, P: 'a> {
    edge_distances: Vec<f64>,
    root_distances: Vec<f64>,
    terminal: &'a Node<P>,
}

impl<P, M, O> CoverTree<P, M, O>
    where M: Metric<P>,
{
    fn covering_path(&self, query: &P) -> Result<Path<'_, P>> {
        let root = self.nonempty_root()?;
        let metric = self.metric();
        let config = self.config();
        let mut edge_distances = vec![];
        let mut root_distances = vec![];
        let mut current = root;
        loop {
            let distance = metric.distance(query, current.point());
            if distance <= config.covering_distance(current.level()) {
                edge_distances.push(distance);
            }
            let next = current.children().iter().find(|child|
                metric.distance(query, child.point()) <= config.covering_distance(child.level())
            );
            match next {
                Some(child) => {
                    root_distances.push(metric.distance(root.point(), child.point()));
                    current = child;
                },
                None => break,
            }
        }
        Ok(Path {
            edge_distances: edge_distances,
            root_distances: root_distances,
            terminal: current,
        })
    }

    /// Check whether the cover is harmonic along the covering path of `query`
    ///
    /// This only inspects the tree, see `rebuild_if_loose` for acting on the
    /// outcome.
    pub fn is_harmonic(&self, query: &P) -> Result<bool> {
        let path = self.covering_path(query)?;
        Ok(non_increasing(&path.edge_distances))
    }
}

impl<P, M, O> CoverTree<P, M, O>
    where P: Clone,
          M: Metric<P>,
{
    /// Record the distances along the covering path of `query`
    pub fn check_distance(&self, query: &P) -> Result<DistanceProfile<P>> {
        let path = self.covering_path(query)?;
        Ok(DistanceProfile {
            edge_distances: path.edge_distances,
            root_distances: path.root_distances,
            terminal: path.terminal.point().clone(),
            terminal_level: path.terminal.level(),
        })
    }

    /// Check the covering path of `query` and suggest a tighter root level
    pub fn harmonic_report(&self, query: &P) -> Result<HarmonicReport<P>> {
        let profile = self.check_distance(query)?;
        let suggested_level = if profile.edge_distances.len() >= 2 {
            let max = profile.edge_distances.iter().cloned().fold(0.0, f64::max);
            self.config().level_for(max)
        }
        else {
            None
        };
        Ok(HarmonicReport {
            harmonic: profile.is_harmonic(),
            suggested_level: suggested_level,
            profile: profile,
        })
    }
}

impl<P, M, O> CoverTree<P, M, O>
    where P: Clone + PartialEq,
          M: Metric<P>,
          O: Observer<P>,
{
    /// Rebuild the tree around one of its points
    ///
    /// One node holding `new_root` is removed, a fresh root for it is placed
    /// at the smallest level covering every other point, and all other points
    /// are inserted again, farthest from the new root first. The number of
    /// stored points does not change.
    pub fn reroot_and_rebuild(&mut self, new_root: &P) -> Result<()> {
        self.rebuild(new_root, None)
    }

    /// Rebuild the tree if the covering path of `query` admits a lower root
    ///
    /// If the harmonic report suggests a level below the current root level,
    /// the tree is started over from the terminal point of the path at that
    /// level, and every other point is inserted again, farthest first. Points
    /// beyond the suggested level promote a new root while being reinserted,
    /// so the terminal point usually does not stay on top. Returns whether
    /// the tree was rebuilt.
    pub fn rebuild_if_loose(&mut self, query: &P) -> Result<bool> {
        let report = self.harmonic_report(query)?;
        match report.suggested_level {
            Some(level) if level < self.level() => {
                self.rebuild(&report.profile.terminal, Some(level))?;
                Ok(true)
            },
            _ => Ok(false),
        }
    }

    fn rebuild(&mut self, new_root: &P, level: Option<i64>) -> Result<()> {
        let mut points = self.points()?;
        let slot = points.iter()
            .position(|point| point == new_root)
            .ok_or(CoverTreeError::PointNotFound)?;
        let root_point = points.swap_remove(slot);

        let metric = self.metric();
        let others: Vec<(f64, P)> = points.into_iter()
            .map(|point| (metric.distance(&root_point, &point), point))
            .sorted_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal))
            .collect();
        let level = level.unwrap_or_else(|| {
            others.first()
                .and_then(|&(farthest, _)| self.config().level_for(farthest))
                .unwrap_or(0)
        });

        self.observer().observe(&TreeEvent::Rebuilt { point: &root_point, level: level });
        self.replace_root(root_point, level);
        self.insert_all(others.into_iter().map(|(_, point)| point));
        Ok(())
    }
}
