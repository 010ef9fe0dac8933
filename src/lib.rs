//! A cover tree library
//!
//! Cover trees arrange points of an arbitrary metric space on integer levels,
//! such that every level covers the one below it at a geometrically shrinking
//! distance scale. Points are inserted one at a time, the tree never needs a
//! bulk construction step.
//!
//! ```
//! use covertree::{AbsoluteDifference, CoverTree};
//!
//! let mut tree = CoverTree::new(AbsoluteDifference);
//! tree.insert_all(vec![0, 1, 10]);
//! assert_eq!(tree.len(), 3);
//! assert!(tree.is_valid().unwrap());
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod cover_tree;
pub mod diagnostics;
pub mod error;
pub mod event;
pub mod invariant;
pub mod iter;
pub mod metric;
pub mod node;
pub mod traits;

pub use crate::config::{CoverTreeConfig, DEFAULT_COVERING_CONSTANT, MIN_COVERING_CONSTANT};
pub use crate::cover_tree::CoverTree;
pub use crate::diagnostics::{DistanceProfile, HarmonicReport};
pub use crate::error::{CoverTreeError, Result};
pub use crate::event::{Invariant, TracingObserver, TreeEvent, Violation};
#[cfg(any(test, feature = "arbitrary"))]
pub use crate::invariant::{prop_len_matches_insertions, prop_valid_after_each_insert};
pub use crate::iter::{Generations, Iter};
pub use crate::metric::{AbsoluteDifference, Chebyshev, Euclidean};
pub use crate::node::Node;
pub use crate::traits::{Metric, Observer};
