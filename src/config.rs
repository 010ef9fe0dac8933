//! Tree configuration

#[cfg(any(test, feature = "arbitrary"))]
use quickcheck::{Arbitrary, Gen};

use crate::error::{CoverTreeError, Result};


/// Covering constant used when none is configured
pub const DEFAULT_COVERING_CONSTANT: f64 = 2.0;

/// Smallest covering constant accepted by `CoverTreeConfig::new`
pub const MIN_COVERING_CONSTANT: f64 = 2.0;


/// Parameters of a cover tree
///
/// The covering constant `C` fixes the distance scale of every level: a node
/// at level `l` covers its children up to a distance of `C^l` and keeps them
/// more than `C^(l-1)` apart.
///
/// `C` has to be finite and at least 2. Root promotion relocates an arbitrary
/// leaf to the top of the tree. The descendants of a node at level `l` may lie
/// as far as `C^(l+1) / (C - 1)` away from it, which stays within the covering
/// distance `C^(l+1)` of the level above only for `C >= 2`.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct CoverTreeConfig {
    covering_constant: f64,
}

impl CoverTreeConfig {
    /// Create a configuration with the given covering constant
    ///
    /// Fails for constants below `MIN_COVERING_CONSTANT` and for infinite or
    /// NaN constants.
    pub fn new(covering_constant: f64) -> Result<CoverTreeConfig> {
        if covering_constant.is_finite() && covering_constant >= MIN_COVERING_CONSTANT {
            Ok(CoverTreeConfig { covering_constant: covering_constant })
        }
        else {
            Err(CoverTreeError::InvalidCoveringConstant(covering_constant))
        }
    }

    /// The covering constant
    pub fn covering_constant(&self) -> f64 {
        self.covering_constant
    }

    /// Maximum distance between a node at `level` and any of its children
    pub fn covering_distance(&self, level: i64) -> f64 {
        self.covering_constant.powf(level as f64)
    }

    /// Minimum distance, exclusive, between two children of a node at `level`
    pub fn separating_distance(&self, level: i64) -> f64 {
        self.covering_distance(level - 1)
    }

    /// The smallest level whose covering distance still contains `distance`
    ///
    /// Returns `None` for distances that are zero, negative or not finite, as
    /// no such level exists for them.
    pub fn level_for(&self, distance: f64) -> Option<i64> {
        if !(distance > 0.0 && distance.is_finite()) {
            return None;
        }
        let mut level = distance.log(self.covering_constant).ceil() as i64;
        // The logarithm is only an estimate, settle the boundary exactly
        while self.covering_distance(level) < distance {
            level += 1;
        }
        while self.covering_distance(level - 1) >= distance {
            level -= 1;
        }
        Some(level)
    }
}

impl Default for CoverTreeConfig {
    fn default() -> CoverTreeConfig {
        CoverTreeConfig { covering_constant: DEFAULT_COVERING_CONSTANT }
    }
}

#[cfg(any(test, feature = "arbitrary"))]
impl Arbitrary for CoverTreeConfig {
    fn arbitrary(g: &mut Gen) -> CoverTreeConfig {
        let constants = [2.0, 2.5, 3.0, 4.0, 8.0];
        let covering_constant = *g.choose(&constants).unwrap_or(&DEFAULT_COVERING_CONSTANT);
        CoverTreeConfig { covering_constant: covering_constant }
    }
}


#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use crate::error::CoverTreeError;
    use super::{CoverTreeConfig, MIN_COVERING_CONSTANT};

    #[test]
    fn default_constant_is_two() {
        let config = CoverTreeConfig::default();
        assert_eq!(config.covering_constant(), 2.0);
        assert_eq!(config.covering_distance(7), 128.0);
        assert_eq!(config.separating_distance(7), 64.0);
        assert_eq!(config.covering_distance(-2), 0.25);
    }

    #[test]
    fn custom_constant() {
        let config = CoverTreeConfig::new(2.5).unwrap();
        assert_relative_eq!(config.covering_distance(2), 6.25, epsilon = 1e-12);
        assert_relative_eq!(config.separating_distance(2), 2.5, epsilon = 1e-12);
        assert_relative_eq!(config.covering_distance(-1), 0.4, epsilon = 1e-12);
        assert_relative_eq!(config.covering_distance(0), 1.0);
    }

    #[test]
    fn smallest_constant_is_accepted() {
        let config = CoverTreeConfig::new(MIN_COVERING_CONSTANT).unwrap();
        assert_eq!(config, CoverTreeConfig::default());
    }

    #[test]
    fn rejects_small_or_non_finite_constants() {
        for &c in &[1.9, 1.5, 1.3, 1.1, 1.0, 0.5, -2.0, f64::NAN, f64::INFINITY] {
            match CoverTreeConfig::new(c) {
                Err(CoverTreeError::InvalidCoveringConstant(_)) => (),
                other => panic!("accepted covering constant {}: {:?}", c, other),
            }
        }
    }

    #[test]
    fn level_for_finds_tightest_level() {
        let config = CoverTreeConfig::default();
        assert_eq!(config.level_for(100.0), Some(7));
        assert_eq!(config.level_for(128.0), Some(7));
        assert_eq!(config.level_for(128.5), Some(8));
        assert_eq!(config.level_for(1.0), Some(0));
        assert_eq!(config.level_for(0.3), Some(-1));
    }

    #[test]
    fn level_for_degenerate_distances() {
        let config = CoverTreeConfig::new(3.0).unwrap();
        assert_eq!(config.level_for(0.0), None);
        assert_eq!(config.level_for(-1.0), None);
        assert_eq!(config.level_for(f64::NAN), None);
        assert_eq!(config.level_for(f64::INFINITY), None);
        assert_eq!(config.level_for(27.0), Some(3));
        assert_eq!(config.level_for(28.0), Some(4));
    }
}
