//! Build a cover tree over a random point cloud
//!
//! Run with `RUST_LOG=covertree=debug` to watch the tree restructure itself.

use std::io;

use covertree::{CoverTree, Euclidean};
use nalgebra::Point3;
use rand::distributions::{Distribution, Uniform};
use tracing_subscriber::EnvFilter;


fn main() -> covertree::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rng = rand::thread_rng();
    let coordinate = Uniform::new(-10.0f64, 10.0);
    let cloud: Vec<Point3<f64>> = (0..200)
        .map(|_| Point3::new(
            coordinate.sample(&mut rng),
            coordinate.sample(&mut rng),
            coordinate.sample(&mut rng),
        ))
        .collect();

    let tree = CoverTree::from_points(cloud, Euclidean);
    println!("points: {}", tree.len());
    println!("root level: {}", tree.level());
    println!("depth: {}", tree.depth());
    println!("valid: {}", tree.is_valid()?);
    for (level, points) in tree.nodes_by_level()?.iter().rev() {
        println!("level {:>3}: {} nodes", level, points.len());
    }
    println!();
    tree.print(io::stdout().lock())?;
    Ok(())
}
