//! Compare guided (A*) and uniform-cost search on one terrain.
//!
//! Generates a procedural surface, discretizes it, then routes between
//! opposite corners twice — once with the straight-line heuristic and
//! once without — on separate threads. Both find the same cost; the
//! guided search just gets there expanding fewer nodes.

use std::time::Instant;

use relief_paths::{Heuristic, PathSearch, SearchState};
use relief_terrain::SurfaceSampler;

/// Terrain width and points per unit of surface area.
const WIDTH: usize = 50;
const DENSITY: f64 = 6.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = rand::rng();
    let surface = SurfaceSampler::new(WIDTH, &mut rng)?;
    let grid = surface.point_grid(DENSITY)?;

    let start = 0;
    let end = grid.len() - 1;
    println!(
        "terrain {WIDTH}x{WIDTH}, grid {}x{} ({} nodes), routing {} -> {}",
        grid.side(),
        grid.side(),
        grid.len(),
        start,
        end
    );

    let mut guided = PathSearch::new(&grid, start, end, Heuristic::StraightLine)?;
    let mut plain = PathSearch::new(&grid, start, end, Heuristic::None)?;

    // Each search owns its mutable state and only reads the shared
    // grid, so the two can run in parallel without locks.
    std::thread::scope(|s| {
        s.spawn(|| {
            let t = Instant::now();
            guided.run();
            report("A* (straight-line)", &guided, t);
        });
        s.spawn(|| {
            let t = Instant::now();
            plain.run();
            report("uniform-cost", &plain, t);
        });
    });

    Ok(())
}

fn report(label: &str, search: &PathSearch<'_>, started: Instant) {
    let elapsed = started.elapsed();
    match search.state() {
        SearchState::Succeeded => {
            let cost = search.cost().unwrap_or(f64::NAN);
            let hops = search.path().map_or(0, |p| p.len());
            println!("{label:>20}: cost {cost:.4}, {hops} hops, {elapsed:.2?}");
        }
        state => println!("{label:>20}: {state:?} after {elapsed:.2?}"),
    }
}
