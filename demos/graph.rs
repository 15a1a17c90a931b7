//! Build a random weighted graph and print the shortest route across it.
//!
//! Run: cargo run --bin graph -- [seed]

use rand::SeedableRng;
use rand::rngs::StdRng;
use wayfind_demos::{arg_or, describe_route};
use wayfind_paths::ShortestPaths;
use wayfind_puzzle::{GraphGenConfig, random_graph};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let seed: u64 = arg_or(1, 42)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let puzzle = random_graph(&mut rng, &GraphGenConfig::default())?;

    println!("{} nodes, {} edges", puzzle.graph.node_count(), puzzle.graph.edge_count());
    for (a, b, w) in puzzle.graph.edges() {
        println!("  {a} -- {b}  ({w})");
    }

    let sp = ShortestPaths::compute(&puzzle.graph, puzzle.start, Some(puzzle.end))?;
    println!("{}", describe_route(&sp, puzzle.start, puzzle.end));
    Ok(())
}
