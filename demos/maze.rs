//! Print one generated maze level with its reference route.
//!
//! Run: cargo run --bin maze -- [seed] [level]

use wayfind_demos::{arg_or, render_solution};
use wayfind_puzzle::{DEFAULT_LEVELS, LevelSet, MazeConfig, Trail};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let seed: u64 = arg_or(1, 42)?;
    let number: usize = arg_or(2, 1)?;

    let levels = LevelSet::generate(&MazeConfig::default(), DEFAULT_LEVELS, seed)?;
    let Some(level) = levels.get(number) else {
        return Err(format!("level must be between 1 and {}", levels.len()).into());
    };

    println!("Level {} (seed {seed})", level.number);
    println!("{}", render_solution(&level.maze, level.solution.nodes()));
    println!(
        "Optimal path length: {} (cost {}, hazards on route: {})",
        level.solution.steps(),
        level.solution.cost(),
        level.maze.hazard_hits(level.solution.nodes())
    );

    // Replaying the reference route must score as perfect unless it has to
    // cross a hazard.
    let mut trail = Trail::new();
    for &p in level.solution.nodes() {
        trail.step(&level.maze, p)?;
    }
    println!("{}", trail.evaluate(&level.solution));
    println!("Next level: {}", levels.next_number(number));
    Ok(())
}
