//! Text rendering shared by the terminal demos.

use std::str::FromStr;

use wayfind_core::Point;
use wayfind_paths::{NodeId, ShortestPaths};
use wayfind_puzzle::{Maze, Tile};

/// Marker for route cells in [`render_solution`].
pub const ROUTE: char = 'o';

/// Positional command-line argument `pos`, or `default` when absent.
pub fn arg_or<T: FromStr>(pos: usize, default: T) -> Result<T, T::Err> {
    match std::env::args().nth(pos) {
        Some(s) => s.parse(),
        None => Ok(default),
    }
}

/// Draw the maze with `route` overlaid. Start, end and hazard cells keep
/// their own symbol so hazards on the route stay visible.
pub fn render_solution(maze: &Maze, route: &[Point]) -> String {
    let mut out = String::with_capacity(maze.grid().bounds().len() + maze.height() as usize);
    for y in 0..maze.height() {
        if y > 0 {
            out.push('\n');
        }
        for x in 0..maze.width() {
            let p = Point::new(x, y);
            let tile = maze.tile(p).unwrap_or_default();
            let ch = match tile {
                Tile::Empty if route.contains(&p) => ROUTE,
                Tile::Empty | Tile::Wall | Tile::Start | Tile::End | Tile::Hazard => tile.to_char(),
            };
            out.push(ch);
        }
    }
    out
}

/// Summary of the route from `start` to `end`, or a no-path notice.
pub fn describe_route(sp: &ShortestPaths<NodeId>, start: NodeId, end: NodeId) -> String {
    let Some(path) = sp.path_to(end) else {
        return "No path found from start to end node!".to_string();
    };
    let hops: Vec<String> = path.nodes().iter().map(NodeId::to_string).collect();
    format!(
        "Shortest path from Node {start} to Node {end}\nTotal distance: {}\nPath: {}",
        path.cost(),
        hops.join(" \u{2192} ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfind_paths::Graph;

    #[test]
    fn solution_overlay_marks_floor_only() {
        let maze = Maze::parse(
            "\
#######
#S.*.E#
#.###.#
#.....#
#######",
        )
        .unwrap();
        let path = maze.solve().unwrap().unwrap();
        let text = render_solution(&maze, path.nodes());
        assert_eq!(text.lines().nth(1), Some("#So*oE#"));
        assert_eq!(text.lines().nth(3), Some("#.....#"));
    }

    #[test]
    fn describes_found_route() {
        let mut g = Graph::with_nodes(3);
        g.add_edge(NodeId(0), NodeId(1), 4).unwrap();
        g.add_edge(NodeId(1), NodeId(2), 1).unwrap();
        g.add_edge(NodeId(0), NodeId(2), 10).unwrap();
        let sp = ShortestPaths::compute(&g, NodeId(0), Some(NodeId(2))).unwrap();
        assert_eq!(
            describe_route(&sp, NodeId(0), NodeId(2)),
            "Shortest path from Node 0 to Node 2\nTotal distance: 5\nPath: 0 \u{2192} 1 \u{2192} 2"
        );
    }

    #[test]
    fn describes_missing_route() {
        let g = Graph::with_nodes(2);
        let sp = ShortestPaths::compute(&g, NodeId(0), Some(NodeId(1))).unwrap();
        assert_eq!(
            describe_route(&sp, NodeId(0), NodeId(1)),
            "No path found from start to end node!"
        );
    }
}
