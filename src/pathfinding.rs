//! Tile-grid route search.
//!
//! The default search is greedy best-first: it always expands the open node
//! whose centre is closest (Manhattan, world units) to the goal and never
//! tracks path cost. Routes are "good enough" rather than shortest and can
//! wander around concave obstacle clusters. A true A* is available as
//! [`SearchMode::Shortest`] for callers that need it.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use crate::grid::Grid;

/// Tiles from the goal back to the start, both included.
pub type Route = Vec<(i32, i32)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    Greedy,
    Shortest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum NodeState {
    #[default]
    Unseen,
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, Default)]
struct SearchNode {
    state: NodeState,
    parent: Option<usize>,
    heuristic: f32,
    g_score: u32,
}

#[derive(Clone, Copy, PartialEq, Eq)]
struct ScoredNode {
    index: usize,
    f_score: u32, // g_score + heuristic
}

// BinaryHeap is a max-heap, so we reverse the ordering for min-heap behavior
impl Ord for ScoredNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for ScoredNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Route search with a scratch buffer of nodes indexed by tile.
///
/// The buffer is reset at the start of every search, so nothing from a
/// previous query can leak into the next one, and its allocation is reused
/// across the many searches run each tick.
#[derive(Debug, Default)]
pub struct Pathfinder {
    nodes: Vec<SearchNode>,
    open: Vec<usize>,
}

impl Pathfinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Greedy route from `start` to `goal`.
    ///
    /// Tiles in `blocked` (usually other actors) and blocking tiles are never
    /// stepped through, but the goal itself is always reachable so actors can
    /// path onto an occupied tile. When no route exists the result is just
    /// `[start]`.
    pub fn find_route(
        &mut self,
        grid: &Grid,
        start: (i32, i32),
        goal: (i32, i32),
        blocked: &HashSet<(i32, i32)>,
    ) -> Route {
        self.find_route_with_mode(grid, start, goal, blocked, SearchMode::Greedy)
    }

    pub fn find_route_with_mode(
        &mut self,
        grid: &Grid,
        start: (i32, i32),
        goal: (i32, i32),
        blocked: &HashSet<(i32, i32)>,
        mode: SearchMode,
    ) -> Route {
        let (Some(start_index), Some(goal_index)) = (
            grid.index_of(start.0, start.1),
            grid.index_of(goal.0, goal.1),
        ) else {
            return vec![start];
        };

        self.reset(grid.len());
        let found = match mode {
            SearchMode::Greedy => self.greedy(grid, start_index, goal_index, blocked),
            SearchMode::Shortest => self.shortest(grid, start_index, goal_index, blocked),
        };

        if found {
            self.reconstruct(grid, goal_index)
        } else {
            log::debug!("no route from {start:?} to {goal:?}, staying put");
            vec![start]
        }
    }

    fn reset(&mut self, len: usize) {
        self.nodes.clear();
        self.nodes.resize(len, SearchNode::default());
        self.open.clear();
    }

    fn greedy(
        &mut self,
        grid: &Grid,
        start: usize,
        goal: usize,
        blocked: &HashSet<(i32, i32)>,
    ) -> bool {
        let goal_coords = coords_of(grid, goal);
        let Some(goal_rect) = grid.get(goal_coords.0, goal_coords.1).map(|t| t.rect) else {
            return false;
        };

        self.nodes[start] = SearchNode {
            state: NodeState::Open,
            parent: None,
            heuristic: f32::MAX,
            g_score: 0,
        };
        self.open.push(start);
        let mut current = start;

        while current != goal {
            if let Some(position) = self.open.iter().position(|&i| i == current) {
                self.open.remove(position);
            }
            self.nodes[current].state = NodeState::Closed;

            let (column, row) = coords_of(grid, current);
            for tile in grid.neighbors(column, row) {
                let Some(index) = grid.index_of(tile.column, tile.row) else {
                    continue;
                };
                if !admissible(tile.is_blocking(), tile.coords(), index == goal, blocked) {
                    continue;
                }
                if self.nodes[index].state != NodeState::Unseen {
                    continue;
                }
                self.nodes[index] = SearchNode {
                    state: NodeState::Open,
                    parent: Some(current),
                    heuristic: tile.rect.center_manhattan(&goal_rect),
                    g_score: 0,
                };
                self.open.push(index);
            }

            if self.open.is_empty() {
                return false;
            }
            current = select_current(&self.open, &self.nodes);
        }
        true
    }

    fn shortest(
        &mut self,
        grid: &Grid,
        start: usize,
        goal: usize,
        blocked: &HashSet<(i32, i32)>,
    ) -> bool {
        let goal_coords = coords_of(grid, goal);
        let mut open_set = BinaryHeap::new();

        self.nodes[start].state = NodeState::Open;
        open_set.push(ScoredNode {
            index: start,
            f_score: chebyshev(coords_of(grid, start), goal_coords),
        });

        while let Some(current) = open_set.pop() {
            if current.index == goal {
                return true;
            }
            if self.nodes[current.index].state == NodeState::Closed {
                continue;
            }
            self.nodes[current.index].state = NodeState::Closed;

            let current_g = self.nodes[current.index].g_score;
            let (column, row) = coords_of(grid, current.index);
            for tile in grid.neighbors(column, row) {
                let Some(index) = grid.index_of(tile.column, tile.row) else {
                    continue;
                };
                if !admissible(tile.is_blocking(), tile.coords(), index == goal, blocked) {
                    continue;
                }

                let tentative_g = current_g + 1;
                let node = &mut self.nodes[index];
                let improves = match node.state {
                    NodeState::Unseen => true,
                    NodeState::Open => tentative_g < node.g_score,
                    NodeState::Closed => false,
                };
                if improves {
                    node.state = NodeState::Open;
                    node.parent = Some(current.index);
                    node.g_score = tentative_g;
                    open_set.push(ScoredNode {
                        index,
                        f_score: tentative_g + chebyshev(tile.coords(), goal_coords),
                    });
                }
            }
        }
        false
    }

    /// Follow parent links from the goal back to the seed.
    fn reconstruct(&self, grid: &Grid, goal: usize) -> Route {
        let mut route = vec![coords_of(grid, goal)];
        let mut current = goal;
        while let Some(parent) = self.nodes[current].parent {
            route.push(coords_of(grid, parent));
            current = parent;
        }
        route
    }
}

/// The tile to step into next: the second-to-last route entry.
/// `None` for a one-element route, which means "stay put".
pub fn next_hop(route: &[(i32, i32)]) -> Option<(i32, i32)> {
    route.len().checked_sub(2).map(|i| route[i])
}

/// Pick the open node with the lowest heuristic.
///
/// Scanning starts from the most recently opened node and only a strictly
/// lower value replaces the pick, so the newest node wins any tie it is part
/// of; otherwise the earliest node holding the minimum wins.
fn select_current(open: &[usize], nodes: &[SearchNode]) -> usize {
    let mut best = open[open.len() - 1];
    for &index in open {
        if nodes[index].heuristic < nodes[best].heuristic {
            best = index;
        }
    }
    best
}

fn admissible(is_blocking: bool, coords: (i32, i32), is_goal: bool, blocked: &HashSet<(i32, i32)>) -> bool {
    is_goal || !(is_blocking || blocked.contains(&coords))
}

fn coords_of(grid: &Grid, index: usize) -> (i32, i32) {
    ((index % grid.width) as i32, (index / grid.width) as i32)
}

fn chebyshev(from: (i32, i32), to: (i32, i32)) -> u32 {
    (from.0 - to.0).unsigned_abs().max((from.1 - to.1).unsigned_abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::TileKind;

    fn make_grid(width: usize, height: usize, walls: &[(i32, i32)]) -> Grid {
        let mut grid = Grid::new(width, height, 70.0);
        for &(c, r) in walls {
            if let Some(tile) = grid.get_mut(c, r) {
                tile.kind = TileKind::Obstacle;
            }
        }
        grid
    }

    fn no_blockers() -> HashSet<(i32, i32)> {
        HashSet::new()
    }

    fn assert_connected(route: &[(i32, i32)]) {
        for pair in route.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!((a.0 - b.0).abs() <= 1 && (a.1 - b.1).abs() <= 1, "{a:?} -> {b:?}");
        }
    }

    #[test]
    fn test_start_equals_goal() {
        let grid = make_grid(5, 5, &[]);
        let mut pathfinder = Pathfinder::new();
        let route = pathfinder.find_route(&grid, (2, 3), (2, 3), &no_blockers());
        assert_eq!(route, vec![(2, 3)]);
        assert_eq!(next_hop(&route), None);
    }

    #[test]
    fn test_open_three_by_three() {
        let grid = make_grid(3, 3, &[]);
        let mut pathfinder = Pathfinder::new();
        let route = pathfinder.find_route(&grid, (0, 0), (2, 2), &no_blockers());

        assert_eq!(route, vec![(2, 2), (1, 1), (0, 0)]);
        let forward: Vec<_> = route.iter().rev().copied().collect();
        assert_eq!(forward.first(), Some(&(0, 0)));
        assert_eq!(forward.last(), Some(&(2, 2)));
        let unique: HashSet<_> = forward.iter().collect();
        assert_eq!(unique.len(), forward.len());
        assert_eq!(next_hop(&route), Some((1, 1)));
    }

    #[test]
    fn test_walled_in_start_falls_back() {
        let ring = [(1, 1), (2, 1), (3, 1), (1, 2), (3, 2), (1, 3), (2, 3), (3, 3)];
        let grid = make_grid(5, 5, &ring);
        let mut pathfinder = Pathfinder::new();
        let route = pathfinder.find_route(&grid, (2, 2), (0, 0), &no_blockers());
        assert_eq!(route, vec![(2, 2)]);
    }

    #[test]
    fn test_blocking_goal_is_reachable() {
        let grid = make_grid(4, 1, &[(3, 0)]);
        let mut pathfinder = Pathfinder::new();
        let route = pathfinder.find_route(&grid, (0, 0), (3, 0), &no_blockers());
        assert_eq!(route, vec![(3, 0), (2, 0), (1, 0), (0, 0)]);
    }

    #[test]
    fn test_greedy_route_around_pocket() {
        // Start sits in a pocket that opens away from the goal
        let walls = [(2, 1), (3, 1), (3, 2), (3, 3), (2, 3)];
        let grid = make_grid(6, 5, &walls);
        let mut pathfinder = Pathfinder::new();
        let route = pathfinder.find_route(&grid, (1, 2), (5, 2), &no_blockers());

        assert_eq!(route, vec![(5, 2), (4, 3), (3, 4), (2, 4), (1, 3), (1, 2)]);
        assert!(route.iter().all(|&(c, r)| !walls.contains(&(c, r))));
    }

    #[test]
    fn test_blocked_set_is_avoided() {
        let grid = make_grid(5, 3, &[]);
        let mut pathfinder = Pathfinder::new();
        let blocked: HashSet<_> = [(1, 1)].into_iter().collect();
        let route = pathfinder.find_route(&grid, (0, 1), (4, 1), &blocked);

        assert!(!route.contains(&(1, 1)));
        assert_eq!(route.first(), Some(&(4, 1)));
        assert_eq!(route.last(), Some(&(0, 1)));
        assert_connected(&route);
    }

    #[test]
    fn test_blocked_goal_is_still_reachable() {
        let grid = make_grid(3, 1, &[]);
        let mut pathfinder = Pathfinder::new();
        let blocked: HashSet<_> = [(2, 0)].into_iter().collect();
        let route = pathfinder.find_route(&grid, (0, 0), (2, 0), &blocked);
        assert_eq!(route, vec![(2, 0), (1, 0), (0, 0)]);
    }

    #[test]
    fn test_repeated_searches_do_not_leak_state() {
        let grid = make_grid(6, 5, &[(2, 1), (3, 1), (3, 2), (3, 3), (2, 3)]);
        let mut pathfinder = Pathfinder::new();
        let first = pathfinder.find_route(&grid, (1, 2), (5, 2), &no_blockers());
        let _ = pathfinder.find_route(&grid, (5, 0), (0, 4), &no_blockers());
        let again = pathfinder.find_route(&grid, (1, 2), (5, 2), &no_blockers());
        assert_eq!(first, again);

        let fresh = Pathfinder::new().find_route(&grid, (5, 0), (0, 4), &no_blockers());
        assert_eq!(pathfinder.find_route(&grid, (5, 0), (0, 4), &no_blockers()), fresh);
    }

    #[test]
    fn test_out_of_bounds_endpoints_stay_put() {
        let grid = make_grid(3, 3, &[]);
        let mut pathfinder = Pathfinder::new();
        assert_eq!(pathfinder.find_route(&grid, (0, 0), (9, 9), &no_blockers()), vec![(0, 0)]);
    }

    #[test]
    fn test_tie_prefers_newest_node_when_it_ties() {
        let mut nodes = vec![SearchNode::default(); 4];
        for (i, h) in [5.0, 2.0, 3.0, 2.0].into_iter().enumerate() {
            nodes[i].heuristic = h;
        }
        assert_eq!(select_current(&[0, 1, 2, 3], &nodes), 3);
    }

    #[test]
    fn test_tie_prefers_earliest_node_otherwise() {
        let mut nodes = vec![SearchNode::default(); 4];
        for (i, h) in [2.0, 5.0, 2.0, 3.0].into_iter().enumerate() {
            nodes[i].heuristic = h;
        }
        assert_eq!(select_current(&[0, 1, 2, 3], &nodes), 0);
        assert_eq!(select_current(&[3, 2, 1, 0], &nodes), 0);
    }

    #[test]
    fn test_shortest_mode_finds_optimal_length() {
        // Column 3 is a wall except for a gap at the bottom
        let grid = make_grid(7, 5, &[(3, 0), (3, 1), (3, 2), (3, 3)]);
        let mut pathfinder = Pathfinder::new();
        let shortest = pathfinder.find_route_with_mode(&grid, (0, 2), (6, 2), &no_blockers(), SearchMode::Shortest);
        let greedy = pathfinder.find_route(&grid, (0, 2), (6, 2), &no_blockers());

        assert_eq!(shortest.len(), 7);
        assert!(shortest.contains(&(3, 4)));
        assert_connected(&shortest);
        assert!(greedy.len() >= shortest.len());
        assert_eq!(greedy.first(), Some(&(6, 2)));
        assert_eq!(greedy.last(), Some(&(0, 2)));
        assert_connected(&greedy);
    }

    #[test]
    fn test_shortest_mode_falls_back_when_unreachable() {
        let grid = make_grid(5, 3, &[(2, 0), (2, 1), (2, 2)]);
        let mut pathfinder = Pathfinder::new();
        let route = pathfinder.find_route_with_mode(&grid, (0, 1), (4, 1), &no_blockers(), SearchMode::Shortest);
        assert_eq!(route, vec![(0, 1)]);
    }
}
