//! World-space rectangles and axis directions.

use glam::Vec2;

/// Axis-aligned rectangle in world units, used for tiles and hitboxes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Rectangle of the given size centred on `center`.
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size * 0.5,
            size,
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }

    /// Half-open containment: the minimum edges are inside, the maximum edges are not.
    pub fn contains_point(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.min.x && point.x < max.x && point.y >= self.min.y && point.y < max.y
    }

    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            size: self.size,
        }
    }

    /// Manhattan distance between the centres of two rectangles.
    pub fn center_manhattan(&self, other: &Rect) -> f32 {
        let d = (self.center() - other.center()).abs();
        d.x + d.y
    }
}

/// One of the four axis directions. Rows grow downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

    /// Grid offset `(columns, rows)` for one step in this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    pub fn unit(self) -> Vec2 {
        let (dx, dy) = self.offset();
        Vec2::new(dx as f32, dy as f32)
    }

    /// The two directions at right angles to this one.
    pub fn perpendicular(self) -> [Direction; 2] {
        match self {
            Direction::Left | Direction::Right => [Direction::Up, Direction::Down],
            Direction::Up | Direction::Down => [Direction::Left, Direction::Right],
        }
    }

    /// Dominant axis direction of a world-space delta, or `None` for a zero delta.
    pub fn from_delta(delta: Vec2) -> Option<Direction> {
        if delta == Vec2::ZERO {
            return None;
        }
        if delta.x.abs() >= delta.y.abs() {
            Some(if delta.x < 0.0 { Direction::Left } else { Direction::Right })
        } else {
            Some(if delta.y < 0.0 { Direction::Up } else { Direction::Down })
        }
    }
}
