//! Movement directions: the eight compass points plus up and down.
//!
//! Compass codes start at north (0) and run clockwise; the vertical codes
//! follow them (8 = up, 9 = down).

use std::fmt;

use crate::geom::Position;

/// A single step direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Direction {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
    Up = 8,
    Down = 9,
}

const DX: [i32; 10] = [0, 1, 1, 1, 0, -1, -1, -1, 0, 0];
const DY: [i32; 10] = [-1, -1, 0, 1, 1, 1, 0, -1, 0, 0];
const DZ: [i32; 10] = [0, 0, 0, 0, 0, 0, 0, 0, 1, -1];

impl Direction {
    /// The eight horizontal directions, in code order.
    pub const COMPASS: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// All ten directions, in code order.
    pub const ALL: [Direction; 10] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
        Direction::Up,
        Direction::Down,
    ];

    /// Numeric code (0-7 compass, 8 up, 9 down).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction for a numeric code, `None` above 9.
    #[inline]
    pub fn from_index(i: usize) -> Option<Direction> {
        Self::ALL.get(i).copied()
    }

    /// Unit step vector of this direction.
    #[inline]
    pub const fn to_vector(self) -> Position {
        let i = self as usize;
        Position::new(DX[i], DY[i], DZ[i])
    }

    /// Horizontal direction of a step vector; the z component is ignored.
    /// `None` unless `(x, y)` is a unit compass step.
    pub fn from_vector(v: Position) -> Option<Direction> {
        Self::COMPASS
            .iter()
            .copied()
            .find(|d| DX[d.index()] == v.x && DY[d.index()] == v.y)
    }

    /// Like [`from_vector`](Self::from_vector) but maps pure vertical steps
    /// `(0, 0, ±1)` to [`Up`](Self::Up) / [`Down`](Self::Down).
    pub fn from_vector_3d(v: Position) -> Option<Direction> {
        match (v.x, v.y, v.z) {
            (0, 0, 1) => Some(Direction::Up),
            (0, 0, -1) => Some(Direction::Down),
            (_, _, 0) => Self::from_vector(v),
            _ => None,
        }
    }

    /// Whether this is one of the four diagonal compass points.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        (self as u8) < 8 && (self as u8) & 1 == 1
    }

    /// Whether this is [`Up`](Self::Up) or [`Down`](Self::Down).
    #[inline]
    pub const fn is_vertical(self) -> bool {
        (self as u8) >= 8
    }

    /// Whether this is a compass direction.
    #[inline]
    pub const fn is_horizontal(self) -> bool {
        !self.is_vertical()
    }

    /// Number of 45° turns between two compass directions (0-4). Vertical
    /// directions have no facing and are 0 away from everything.
    pub fn angular_distance(self, other: Direction) -> i32 {
        if self.is_vertical() || other.is_vertical() {
            return 0;
        }
        let d = (self as i32 - other as i32).rem_euclid(8);
        d.min(8 - d)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::North => "N",
            Direction::NorthEast => "NE",
            Direction::East => "E",
            Direction::SouthEast => "SE",
            Direction::South => "S",
            Direction::SouthWest => "SW",
            Direction::West => "W",
            Direction::NorthWest => "NW",
            Direction::Up => "UP",
            Direction::Down => "DOWN",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compass_vectors() {
        assert_eq!(Direction::North.to_vector(), Position::new(0, -1, 0));
        assert_eq!(Direction::East.to_vector(), Position::new(1, 0, 0));
        assert_eq!(Direction::SouthWest.to_vector(), Position::new(-1, 1, 0));
        assert_eq!(Direction::Up.to_vector(), Position::new(0, 0, 1));
        assert_eq!(Direction::Down.to_vector(), Position::new(0, 0, -1));
    }

    #[test]
    fn vector_round_trip() {
        for d in Direction::COMPASS {
            assert_eq!(Direction::from_vector(d.to_vector()), Some(d));
        }
        for d in Direction::ALL {
            assert_eq!(Direction::from_vector_3d(d.to_vector()), Some(d));
        }
    }

    #[test]
    fn from_vector_rejects_non_steps() {
        assert_eq!(Direction::from_vector(Position::new(2, 0, 0)), None);
        assert_eq!(Direction::from_vector(Position::ZERO), None);
        assert_eq!(Direction::from_vector_3d(Position::new(1, 0, 1)), None);
    }

    #[test]
    fn from_vector_ignores_z() {
        assert_eq!(
            Direction::from_vector(Position::new(1, 1, 1)),
            Some(Direction::SouthEast)
        );
    }

    #[test]
    fn classification() {
        assert!(Direction::NorthEast.is_diagonal());
        assert!(!Direction::North.is_diagonal());
        assert!(!Direction::Down.is_diagonal());
        assert!(Direction::Up.is_vertical());
        assert!(Direction::West.is_horizontal());
    }

    #[test]
    fn index_round_trip() {
        for (i, d) in Direction::ALL.iter().enumerate() {
            assert_eq!(d.index(), i);
            assert_eq!(Direction::from_index(i), Some(*d));
        }
        assert_eq!(Direction::from_index(10), None);
    }

    #[test]
    fn angular_distance_wraps() {
        assert_eq!(Direction::North.angular_distance(Direction::North), 0);
        assert_eq!(Direction::North.angular_distance(Direction::NorthWest), 1);
        assert_eq!(Direction::NorthWest.angular_distance(Direction::NorthEast), 2);
        assert_eq!(Direction::North.angular_distance(Direction::South), 4);
        assert_eq!(Direction::East.angular_distance(Direction::SouthWest), 3);
        assert_eq!(Direction::Up.angular_distance(Direction::South), 0);
    }
}
