//! Geometry primitives: [`Position`], [`Volume`] and [`Footprint`].
//!
//! The battlefield is a box of tiles. X grows east, Y grows south and Z grows
//! upwards, level 0 being the ground floor.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A tile position (or a tile offset) in the battlefield volume.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    /// Origin (0, 0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Return a position shifted by (dx, dy, dz).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// The position one level up.
    #[inline]
    pub const fn above(self) -> Self {
        self.shift(0, 0, 1)
    }

    /// The position one level down.
    #[inline]
    pub const fn below(self) -> Self {
        self.shift(0, 0, -1)
    }

    /// Squared euclidean length of the position seen as a vector.
    #[inline]
    pub const fn length_squared(self) -> i32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    /// Same order as [`Volume::index`]: level, then row, then column.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.z
            .cmp(&other.z)
            .then(self.y.cmp(&other.y))
            .then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add for Position {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Position {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Position {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<i32> for Position {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

// ---------------------------------------------------------------------------
// Volume
// ---------------------------------------------------------------------------

/// The battlefield box: every position with `0 <= x < size.x`,
/// `0 <= y < size.y` and `0 <= z < size.z`.
///
/// The size is fixed for the duration of a battle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Volume {
    size: Position,
}

impl Volume {
    /// Create a volume of `x × y × z` tiles. Negative sizes are clamped to
    /// zero.
    #[inline]
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self {
            size: Position::new(x.max(0), y.max(0), z.max(0)),
        }
    }

    /// Size as a `Position` (x = columns, y = rows, z = levels).
    #[inline]
    pub fn size(self) -> Position {
        self.size
    }

    /// Number of columns (east-west extent).
    #[inline]
    pub fn width(self) -> i32 {
        self.size.x
    }

    /// Number of rows (north-south extent).
    #[inline]
    pub fn length(self) -> i32 {
        self.size.y
    }

    /// Number of levels.
    #[inline]
    pub fn height(self) -> i32 {
        self.size.z
    }

    /// Total number of tiles.
    #[inline]
    pub fn len(self) -> usize {
        (self.size.x as usize) * (self.size.y as usize) * (self.size.z as usize)
    }

    /// Whether the volume holds no tile at all.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Whether `p` lies inside the volume.
    #[inline]
    pub fn contains(self, p: Position) -> bool {
        p.x >= 0
            && p.x < self.size.x
            && p.y >= 0
            && p.y < self.size.y
            && p.z >= 0
            && p.z < self.size.z
    }

    /// Whether the whole `n × n` footprint anchored at `p` lies inside the
    /// volume.
    #[inline]
    pub fn contains_footprint(self, p: Position, n: i32) -> bool {
        self.contains(p) && self.contains(p.shift(n - 1, n - 1, 0))
    }

    /// Linear tile index (level-major, then row, then column). `None` if the
    /// position is outside the volume.
    #[inline]
    pub fn index(self, p: Position) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        let (w, l) = (self.size.x as usize, self.size.y as usize);
        Some(p.z as usize * l * w + p.y as usize * w + p.x as usize)
    }

    /// Convert a linear index back to a position.
    #[inline]
    pub fn position(self, idx: usize) -> Position {
        let (w, l) = (self.size.x.max(1) as usize, self.size.y.max(1) as usize);
        let z = idx / (w * l);
        let rem = idx % (w * l);
        Position::new((rem % w) as i32, (rem / w) as i32, z as i32)
    }

    /// Iterator over every position in index order.
    #[inline]
    pub fn iter(self) -> VolumeIter {
        VolumeIter {
            volume: self,
            next: 0,
        }
    }
}

impl IntoIterator for Volume {
    type Item = Position;
    type IntoIter = VolumeIter;
    #[inline]
    fn into_iter(self) -> VolumeIter {
        self.iter()
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.size.x, self.size.y, self.size.z)
    }
}

/// Index-order iterator over the positions of a [`Volume`].
#[derive(Clone, Debug)]
pub struct VolumeIter {
    volume: Volume,
    next: usize,
}

impl Iterator for VolumeIter {
    type Item = Position;

    #[inline]
    fn next(&mut self) -> Option<Position> {
        if self.next >= self.volume.len() {
            return None;
        }
        let p = self.volume.position(self.next);
        self.next += 1;
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.volume.len().saturating_sub(self.next);
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for VolumeIter {}

// ---------------------------------------------------------------------------
// Footprint
// ---------------------------------------------------------------------------

/// The `n × n` block of tiles a unit covers, anchored at its north-west
/// corner. Small units have `n == 1`, large ones `n == 2`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Footprint {
    n: i32,
}

impl Footprint {
    /// A footprint of `n × n` tiles (`n` is at least 1).
    #[inline]
    pub fn new(n: i32) -> Self {
        Self { n: n.max(1) }
    }

    /// Side length in tiles.
    #[inline]
    pub fn side(self) -> i32 {
        self.n
    }

    /// Number of covered tiles (`n²`).
    #[inline]
    pub fn cells(self) -> i32 {
        self.n * self.n
    }

    /// Whether the footprint covers more than one tile.
    #[inline]
    pub fn is_large(self) -> bool {
        self.n > 1
    }

    /// Every covered offset, column-major from the anchor `(0, 0, 0)`.
    pub fn offsets(self) -> impl Iterator<Item = Position> {
        let n = self.n;
        (0..n).flat_map(move |x| (0..n).map(move |y| Position::new(x, y, 0)))
    }

    /// The offsets other than the anchor.
    pub fn extra_offsets(self) -> impl Iterator<Item = Position> {
        self.offsets().skip(1)
    }

    /// The offset of the corner opposite to the anchor.
    #[inline]
    pub fn far_corner(self) -> Position {
        Position::new(self.n - 1, self.n - 1, 0)
    }
}
