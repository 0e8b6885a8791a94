use battlescape_core::Position;

/// Search heuristic: four times the straight-line distance, rounded up.
///
/// Four is the cheapest cardinal step on ordinary floor, so the estimate
/// stays close to the real cost on open ground.
#[inline]
pub fn heuristic(a: Position, b: Position) -> i32 {
    let d = (a - b).length_squared() as f64;
    (4.0 * d.sqrt()).ceil() as i32
}

/// Chebyshev (L∞) distance in the horizontal plane.
#[inline]
pub fn chebyshev(a: Position, b: Position) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_values() {
        let o = Position::ZERO;
        assert_eq!(heuristic(o, o), 0);
        assert_eq!(heuristic(o, Position::new(5, 0, 0)), 20);
        // 4 * sqrt(2) = 5.65..
        assert_eq!(heuristic(o, Position::new(1, 1, 0)), 6);
        assert_eq!(heuristic(o, Position::new(0, 0, 1)), 4);
    }

    #[test]
    fn chebyshev_ignores_z() {
        assert_eq!(chebyshev(Position::new(1, 1, 0), Position::new(4, 3, 2)), 3);
    }
}
