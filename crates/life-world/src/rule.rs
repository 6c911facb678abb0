//! The B3/S23 transition rule.

/// Next state of a cell given its current state and live-neighbor count.
///
/// A dead cell with exactly 3 neighbors is born; a live cell survives with
/// 2 or 3 neighbors. Everything else is dead next generation.
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (false, 3) | (true, 2) | (true, 3))
}
