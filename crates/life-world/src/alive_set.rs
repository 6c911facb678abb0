//! Sparse storage of alive cells.

use life_core::Cell;
use serde::{Deserialize, Serialize};
use std::collections::hash_set;
use std::collections::HashSet;

/// The set of currently alive cells on the unbounded plane.
///
/// A cell is alive iff it is a member; there is no separate population
/// counter, so `count` can never drift from the stored cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliveSet {
    cells: HashSet<Cell>,
}

impl AliveSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Mark a cell alive. Returns `false` if it already was.
    pub fn insert(&mut self, cell: Cell) -> bool {
        self.cells.insert(cell)
    }

    /// Mark a cell dead. Returns `false` if it already was.
    pub fn remove(&mut self, cell: Cell) -> bool {
        self.cells.remove(&cell)
    }

    /// Flip a cell and return its new state
    pub fn toggle(&mut self, cell: Cell) -> bool {
        if self.cells.remove(&cell) {
            false
        } else {
            self.cells.insert(cell);
            true
        }
    }

    /// Current population
    pub fn count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn iter(&self) -> hash_set::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Alive cells sorted row by row (by `y`, then `x`)
    pub fn snapshot(&self) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self.cells.iter().copied().collect();
        cells.sort_unstable_by_key(|c| (c.y, c.x));
        cells
    }

    /// Inclusive bounding box as (min corner, max corner)
    pub fn bounds(&self) -> Option<(Cell, Cell)> {
        let mut iter = self.cells.iter();
        let first = *iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), c| {
            (
                Cell::new(min.x.min(c.x), min.y.min(c.y)),
                Cell::new(max.x.max(c.x), max.y.max(c.y)),
            )
        });
        Some((min, max))
    }
}

impl FromIterator<Cell> for AliveSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl Extend<Cell> for AliveSet {
    fn extend<I: IntoIterator<Item = Cell>>(&mut self, iter: I) {
        self.cells.extend(iter);
    }
}

impl<'a> IntoIterator for &'a AliveSet {
    type Item = &'a Cell;
    type IntoIter = hash_set::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = AliveSet::new();
        let cell = Cell::new(-4, 9);

        assert!(set.insert(cell));
        assert!(!set.insert(cell));
        assert_eq!(set.count(), 1);
        assert!(set.contains(cell));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut set: AliveSet = [Cell::new(1, 1), Cell::new(2, 2)].into_iter().collect();

        assert!(set.remove(Cell::new(1, 1)));
        assert!(!set.remove(Cell::new(1, 1)));
        assert_eq!(set.count(), 1);
        assert!(!set.remove(Cell::new(100, 100)));
        assert_eq!(set.count(), 1);
    }

    #[test]
    fn test_toggle() {
        let mut set = AliveSet::new();
        let cell = Cell::new(0, 0);

        assert!(set.toggle(cell));
        assert!(set.contains(cell));
        assert!(!set.toggle(cell));
        assert!(set.is_empty());
    }

    #[test]
    fn test_duplicates_collapse() {
        let set: AliveSet = [Cell::new(0, 0), Cell::new(0, 0), Cell::new(1, 0)]
            .into_iter()
            .collect();
        assert_eq!(set.count(), 2);
    }

    #[test]
    fn test_extreme_coordinates() {
        let mut set = AliveSet::new();
        set.insert(Cell::new(i64::MIN, i64::MAX));
        set.insert(Cell::new(i64::MAX, i64::MIN));
        assert_eq!(set.count(), 2);
        assert!(set.contains(Cell::new(i64::MIN, i64::MAX)));
    }

    #[test]
    fn test_clear() {
        let mut set: AliveSet = (0..10).map(|i| Cell::new(i, -i)).collect();
        assert_eq!(set.count(), 10);
        set.clear();
        assert_eq!(set.count(), 0);
        assert_eq!(set.bounds(), None);
    }

    #[test]
    fn test_snapshot_order_and_bounds() {
        let set: AliveSet = [Cell::new(3, 1), Cell::new(-2, 1), Cell::new(0, -5)]
            .into_iter()
            .collect();

        assert_eq!(
            set.snapshot(),
            vec![Cell::new(0, -5), Cell::new(-2, 1), Cell::new(3, 1)]
        );
        assert_eq!(set.bounds(), Some((Cell::new(-2, -5), Cell::new(3, 1))));
    }
}
