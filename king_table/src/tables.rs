//! Table pool.
//!
//! Free tables are handed out lowest id first, so the same sequence of
//! results always lands games on the same tables.

use log::warn;
use std::collections::BTreeSet;

use crate::entities::TableId;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TableAllocator {
    capacity: usize,
    available: BTreeSet<TableId>,
}

impl TableAllocator {
    /// A pool of tables `1..=capacity`, all free.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            available: (1..=capacity).collect(),
        }
    }

    /// A pool whose `used` tables are already checked out. Ids outside
    /// the pool are ignored.
    pub fn with_checked_out(capacity: usize, used: impl IntoIterator<Item = TableId>) -> Self {
        let mut allocator = Self::new(capacity);
        for table in used {
            allocator.available.remove(&table);
        }
        allocator
    }

    /// Take the lowest free table.
    pub fn checkout(&mut self) -> Option<TableId> {
        self.available.pop_first()
    }

    /// Hand a table back to the pool.
    ///
    /// Releasing a table that's already free, or that was never part of
    /// the pool, is a caller bug. It panics in debug builds and is logged
    /// and ignored otherwise.
    pub fn release(&mut self, table: TableId) {
        let released = (1..=self.capacity).contains(&table) && self.available.insert(table);
        debug_assert!(released, "table {table} released while not checked out");
        if !released {
            warn!("ignoring release of table {table}, it isn't checked out");
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_available(&self, table: TableId) -> bool {
        self.available.contains(&table)
    }

    pub fn available(&self) -> impl Iterator<Item = TableId> + '_ {
        self.available.iter().copied()
    }

    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    pub fn checked_out_count(&self) -> usize {
        self.capacity - self.available.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_lowest_first() {
        let mut tables = TableAllocator::new(3);
        assert_eq!(tables.checkout(), Some(1));
        assert_eq!(tables.checkout(), Some(2));
        assert_eq!(tables.checkout(), Some(3));
        assert_eq!(tables.checkout(), None);
        assert_eq!(tables.checked_out_count(), 3);
    }

    #[test]
    fn test_released_table_is_reused_in_order() {
        let mut tables = TableAllocator::new(3);
        let _ = tables.checkout();
        let _ = tables.checkout();
        let _ = tables.checkout();

        tables.release(3);
        tables.release(1);
        assert_eq!(tables.available().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(tables.checkout(), Some(1));
        assert_eq!(tables.checkout(), Some(3));
    }

    #[test]
    fn test_with_checked_out() {
        let tables = TableAllocator::with_checked_out(4, [2, 4]);
        assert_eq!(tables.available().collect::<Vec<_>>(), vec![1, 3]);
        assert!(!tables.is_available(2));
        assert_eq!(tables.checked_out_count(), 2);
    }

    #[test]
    fn test_with_checked_out_ignores_foreign_ids() {
        let tables = TableAllocator::with_checked_out(2, [7]);
        assert_eq!(tables.available_count(), 2);
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "released while not checked out"))]
    fn test_double_release() {
        let mut tables = TableAllocator::new(2);
        tables.release(1);
        assert_eq!(tables.available_count(), 2);
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "released while not checked out"))]
    fn test_release_out_of_range() {
        let mut tables = TableAllocator::new(2);
        let _ = tables.checkout();
        tables.release(5);
        assert_eq!(tables.available_count(), 1);
    }
}
