// src/columns.rs

//! Column-balanced collection layout.
//!
//! A [`ColumnSet`] distributes items into ordered, fixed-capacity columns:
//! new items land in the first column with spare room, overflow grows a new
//! column on the right edge, and removals are compacted afterwards by a
//! single left-shift pass followed by trailing-empty pruning. The board and
//! the form each own an independent set with its own capacity.

/// Stable handle for one column in a [`ColumnSet`].
///
/// Handles identify the column itself, not its position: they stay valid
/// while the column exists, even as rebalancing moves items around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnId(u64);

/// One ordered run of items, never longer than its set's capacity at rest.
#[derive(Debug, Clone)]
pub struct Column<T> {
    id: ColumnId,
    items: Vec<T>,
}

impl<T> Column<T> {
    pub fn id(&self) -> ColumnId {
        self.id
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Ordered sequence of columns sharing one capacity.
#[derive(Debug, Clone)]
pub struct ColumnSet<T> {
    capacity: usize,
    columns: Vec<Column<T>>,
    next_id: u64,
}

impl<T: PartialEq> ColumnSet<T> {
    /// Creates an empty set. A capacity of zero is lifted to one so a column
    /// can always hold at least one item.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            columns: Vec::new(),
            next_id: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Total number of items across all columns.
    pub fn len(&self) -> usize {
        self.columns.iter().map(|c| c.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(|c| c.items.is_empty())
    }

    /// Items in column order, front to back within each column.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.columns.iter().flat_map(|c| c.items.iter())
    }

    /// Current column lengths, left to right.
    pub fn lengths(&self) -> Vec<usize> {
        self.columns.iter().map(|c| c.items.len()).collect()
    }

    /// The column that should receive the next item: the first one, scanning
    /// left to right, with spare capacity. When every column is full, or none
    /// exists yet, a new empty column is appended on the right and returned.
    ///
    /// The choice is a pure function of current lengths and order. Ties go to
    /// the leftmost candidate. The item append itself is the caller's move,
    /// normally through [`ColumnSet::insert`].
    pub fn place(&mut self) -> ColumnId {
        if let Some(col) = self.columns.iter().find(|c| c.items.len() < self.capacity) {
            return col.id;
        }
        self.grow()
    }

    /// Appends `item` to the column chosen by [`ColumnSet::place`] and
    /// returns that column's handle.
    pub fn insert(&mut self, item: T) -> ColumnId {
        let id = self.place();
        let col = self
            .columns
            .iter_mut()
            .find(|c| c.id == id)
            .expect("place() returned a column that exists");
        col.items.push(item);
        id
    }

    /// Detaches `item` from whichever column holds it. Returns `false` when
    /// the item is not present. Compaction is deferred: the owner coalesces
    /// removals into one later [`ColumnSet::rebalance`] call.
    pub fn remove(&mut self, item: &T) -> bool {
        for col in &mut self.columns {
            if let Some(pos) = col.items.iter().position(|i| i == item) {
                col.items.remove(pos);
                return true;
            }
        }
        false
    }

    /// One compaction pass. For each adjacent pair of columns, left to right,
    /// move the front item of the right column into the left one when the
    /// left has spare room and the right is non-empty; then drop empty
    /// columns from the right edge, stopping at the first non-empty one.
    ///
    /// The shift runs exactly once per call, not to a fixed point: `[2, 7]`
    /// becomes `[3, 6]`, never `[9, 0]`. Empty columns embedded between
    /// non-empty ones are left alone. Shifting always happens before pruning.
    pub fn rebalance(&mut self) {
        for i in 0..self.columns.len().saturating_sub(1) {
            if self.columns[i].items.len() < self.capacity && !self.columns[i + 1].items.is_empty()
            {
                let moved = self.columns[i + 1].items.remove(0);
                self.columns[i].items.push(moved);
            }
        }
        self.prune_trailing_empty();
    }

    /// Handle of the column currently holding `item`.
    pub fn column_of(&self, item: &T) -> Option<ColumnId> {
        self.columns
            .iter()
            .find(|c| c.items.contains(item))
            .map(|c| c.id)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.column_of(item).is_some()
    }

    /// Drops every column. Used when a consumer rebuilds its layout
    /// wholesale instead of balancing incrementally.
    pub fn clear(&mut self) {
        self.columns.clear();
    }

    fn grow(&mut self) -> ColumnId {
        let id = ColumnId(self.next_id);
        self.next_id += 1;
        self.columns.push(Column {
            id,
            items: Vec::new(),
        });
        id
    }

    fn prune_trailing_empty(&mut self) {
        // Never removes the leftmost column, mirroring the host view that
        // always keeps one base column around.
        while self.columns.len() > 1 && self.columns.last().is_some_and(|c| c.items.is_empty()) {
            self.columns.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a set with the given lengths by inserting sequential numbers
    /// and then removing from the front columns until lengths match.
    fn set_with_lengths(capacity: usize, lengths: &[usize]) -> ColumnSet<u32> {
        let mut set = ColumnSet::new(capacity);
        let mut next = 0u32;
        for _ in 0..lengths.len() {
            for _ in 0..capacity {
                set.insert(next);
                next += 1;
            }
        }
        for (col, &want) in lengths.iter().enumerate() {
            let extra = capacity - want;
            for _ in 0..extra {
                let victim = *set.columns()[col].items().first().unwrap();
                assert!(set.remove(&victim));
            }
        }
        assert_eq!(set.lengths(), lengths);
        set
    }

    #[test]
    fn place_prefers_first_column_with_room() {
        let mut set = set_with_lengths(5, &[3, 5, 5]);
        let first = set.columns()[0].id();
        assert_eq!(set.place(), first);
        // place alone must not change contents
        assert_eq!(set.lengths(), vec![3, 5, 5]);
    }

    #[test]
    fn place_grows_on_the_right_when_all_full() {
        let mut set = set_with_lengths(5, &[5, 5, 5]);
        let new_col = set.place();
        assert_eq!(set.column_count(), 4);
        assert_eq!(set.columns().last().unwrap().id(), new_col);
        assert!(set.columns().last().unwrap().is_empty());
    }

    #[test]
    fn place_into_empty_set_creates_exactly_one_column() {
        let mut set: ColumnSet<u32> = ColumnSet::new(4);
        set.place();
        assert_eq!(set.column_count(), 1);
        set.insert(7);
        assert_eq!(set.lengths(), vec![1]);
    }

    #[test]
    fn insert_fills_each_column_to_capacity_in_order() {
        let mut set = ColumnSet::new(3);
        for n in 0..7u32 {
            set.insert(n);
        }
        assert_eq!(set.lengths(), vec![3, 3, 1]);
        let flat: Vec<u32> = set.iter().copied().collect();
        assert_eq!(flat, (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn zero_capacity_is_lifted_to_one() {
        let mut set = ColumnSet::new(0);
        set.insert(1u32);
        set.insert(2);
        assert_eq!(set.lengths(), vec![1, 1]);
    }

    #[test]
    fn remove_detaches_without_compacting() {
        let mut set = set_with_lengths(10, &[3, 7]);
        let victim = *set.columns()[0].items().first().unwrap();
        assert!(set.remove(&victim));
        assert_eq!(set.lengths(), vec![2, 7]);
        assert!(!set.remove(&victim), "second removal is a no-op");
    }

    #[test]
    fn rebalance_shifts_exactly_one_item_per_boundary() {
        let mut set = set_with_lengths(10, &[3, 7]);
        let victim = *set.columns()[0].items().first().unwrap();
        set.remove(&victim);
        set.rebalance();
        assert_eq!(set.lengths(), vec![3, 6], "single pass, not a fixed point");
    }

    #[test]
    fn rebalance_moves_the_front_item_leftward() {
        let mut set = set_with_lengths(10, &[3, 7]);
        let front_of_second = *set.columns()[1].items().first().unwrap();
        let victim = *set.columns()[0].items().first().unwrap();
        set.remove(&victim);
        set.rebalance();
        assert_eq!(set.columns()[0].items().last(), Some(&front_of_second));
    }

    #[test]
    fn rebalance_prunes_trailing_empty_columns() {
        let mut set = set_with_lengths(5, &[5, 0, 0]);
        set.rebalance();
        assert_eq!(set.lengths(), vec![5]);
    }

    #[test]
    fn rebalance_keeps_embedded_empty_columns() {
        // The shift pass feeds column 2 from column 3, so column 1 stays
        // empty but is no longer trailing and must survive pruning.
        let mut set = set_with_lengths(5, &[5, 0, 0, 3]);
        set.rebalance();
        assert_eq!(set.lengths(), vec![5, 0, 1, 2]);
    }

    #[test]
    fn rebalance_on_all_empty_leaves_one_base_column() {
        let mut set = set_with_lengths(4, &[0, 0, 0]);
        set.rebalance();
        assert_eq!(set.column_count(), 1);
        assert!(set.is_empty());
    }

    #[test]
    fn rebalance_on_zero_columns_is_a_no_op() {
        let mut set: ColumnSet<u32> = ColumnSet::new(4);
        set.rebalance();
        assert_eq!(set.column_count(), 0);
    }

    #[test]
    fn capacity_holds_after_mixed_operations() {
        let mut set = ColumnSet::new(4);
        for n in 0..13u32 {
            set.insert(n);
        }
        for n in [0u32, 5, 6, 9] {
            set.remove(&n);
        }
        set.rebalance();
        for len in set.lengths() {
            assert!(len <= set.capacity());
        }
        assert_eq!(set.len(), 9);
        // no trailing empty columns remain
        assert!(!set.columns().last().unwrap().is_empty());
    }

    #[test]
    fn column_of_tracks_items_across_rebalance() {
        let mut set = set_with_lengths(10, &[3, 7]);
        let mover = *set.columns()[1].items().first().unwrap();
        let left = set.columns()[0].id();
        let victim = *set.columns()[0].items().first().unwrap();
        set.remove(&victim);
        set.rebalance();
        assert_eq!(set.column_of(&mover), Some(left));
    }

    #[test]
    fn clear_drops_all_columns() {
        let mut set = set_with_lengths(3, &[3, 2]);
        set.clear();
        assert_eq!(set.column_count(), 0);
        assert!(set.is_empty());
        set.insert(1u32);
        assert_eq!(set.lengths(), vec![1]);
    }
}
