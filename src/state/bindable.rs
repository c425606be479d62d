//! Ordered list that reports every structural change to a handler.
//!
//! Mutations take the handler as an argument so the owner can keep the list
//! and the structure mirroring it as two disjoint fields.

/// Receives change notifications from a `BindableList`. Every callback runs
/// after the list has been mutated and gets the list's current contents.
///
pub trait ListChangeHandler<T> {
    /// `count` items were inserted starting at `index`.
    fn on_items_added_at(&mut self, source: &[T], index: usize, count: usize);

    /// The items previously at `indices` were removed. Indices refer to the
    /// list before removal and are sorted in descending order.
    fn on_items_removed_at(&mut self, source: &[T], indices: &[usize]);

    /// The item at `index` was modified in place.
    fn on_item_changed(&mut self, source: &[T], index: usize);
}

#[derive(Clone, Debug)]
pub struct BindableList<T> {
    items: Vec<T>,
}

impl<T> Default for BindableList<T> {
    fn default() -> Self {
        BindableList { items: vec![] }
    }
}

impl<T> BindableList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn position<P: FnMut(&T) -> bool>(&self, predicate: P) -> Option<usize> {
        self.items.iter().position(predicate)
    }

    /// Append one item.
    ///
    pub fn push(&mut self, item: T, handler: &mut impl ListChangeHandler<T>) {
        let index = self.items.len();
        self.insert(index, item, handler);
    }

    /// Append every item, reported as a single insertion.
    ///
    pub fn extend(&mut self, items: Vec<T>, handler: &mut impl ListChangeHandler<T>) {
        if items.is_empty() {
            return;
        }
        let index = self.items.len();
        let count = items.len();
        self.items.extend(items);
        handler.on_items_added_at(&self.items, index, count);
    }

    /// Insert one item at `index`, clamped to the list length.
    ///
    pub fn insert(&mut self, index: usize, item: T, handler: &mut impl ListChangeHandler<T>) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        handler.on_items_added_at(&self.items, index, 1);
    }

    /// Remove the items at the given positions. Out-of-range and duplicate
    /// positions are ignored. Returns the removed items in ascending
    /// position order.
    ///
    pub fn remove_at(&mut self, indices: &[usize], handler: &mut impl ListChangeHandler<T>) -> Vec<T> {
        let mut sorted: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|i| *i < self.items.len())
            .collect();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();
        if sorted.is_empty() {
            return vec![];
        }
        let mut removed: Vec<T> = sorted.iter().map(|i| self.items.remove(*i)).collect();
        removed.reverse();
        handler.on_items_removed_at(&self.items, &sorted);
        removed
    }

    /// Modify the item at `index` in place. Returns false if out of range.
    ///
    pub fn update<F: FnOnce(&mut T)>(
        &mut self,
        index: usize,
        handler: &mut impl ListChangeHandler<T>,
        f: F,
    ) -> bool {
        match self.items.get_mut(index) {
            Some(item) => {
                f(item);
                handler.on_item_changed(&self.items, index);
                true
            }
            None => false,
        }
    }
}
