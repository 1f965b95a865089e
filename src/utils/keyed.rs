//! Insertion ordered list of items with unique keys.

// -------------------------------------------------------------------------------------------------

/// An item which is identified by a key within a [`KeyedList`].
pub trait Keyed {
    type Key: PartialEq + Copy;

    fn key(&self) -> Self::Key;
}

// -------------------------------------------------------------------------------------------------

/// Ordered, unique-by-key list with insertion order iteration.
///
/// Lookups are linear scans: zones hold a few dozen items at most, and insertion order must be
/// preserved for a deterministic output.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedList<T: Keyed> {
    items: Vec<T>,
}

impl<T: Keyed> Default for KeyedList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Keyed> KeyedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the item with the same key in place, or appends it. Returns the item's position.
    pub fn upsert(&mut self, item: T) -> usize {
        if let Some(position) = self.position(item.key()) {
            self.items[position] = item;
            position
        } else {
            self.items.push(item);
            self.items.len() - 1
        }
    }

    pub fn position(&self, key: T::Key) -> Option<usize> {
        self.items.iter().position(|item| item.key() == key)
    }

    pub fn get(&self, key: T::Key) -> Option<&T> {
        self.items.iter().find(|item| item.key() == key)
    }

    pub fn remove(&mut self, key: T::Key) -> Option<T> {
        self.position(key).map(|position| self.items.remove(position))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Entry(u8, i32);

    impl Keyed for Entry {
        type Key = u8;
        fn key(&self) -> u8 {
            self.0
        }
    }

    #[test]
    fn upsert_keeps_position() {
        let mut list = KeyedList::new();
        assert_eq!(list.upsert(Entry(3, 1)), 0);
        assert_eq!(list.upsert(Entry(1, 2)), 1);
        assert_eq!(list.upsert(Entry(3, 5)), 0);
        assert_eq!(list.as_slice(), &[Entry(3, 5), Entry(1, 2)]);
    }

    #[test]
    fn lookup_and_remove() {
        let mut list = KeyedList::new();
        list.upsert(Entry(1, 10));
        list.upsert(Entry(2, 20));
        assert_eq!(list.position(2), Some(1));
        assert_eq!(list.position(7), None);
        assert_eq!(list.get(1), Some(&Entry(1, 10)));
        assert_eq!(list.remove(1), Some(Entry(1, 10)));
        assert_eq!(list.remove(1), None);
        assert_eq!(list.len(), 1);
        list.clear();
        assert!(list.is_empty());
    }
}
