//! Ordered collection with stable row keys
//!
//! Rows are addressed by a [`RowKey`] assigned when they are appended, so a
//! removal never hits the wrong row after the list shifts.

use std::fmt;

/// Synthetic identity of a row, unique within its list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowKey(u64);

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row-{}", self.0)
    }
}

/// Ordered list whose rows keep their key for life
#[derive(Debug)]
pub struct KeyedList<T> {
    rows: Vec<(RowKey, T)>,
    next_key: u64,
}

impl<T> KeyedList<T> {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            next_key: 0,
        }
    }

    /// Append a row and return its key
    pub fn push(&mut self, value: T) -> RowKey {
        let key = RowKey(self.next_key);
        self.next_key += 1;
        self.rows.push((key, value));
        key
    }

    /// Remove the row with `key`, returning its value
    pub fn remove(&mut self, key: RowKey) -> Option<T> {
        let index = self.rows.iter().position(|(k, _)| *k == key)?;
        Some(self.rows.remove(index).1)
    }

    pub fn get(&self, key: RowKey) -> Option<&T> {
        self.rows.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: RowKey) -> Option<&mut T> {
        self.rows
            .iter_mut()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keys in row order
    pub fn keys(&self) -> impl Iterator<Item = RowKey> + '_ {
        self.rows.iter().map(|(k, _)| *k)
    }

    /// Values in row order
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.rows.iter().map(|(_, v)| v)
    }

    /// `(key, value)` pairs in row order
    pub fn iter(&self) -> impl Iterator<Item = (RowKey, &T)> + '_ {
        self.rows.iter().map(|(k, v)| (*k, v))
    }

    /// Drop every row; keys are never reused
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

impl<T> Default for KeyedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for KeyedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.push(value);
        }
        list
    }
}
