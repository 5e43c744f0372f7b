//! Columnar storage for rendered object annotations.
//!
//! `ObjectTable` stores one row per labeled object instance in parallel
//! vectors (structure of arrays). Every capture contributes zero or more
//! rows; the table is immutable once loaded by a capture source.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A table of rendered object instances stored column-wise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectTable {
    /// Capture (scene snapshot) the object was observed in.
    pub capture_id: Vec<String>,
    /// Numeric label identifier.
    pub label_id: Vec<u32>,
    /// Human readable label name.
    pub label_name: Vec<String>,
    /// Instance identifier within the capture.
    pub instance_id: Vec<u64>,
    /// Number of pixels of the object visible in the capture.
    pub visible_pixels: Vec<u64>,
}

/// A borrowed view of one table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectRecord<'a> {
    pub capture_id: &'a str,
    pub label_id: u32,
    pub label_name: &'a str,
    pub instance_id: u64,
    pub visible_pixels: u64,
}

impl ObjectTable {
    /// Creates a new empty table with specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capture_id: Vec::with_capacity(capacity),
            label_id: Vec::with_capacity(capacity),
            label_name: Vec::with_capacity(capacity),
            instance_id: Vec::with_capacity(capacity),
            visible_pixels: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of object rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.capture_id.len()
    }

    /// Returns true if the table holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.capture_id.is_empty()
    }

    /// Clears all columns.
    pub fn clear(&mut self) {
        self.capture_id.clear();
        self.label_id.clear();
        self.label_name.clear();
        self.instance_id.clear();
        self.visible_pixels.clear();
    }

    /// Appends all rows from another table to this one.
    pub fn append(&mut self, other: &ObjectTable) {
        self.capture_id.extend_from_slice(&other.capture_id);
        self.label_id.extend_from_slice(&other.label_id);
        self.label_name.extend_from_slice(&other.label_name);
        self.instance_id.extend_from_slice(&other.instance_id);
        self.visible_pixels.extend_from_slice(&other.visible_pixels);
    }

    /// Pushes a single object row.
    pub fn push(
        &mut self,
        capture_id: impl Into<String>,
        label_id: u32,
        label_name: impl Into<String>,
        instance_id: u64,
        visible_pixels: u64,
    ) {
        self.capture_id.push(capture_id.into());
        self.label_id.push(label_id);
        self.label_name.push(label_name.into());
        self.instance_id.push(instance_id);
        self.visible_pixels.push(visible_pixels);
    }

    /// Returns the row at `index`, if any.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<ObjectRecord<'_>> {
        if index >= self.len() {
            return None;
        }
        Some(ObjectRecord {
            capture_id: &self.capture_id[index],
            label_id: self.label_id[index],
            label_name: &self.label_name[index],
            instance_id: self.instance_id[index],
            visible_pixels: self.visible_pixels[index],
        })
    }

    /// Iterates over all rows in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = ObjectRecord<'_>> + '_ {
        (0..self.len()).filter_map(move |i| self.row(i))
    }

    /// Iterates over rows whose label name equals `label`.
    pub fn iter_label<'a>(&'a self, label: &'a str) -> impl Iterator<Item = ObjectRecord<'a>> + 'a {
        self.iter().filter(move |r| r.label_name == label)
    }

    /// Returns the number of distinct captures with at least one object.
    #[must_use]
    pub fn capture_count(&self) -> usize {
        let mut ids: Vec<&str> = self.capture_id.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }
}

impl<'a> FromIterator<ObjectRecord<'a>> for ObjectTable {
    fn from_iter<I: IntoIterator<Item = ObjectRecord<'a>>>(iter: I) -> Self {
        let mut table = ObjectTable::default();
        for r in iter {
            table.push(
                r.capture_id,
                r.label_id,
                r.label_name,
                r.instance_id,
                r.visible_pixels,
            );
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_table_operations() {
        let mut table = ObjectTable::with_capacity(4);
        assert!(table.is_empty());

        table.push("c1", 1, "cube", 7, 120);
        assert_eq!(table.len(), 1);
        assert_eq!(table.label_name[0], "cube");

        table.push("c1", 2, "sphere", 8, 45);
        table.push("c2", 1, "cube", 1, 300);
        assert_eq!(table.len(), 3);
        assert_eq!(table.capture_count(), 2);

        let row = table.row(1).unwrap();
        assert_eq!(row.capture_id, "c1");
        assert_eq!(row.label_id, 2);
        assert_eq!(row.visible_pixels, 45);
        assert!(table.row(3).is_none());

        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_append_and_collect() {
        let mut a = ObjectTable::default();
        a.push("c1", 1, "cube", 0, 10);
        let mut b = ObjectTable::default();
        b.push("c2", 2, "sphere", 0, 20);
        b.push("c3", 1, "cube", 0, 30);

        a.append(&b);
        assert_eq!(a.len(), 3);

        let cubes: ObjectTable = a.iter_label("cube").collect();
        assert_eq!(cubes.len(), 2);
        assert_eq!(cubes.visible_pixels, vec![10, 30]);
        assert_eq!(a.iter_label("cone").count(), 0);
    }
}
