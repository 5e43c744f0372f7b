//! Aggregations over rendered object tables.
//!
//! All aggregates are pure functions of the table: no hidden state, and an
//! empty table (or a label that never occurs) yields an empty result rather
//! than an error.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::record::{Field, Record};
use crate::table::ObjectTable;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Metric definition id of the rendered object info metric.
pub const RENDERED_OBJECT_INFO_DEFINITION_ID: &str = "659c6e36-f9f8-4dd6-9651-4a80e51eabc4";

/// Total object count for one label.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TotalCount {
    pub label_id: u32,
    pub label_name: String,
    pub count: usize,
}

/// Number of objects observed in one capture.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CaptureCount {
    pub capture_id: String,
    pub count: usize,
}

/// Visible pixel count of one object instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PixelSample {
    pub visible_pixels: u64,
}

impl Record for TotalCount {
    const COLUMNS: &'static [&'static str] = &["label_id", "label_name", "count"];

    fn field(&self, column: &str) -> Option<Field<'_>> {
        match column {
            "label_id" => Some(Field::UInt(u64::from(self.label_id))),
            "label_name" => Some(Field::Text(&self.label_name)),
            "count" => Some(Field::UInt(self.count as u64)),
            _ => None,
        }
    }
}

impl Record for CaptureCount {
    const COLUMNS: &'static [&'static str] = &["capture_id", "count"];

    fn field(&self, column: &str) -> Option<Field<'_>> {
        match column {
            "capture_id" => Some(Field::Text(&self.capture_id)),
            "count" => Some(Field::UInt(self.count as u64)),
            _ => None,
        }
    }
}

impl Record for PixelSample {
    const COLUMNS: &'static [&'static str] = &["visible_pixels"];

    fn field(&self, column: &str) -> Option<Field<'_>> {
        match column {
            "visible_pixels" => Some(Field::UInt(self.visible_pixels)),
            _ => None,
        }
    }
}

/// Counts objects per label id, in ascending label id order.
///
/// The label name of each group is the first one seen for that id.
#[must_use]
pub fn total_counts(table: &ObjectTable) -> Vec<TotalCount> {
    let mut groups: BTreeMap<u32, (&str, usize)> = BTreeMap::new();
    for row in table.iter() {
        match groups.entry(row.label_id) {
            Entry::Vacant(e) => {
                e.insert((row.label_name, 1));
            }
            Entry::Occupied(mut e) => e.get_mut().1 += 1,
        }
    }
    groups
        .into_iter()
        .map(|(label_id, (label_name, count))| TotalCount {
            label_id,
            label_name: label_name.to_string(),
            count,
        })
        .collect()
}

/// Counts objects per capture. Captures without objects are absent.
#[must_use]
pub fn per_capture_counts(table: &ObjectTable) -> Vec<CaptureCount> {
    group_by_capture(table.capture_id.iter().map(String::as_str))
}

/// Counts objects with label name `label` per capture.
///
/// Captures with no object of that label are absent, not zero-filled.
#[must_use]
pub fn per_capture_counts_for_label(table: &ObjectTable, label: &str) -> Vec<CaptureCount> {
    group_by_capture(table.iter_label(label).map(|r| r.capture_id))
}

fn group_by_capture<'a>(capture_ids: impl Iterator<Item = &'a str>) -> Vec<CaptureCount> {
    let mut groups: BTreeMap<&str, usize> = BTreeMap::new();
    for id in capture_ids {
        *groups.entry(id).or_default() += 1;
    }
    groups
        .into_iter()
        .map(|(capture_id, count)| CaptureCount {
            capture_id: capture_id.to_string(),
            count,
        })
        .collect()
}

/// Projects the visible pixel column, optionally restricted to one label.
#[must_use]
pub fn visible_pixels(table: &ObjectTable, label: Option<&str>) -> Vec<PixelSample> {
    match label {
        Some(label) => table
            .iter_label(label)
            .map(|r| PixelSample {
                visible_pixels: r.visible_pixels,
            })
            .collect(),
        None => table
            .visible_pixels
            .iter()
            .map(|&visible_pixels| PixelSample { visible_pixels })
            .collect(),
    }
}

/// Distinct label names, ordered as in [`total_counts`].
#[must_use]
pub fn label_names(table: &ObjectTable) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for total in total_counts(table) {
        if !names.contains(&total.label_name) {
            names.push(total.label_name);
        }
    }
    names
}

/// Rendered object info of a dataset: the loaded table plus its aggregates.
#[derive(Debug, Clone, Default)]
pub struct RenderedObjectInfo {
    table: ObjectTable,
}

impl RenderedObjectInfo {
    /// Wraps a loaded table.
    #[must_use]
    pub fn new(table: ObjectTable) -> Self {
        Self { table }
    }

    /// Returns the underlying per-object table.
    #[must_use]
    pub fn raw_table(&self) -> &ObjectTable {
        &self.table
    }

    /// Number of object rows.
    #[must_use]
    pub fn num_objects(&self) -> usize {
        self.table.len()
    }

    /// Number of captures containing at least one object.
    #[must_use]
    pub fn num_captures(&self) -> usize {
        self.table.capture_count()
    }

    /// See [`total_counts`].
    #[must_use]
    pub fn total_counts(&self) -> Vec<TotalCount> {
        total_counts(&self.table)
    }

    /// See [`per_capture_counts`].
    #[must_use]
    pub fn per_capture_counts(&self) -> Vec<CaptureCount> {
        per_capture_counts(&self.table)
    }

    /// See [`per_capture_counts_for_label`].
    #[must_use]
    pub fn per_capture_counts_for_label(&self, label: &str) -> Vec<CaptureCount> {
        per_capture_counts_for_label(&self.table, label)
    }

    /// See [`visible_pixels`].
    #[must_use]
    pub fn visible_pixels(&self, label: Option<&str>) -> Vec<PixelSample> {
        visible_pixels(&self.table, label)
    }

    /// See [`label_names`].
    #[must_use]
    pub fn label_names(&self) -> Vec<String> {
        label_names(&self.table)
    }
}

impl From<ObjectTable> for RenderedObjectInfo {
    fn from(table: ObjectTable) -> Self {
        Self::new(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_sphere_table() -> ObjectTable {
        let mut table = ObjectTable::default();
        for i in 0..7u64 {
            table.push(format!("c{}", i % 3), 1, "cube", i, 100 + i);
        }
        for i in 0..3u64 {
            table.push(format!("c{i}"), 2, "sphere", 10 + i, 50);
        }
        table
    }

    #[test]
    fn test_total_counts() {
        let table = cube_sphere_table();
        let totals = total_counts(&table);
        assert_eq!(
            totals,
            vec![
                TotalCount {
                    label_id: 1,
                    label_name: "cube".into(),
                    count: 7
                },
                TotalCount {
                    label_id: 2,
                    label_name: "sphere".into(),
                    count: 3
                },
            ]
        );
        let sum: usize = totals.iter().map(|t| t.count).sum();
        assert_eq!(sum, table.len());
    }

    #[test]
    fn test_per_capture_counts_sum() {
        let table = cube_sphere_table();
        let counts = per_capture_counts(&table);
        assert_eq!(counts.len(), 3);
        assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), table.len());
    }

    #[test]
    fn test_per_capture_counts_for_label_skips_empty_captures() {
        let mut table = ObjectTable::default();
        table.push("1", 1, "cube", 0, 10);
        table.push("1", 1, "cube", 1, 10);
        table.push("2", 2, "sphere", 0, 10);
        for i in 0..5 {
            table.push("3", 1, "cube", i, 10);
        }

        let counts = per_capture_counts_for_label(&table, "cube");
        assert_eq!(counts.len(), 2);
        let mut values: Vec<usize> = counts.iter().map(|c| c.count).collect();
        values.sort_unstable();
        assert_eq!(values, vec![2, 5]);
        assert!(counts.iter().all(|c| c.capture_id != "2"));
    }

    #[test]
    fn test_unknown_label_is_empty() {
        let table = cube_sphere_table();
        assert!(per_capture_counts_for_label(&table, "cone").is_empty());
        assert!(visible_pixels(&table, Some("cone")).is_empty());
    }

    #[test]
    fn test_visible_pixels_filter() {
        let table = cube_sphere_table();
        assert_eq!(visible_pixels(&table, None).len(), 10);
        let spheres = visible_pixels(&table, Some("sphere"));
        assert_eq!(spheres.len(), 3);
        assert!(spheres.iter().all(|s| s.visible_pixels == 50));
    }

    #[test]
    fn test_empty_table() {
        let table = ObjectTable::default();
        assert!(total_counts(&table).is_empty());
        assert!(per_capture_counts(&table).is_empty());
        assert!(per_capture_counts_for_label(&table, "cube").is_empty());
        assert!(visible_pixels(&table, None).is_empty());
        assert!(label_names(&table).is_empty());
    }

    #[test]
    fn test_aggregates_are_idempotent() {
        let info = RenderedObjectInfo::new(cube_sphere_table());
        assert_eq!(info.total_counts(), info.total_counts());
        assert_eq!(info.per_capture_counts(), info.per_capture_counts());
        assert_eq!(info.visible_pixels(Some("cube")), info.visible_pixels(Some("cube")));
        assert_eq!(info.label_names(), vec!["cube".to_string(), "sphere".to_string()]);
        assert_eq!(info.num_captures(), 3);
        assert_eq!(info.num_objects(), 10);
    }

    #[test]
    fn test_first_label_name_wins() {
        let mut table = ObjectTable::default();
        table.push("c1", 4, "box", 0, 1);
        table.push("c2", 4, "crate", 0, 1);
        let totals = total_counts(&table);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].label_name, "box");
        assert_eq!(totals[0].count, 2);
    }
}
