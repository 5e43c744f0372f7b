//! Named-column access over row types.
//!
//! Chart builders address data by column name (`"label_id"`, `"count"`, ...)
//! the same way for every aggregate shape. Each row type implements
//! [`Record`] to expose its columns.

use std::fmt;

/// A single cell value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field<'a> {
    /// Unsigned integer column (ids, counts, pixel totals).
    UInt(u64),
    /// Floating point column.
    Float(f64),
    /// Text column (names, capture ids).
    Text(&'a str),
}

impl Field<'_> {
    /// Returns the numeric value, or `None` for text cells.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Field::UInt(v) => Some(v as f64),
            Field::Float(v) => Some(v),
            Field::Text(_) => None,
        }
    }

    /// Returns true if the value is an integer.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        match *self {
            Field::UInt(_) => true,
            Field::Float(v) => v.fract() == 0.0,
            Field::Text(_) => false,
        }
    }
}

impl fmt::Display for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::UInt(v) => write!(f, "{v}"),
            Field::Float(v) => write!(f, "{v}"),
            Field::Text(s) => f.write_str(s),
        }
    }
}

/// Trait for rows whose columns can be looked up by name.
pub trait Record {
    /// Column names exposed by this row type.
    const COLUMNS: &'static [&'static str];

    /// Returns the value of `column`, or `None` if the row has no such column.
    fn field(&self, column: &str) -> Option<Field<'_>>;
}

impl Record for crate::table::ObjectRecord<'_> {
    const COLUMNS: &'static [&'static str] = &[
        "capture_id",
        "label_id",
        "label_name",
        "instance_id",
        "visible_pixels",
    ];

    fn field(&self, column: &str) -> Option<Field<'_>> {
        match column {
            "capture_id" => Some(Field::Text(self.capture_id)),
            "label_id" => Some(Field::UInt(u64::from(self.label_id))),
            "label_name" => Some(Field::Text(self.label_name)),
            "instance_id" => Some(Field::UInt(self.instance_id)),
            "visible_pixels" => Some(Field::UInt(self.visible_pixels)),
            _ => None,
        }
    }
}
