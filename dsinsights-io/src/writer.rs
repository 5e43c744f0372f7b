//! CSV writers for count aggregates.

use crate::Result;
use dsinsights_core::{CaptureCount, TotalCount};
use std::io::Write;

/// Quotes a CSV text cell when it contains separators or quotes.
fn csv_text(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Writer for table and aggregate CSV output.
pub struct TableWriter<W: Write> {
    writer: W,
}

impl<W: Write> TableWriter<W> {
    /// Wraps an arbitrary writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes total counts per label.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_total_counts_csv(&mut self, totals: &[TotalCount]) -> Result<()> {
        writeln!(self.writer, "label_id,label_name,count")?;
        for t in totals {
            writeln!(
                self.writer,
                "{},{},{}",
                t.label_id,
                csv_text(&t.label_name),
                t.count
            )?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Writes object counts per capture.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_capture_counts_csv(&mut self, counts: &[CaptureCount]) -> Result<()> {
        writeln!(self.writer, "capture_id,count")?;
        for c in counts {
            writeln!(self.writer, "{},{}", csv_text(&c.capture_id), c.count)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Returns the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_capture_counts_csv() {
        let mut writer = TableWriter::new(Vec::new());
        let counts = vec![
            CaptureCount {
                capture_id: "c1".to_string(),
                count: 2,
            },
            CaptureCount {
                capture_id: "shot,3".to_string(),
                count: 5,
            },
        ];
        writer.write_capture_counts_csv(&counts).unwrap();
        let content = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(content, "capture_id,count\nc1,2\n\"shot,3\",5\n");
    }

    #[test]
    fn test_write_total_counts_csv() {
        let mut writer = TableWriter::new(Vec::new());
        let totals = vec![TotalCount {
            label_id: 7,
            label_name: "cube".to_string(),
            count: 12,
        }];
        writer.write_total_counts_csv(&totals).unwrap();
        let content = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(content, "label_id,label_name,count\n7,cube,12\n");
    }
}
