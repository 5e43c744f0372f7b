//! Automatic histogram binning.

use crate::spec::HistogramBin;

/// Largest number of unit-width bins used for integer data.
pub const MAX_AUTO_BINS: usize = 60;

/// Computes bins covering `values`.
///
/// Integer data whose range spans at most [`MAX_AUTO_BINS`] integers gets one
/// bin per integer, centered on it. Anything else uses a 1/2/5 x 10^k width
/// aiming for the Sturges bin count. Bins are `[start, end)` except the last,
/// which also holds its right edge.
#[must_use]
pub fn auto_bins(values: &[f64]) -> Vec<HistogramBin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let Some((min, max)) = min_max(&finite) else {
        return Vec::new();
    };

    let (start, width, n_bins) = if is_integer_data(&finite) && span(min, max) <= MAX_AUTO_BINS {
        (min - 0.5, 1.0, span(min, max))
    } else if max > min {
        let width = nice_width((max - min) / sturges_bins(finite.len()));
        let start = (min / width).floor() * width;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let n_bins = (((max - start) / width).ceil() as usize).max(1);
        (start, width, n_bins)
    } else {
        (min - 0.5, 1.0, 1)
    };

    let mut bins: Vec<HistogramBin> = (0..n_bins)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let i = i as f64;
            HistogramBin {
                start: start + i * width,
                end: start + (i + 1.0) * width,
                count: 0,
            }
        })
        .collect();

    for &v in &finite {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let idx = (((v - start) / width).floor().max(0.0) as usize).min(n_bins - 1);
        bins[idx].count += 1;
    }
    bins
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

fn is_integer_data(values: &[f64]) -> bool {
    values.iter().all(|v| v.fract() == 0.0)
}

/// Number of integers in `[min, max]`, saturating for huge ranges.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn span(min: f64, max: f64) -> usize {
    let width = max - min + 1.0;
    if width >= usize::MAX as f64 {
        return usize::MAX;
    }
    width as usize
}

#[allow(clippy::cast_precision_loss)]
fn sturges_bins(n: usize) -> f64 {
    ((n as f64).log2() + 1.0).ceil().max(1.0)
}

/// Rounds `raw` up to the nearest 1, 2 or 5 times a power of ten.
fn nice_width(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let scaled = raw / magnitude;
    let factor = if scaled <= 1.0 {
        1.0
    } else if scaled <= 2.0 {
        2.0
    } else if scaled <= 5.0 {
        5.0
    } else {
        10.0
    };
    factor * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_values() {
        assert!(auto_bins(&[]).is_empty());
        assert!(auto_bins(&[f64::NAN]).is_empty());
    }

    #[test]
    fn test_integer_unit_bins() {
        let bins = auto_bins(&[2.0, 5.0, 2.0, 3.0]);
        assert_eq!(bins.len(), 4);
        assert_relative_eq!(bins[0].start, 1.5);
        assert_relative_eq!(bins[3].end, 5.5);
        let counts: Vec<usize> = bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![2, 1, 0, 1]);
    }

    #[test]
    fn test_single_value() {
        let bins = auto_bins(&[7.0, 7.0, 7.0]);
        assert_eq!(bins.len(), 1);
        assert_relative_eq!(bins[0].center(), 7.0);
        assert_eq!(bins[0].count, 3);

        let bins = auto_bins(&[0.25]);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 1);
    }

    #[test]
    fn test_wide_range_uses_nice_width() {
        let values: Vec<f64> = (0..1000).map(|i| f64::from(i) * 7.0).collect();
        let bins = auto_bins(&values);
        // Sturges gives 11 bins of ~636, rounded up to 1000.
        assert_relative_eq!(bins[0].width(), 1000.0);
        assert_eq!(bins.len(), 7);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        assert!(bins.last().unwrap().end >= 6993.0);
    }

    #[test]
    fn test_max_lands_in_last_bin() {
        let bins = auto_bins(&[0.0, 0.5, 1.0]);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
        assert_relative_eq!(bins.last().unwrap().end, 1.0);
    }

    #[test]
    fn test_nice_width() {
        assert_relative_eq!(nice_width(0.7), 1.0);
        assert_relative_eq!(nice_width(1.3), 2.0);
        assert_relative_eq!(nice_width(3.2), 5.0);
        assert_relative_eq!(nice_width(61.0), 100.0);
    }
}
