//! Histogram computation
//!
//! Frequency tables and descriptive statistics for 8-bit images.
//!
//! A [`Histogram`] carries the 256 bin counts of one channel together
//! with pixel count, mean, lower median, population standard deviation
//! and the smallest / largest **bin count**. Note that `min` and `max`
//! describe the counts, not the intensity range of the image; use
//! [`Histogram::first_nonzero`] and [`Histogram::last_nonzero`] for the
//! occupied intensity range.

use super::{Channels, Pix};
use crate::error::Result;

/// Frequency table and statistics for one channel
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Bin counts indexed by intensity
    pub counts: [u64; 256],
    /// Sum of all counts
    pub pixels_num: u64,
    /// Intensity mean
    pub mean: f64,
    /// Smallest intensity whose cumulative count reaches `pixels_num / 2`
    pub median: u8,
    /// Population standard deviation of intensity
    pub std: f64,
    /// Smallest bin count
    pub min: u64,
    /// Largest bin count
    pub max: u64,
}

impl Histogram {
    /// Build a histogram and its statistics from raw bin counts.
    pub fn from_counts(counts: [u64; 256]) -> Self {
        let pixels_num: u64 = counts.iter().sum();
        let n = pixels_num as f64;

        let (mean, std, median) = if pixels_num == 0 {
            (0.0, 0.0, 0)
        } else {
            let mean = counts
                .iter()
                .enumerate()
                .map(|(v, &c)| v as f64 * c as f64)
                .sum::<f64>()
                / n;
            let variance = counts
                .iter()
                .enumerate()
                .map(|(v, &c)| {
                    let d = v as f64 - mean;
                    d * d * c as f64
                })
                .sum::<f64>()
                / n;

            let half = n / 2.0;
            let mut cumulative = 0u64;
            let mut median = 255u8;
            for (v, &c) in counts.iter().enumerate() {
                cumulative += c;
                if cumulative as f64 >= half {
                    median = v as u8;
                    break;
                }
            }
            (mean, variance.sqrt(), median)
        };

        let min = counts.iter().copied().min().unwrap_or(0);
        let max = counts.iter().copied().max().unwrap_or(0);

        Histogram {
            counts,
            pixels_num,
            mean,
            median,
            std,
            min,
            max,
        }
    }

    /// Lowest intensity with a nonzero count.
    pub fn first_nonzero(&self) -> Option<u8> {
        self.counts.iter().position(|&c| c != 0).map(|v| v as u8)
    }

    /// Highest intensity with a nonzero count.
    pub fn last_nonzero(&self) -> Option<u8> {
        self.counts.iter().rposition(|&c| c != 0).map(|v| v as u8)
    }

    /// Cumulative counts.
    pub fn cumulative(&self) -> [u64; 256] {
        let mut cdf = [0u64; 256];
        let mut sum = 0u64;
        for (slot, &c) in cdf.iter_mut().zip(self.counts.iter()) {
            sum += c;
            *slot = sum;
        }
        cdf
    }
}

/// Histogram of a whole image
#[derive(Debug, Clone, PartialEq)]
pub enum HistogramResult {
    /// Single-channel image
    Gray(Histogram),
    /// Color image, one histogram per channel in B, G, R order
    Bgr([Histogram; 3]),
}

impl HistogramResult {
    /// Per-channel histograms in storage order.
    pub fn channels(&self) -> &[Histogram] {
        match self {
            HistogramResult::Gray(h) => std::slice::from_ref(h),
            HistogramResult::Bgr(hs) => hs,
        }
    }
}

impl Pix {
    /// Compute the histogram of every channel.
    pub fn histogram(&self) -> HistogramResult {
        match self.channels() {
            Channels::Gray => HistogramResult::Gray(channel_histogram(self.data(), 0, 1)),
            Channels::Bgr => HistogramResult::Bgr([
                channel_histogram(self.data(), 0, 3),
                channel_histogram(self.data(), 1, 3),
                channel_histogram(self.data(), 2, 3),
            ]),
        }
    }

    /// Compute the histogram of a grayscale image.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnsupportedChannels`] for color input.
    pub fn gray_histogram(&self) -> Result<Histogram> {
        self.check_gray()?;
        Ok(channel_histogram(self.data(), 0, 1))
    }
}

fn channel_histogram(data: &[u8], offset: usize, step: usize) -> Histogram {
    let mut counts = [0u64; 256];
    for &v in data.iter().skip(offset).step_by(step) {
        counts[v as usize] += 1;
    }
    Histogram::from_counts(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_small() {
        // values: 10 x2, 20 x1, 30 x1
        let pix = Pix::from_vec(2, 2, Channels::Gray, vec![10, 10, 20, 30]).unwrap();
        let h = pix.gray_histogram().unwrap();
        assert_eq!(h.pixels_num, 4);
        assert!((h.mean - 17.5).abs() < 1e-12);
        assert_eq!(h.median, 10);
        let var: f64 = (2.0 * 7.5f64.powi(2) + 2.5f64.powi(2) + 12.5f64.powi(2)) / 4.0;
        assert!((h.std - var.sqrt()).abs() < 1e-12);
        assert_eq!(h.max, 2);
        assert_eq!(h.min, 0);
        assert_eq!(h.first_nonzero(), Some(10));
        assert_eq!(h.last_nonzero(), Some(30));
    }

    #[test]
    fn test_lower_median() {
        // cumulative reaches exactly n/2 at 5
        let pix = Pix::from_vec(4, 1, Channels::Gray, vec![5, 5, 200, 200]).unwrap();
        assert_eq!(pix.gray_histogram().unwrap().median, 5);
    }

    #[test]
    fn test_color_order() {
        let mut pm = Pix::new(1, 1, Channels::Bgr).unwrap().to_mut();
        pm.set_bgr(0, 0, 1, 2, 3).unwrap();
        let pix: Pix = pm.into();
        let result = pix.histogram();
        let chans = result.channels();
        assert_eq!(chans.len(), 3);
        assert_eq!(chans[0].counts[1], 1);
        assert_eq!(chans[1].counts[2], 1);
        assert_eq!(chans[2].counts[3], 1);
        assert!(pix.gray_histogram().is_err());
    }

    #[test]
    fn test_cumulative() {
        let pix = Pix::from_vec(3, 1, Channels::Gray, vec![0, 1, 1]).unwrap();
        let cdf = pix.gray_histogram().unwrap().cumulative();
        assert_eq!(cdf[0], 1);
        assert_eq!(cdf[1], 3);
        assert_eq!(cdf[255], 3);
    }
}
