//! Unit-width histogram of a per-trial value (pulls to target, featured 5★ count).

use std::io;
use std::path::Path;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistogramBin {
    pub value: u32,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// One bin per integer from the minimum to the maximum value, empty bins included.
    pub fn from_values(values: &[u32]) -> Self {
        let (Some(min), Some(max)) = (values.iter().min(), values.iter().max()) else {
            return Self::default();
        };
        let mut counts = vec![0usize; (max - min) as usize + 1];
        for &v in values {
            counts[(v - min) as usize] += 1;
        }
        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(offset, count)| HistogramBin {
                value: min + offset as u32,
                count,
            })
            .collect();
        Self { bins }
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn mode(&self) -> Option<HistogramBin> {
        self.bins
            .iter()
            .copied()
            .max_by(|a, b| a.count.cmp(&b.count).then(b.value.cmp(&a.value)))
    }

    /// Text bars, longest bar `width` characters wide.
    pub fn render(&self, width: usize) -> String {
        let peak = self.bins.iter().map(|b| b.count).max().unwrap_or(0);
        if peak == 0 {
            return String::new();
        }
        let label_width = self
            .bins
            .last()
            .map(|b| b.value.to_string().len())
            .unwrap_or(1);
        let mut out = String::new();
        for bin in &self.bins {
            let len = (bin.count * width + peak - 1) / peak;
            out.push_str(&format!(
                "{:>lw$} | {:<w$} {}\n",
                bin.value,
                "#".repeat(len),
                bin.count,
                lw = label_width,
                w = width
            ));
        }
        out
    }

    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for bin in &self.bins {
            csv_writer.serialize(bin)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn write_csv_file(&self, path: impl AsRef<Path>) -> Result<(), csv::Error> {
        let file = std::fs::File::create(path)?;
        self.write_csv(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bins_cover_min_to_max_including_gaps() {
        let hist = Histogram::from_values(&[3, 5, 5, 7]);
        let values: Vec<u32> = hist.bins.iter().map(|b| b.value).collect();
        assert_eq!(values, vec![3, 4, 5, 6, 7]);
        assert_eq!(hist.bins[1].count, 0);
        assert_eq!(hist.total(), 4);
        assert_eq!(hist.mode().map(|b| b.value), Some(5));
    }

    #[test]
    fn empty_values_render_nothing() {
        let hist = Histogram::from_values(&[]);
        assert!(hist.bins.is_empty());
        assert_eq!(hist.render(40), "");
    }

    #[test]
    fn peak_bin_gets_full_width() {
        let hist = Histogram::from_values(&[1, 1, 2]);
        let text = hist.render(10);
        let first = text.lines().next().unwrap();
        assert!(first.contains(&"#".repeat(10)));
    }

    #[test]
    fn csv_has_header_and_rows() {
        let hist = Histogram::from_values(&[1, 2, 2]);
        let mut buf = Vec::new();
        hist.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "value,count\n1,1\n2,2\n");
    }
}
