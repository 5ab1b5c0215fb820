//! Sweep outcome aggregation and the JSON report.

use std::fs;
use std::io;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a report could not be produced.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One mismatching pair, rendered for humans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mismatch {
    pub left: String,
    pub right: String,
    pub software: String,
    pub hardware: String,
}

/// Counters for one exponent band of the left operand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BandStats {
    pub pairs: u64,
    pub mismatches: u64,
    /// First few mismatches kept verbatim.
    pub samples: Vec<Mismatch>,
}

/// Outcome of one operation sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepSummary {
    pub operation: String,
    pub pairs: u64,
    pub mismatches: u64,
    /// Keyed by the left operand's biased exponent field.
    pub bands: FxHashMap<u32, BandStats>,
}

impl SweepSummary {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            pairs: 0,
            mismatches: 0,
            bands: FxHashMap::default(),
        }
    }

    /// Folds a worker's partial result into this summary.
    pub fn absorb(&mut self, other: SweepSummary, keep: usize) {
        self.pairs += other.pairs;
        self.mismatches += other.mismatches;
        for (band, stats) in other.bands {
            let entry = self.bands.entry(band).or_default();
            entry.pairs += stats.pairs;
            entry.mismatches += stats.mismatches;
            for sample in stats.samples {
                if entry.samples.len() >= keep {
                    break;
                }
                entry.samples.push(sample);
            }
        }
    }

    /// Accounts a batch of matching pairs in one band.
    pub fn record_pairs(&mut self, band: u32, count: u64) {
        self.pairs += count;
        self.bands.entry(band).or_default().pairs += count;
    }

    pub fn record(&mut self, band: u32, mismatch: Option<Mismatch>, keep: usize) {
        self.pairs += 1;
        let stats = self.bands.entry(band).or_default();
        stats.pairs += 1;
        if let Some(mismatch) = mismatch {
            self.mismatches += 1;
            stats.mismatches += 1;
            if stats.samples.len() < keep {
                stats.samples.push(mismatch);
            }
        }
    }
}

/// Full run report, one summary per operation swept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub summaries: Vec<SweepSummary>,
}

impl RunReport {
    pub fn total_mismatches(&self) -> u64 {
        self.summaries.iter().map(|s| s.mismatches).sum()
    }

    pub fn write_json(&self, path: &Path) -> Result<(), ReportError> {
        let encoded = serde_json::to_string_pretty(self)?;
        fs::write(path, encoded).map_err(|source| ReportError::Write {
            path: path.display().to_string(),
            source,
        })
    }

    /// Per-band table on stdout, worst bands first.
    pub fn print_tables(&self) {
        for summary in &self.summaries {
            println!(
                "{:<14} {:>12} pairs {:>8} mismatches",
                summary.operation, summary.pairs, summary.mismatches
            );
            if summary.mismatches == 0 {
                continue;
            }

            let mut bands: Vec<_> = summary
                .bands
                .iter()
                .filter(|(_, stats)| stats.mismatches > 0)
                .collect();
            bands.sort_by_key(|(band, stats)| (core::cmp::Reverse(stats.mismatches), **band));

            for (band, stats) in bands {
                println!(
                    "    band {band:>2}: {} of {} pairs",
                    stats.mismatches, stats.pairs
                );
                for sample in &stats.samples {
                    println!(
                        "        {} . {} -> software {} hardware {}",
                        sample.left, sample.right, sample.software, sample.hardware
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mismatch() -> Mismatch {
        Mismatch {
            left: "0x3c00".into(),
            right: "0x3c01".into(),
            software: "0x4000".into(),
            hardware: "0x4001".into(),
        }
    }

    #[test]
    fn absorb_caps_samples_and_sums_counters() {
        let mut total = SweepSummary::new("add");
        for _ in 0..4 {
            let mut partial = SweepSummary::new("add");
            partial.record(15, Some(mismatch()), 8);
            partial.record(15, None, 8);
            total.absorb(partial, 2);
        }

        assert_eq!(total.pairs, 8);
        assert_eq!(total.mismatches, 4);
        let band = &total.bands[&15];
        assert_eq!(band.mismatches, 4);
        assert_eq!(band.samples.len(), 2);
    }

    #[test]
    fn report_counts_across_operations() {
        let mut add = SweepSummary::new("add");
        add.record(3, Some(mismatch()), 1);
        let mul = SweepSummary::new("mul");

        let report = RunReport {
            summaries: vec![add, mul],
        };
        assert_eq!(report.total_mismatches(), 1);
    }
}
