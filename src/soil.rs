//! Soil moisture profile derived from the site dataset.
//!
//! The dataset stores depth below the surface as a positive value together
//! with the initial soil moisture as a fraction of saturation (`slmstr`).
//! The engine instead wants a vertical stack built from the bottom up, so
//! depths are negated and the layers reordered deepest-first on load.

use crate::errors::{RunError, RunResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One soil layer: depth (m, negative below the surface) and initial soil
/// moisture as a fraction of saturation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilLayer {
    pub depth: f64,
    pub slmstr: f64,
}

/// Vertical soil moisture profile, deepest layer first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilProfile {
    layers: Vec<SoilLayer>,
}

impl SoilProfile {
    /// Build a profile from `(depth, slmstr)` records with positive depths.
    ///
    /// Depths are negated and the layers sorted ascending by the negated
    /// depth, so the deepest layer (most negative) comes first. An empty
    /// record set or a duplicated depth is an [`RunError::IOFailure`].
    pub fn from_records(records: Vec<(f64, f64)>) -> RunResult<Self> {
        if records.is_empty() {
            return Err(RunError::IOFailure(
                "soil moisture dataset has no layers".to_string(),
            ));
        }
        let mut layers: Vec<SoilLayer> = records
            .into_iter()
            .map(|(depth, slmstr)| SoilLayer {
                depth: -depth,
                slmstr,
            })
            .collect();
        layers.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        for pair in layers.windows(2) {
            if pair[0].depth == pair[1].depth {
                return Err(RunError::IOFailure(format!(
                    "duplicate soil layer depth {}",
                    -pair[0].depth
                )));
            }
        }
        Ok(Self { layers })
    }

    /// Load the profile from a CSV dataset with `depth` and `slmstr` columns.
    pub fn from_csv(path: &Path) -> RunResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            RunError::IOFailure(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_records(parse_dataset(&contents)?)
    }

    /// Number of soil layers (the engine's `NZG`).
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layers(&self) -> &[SoilLayer] {
        &self.layers
    }

    /// Comma-joined layer depths, deepest first (the engine's `SLZ`).
    pub fn depth_string(&self) -> String {
        join_column(self.layers.iter().map(|l| l.depth))
    }

    /// Comma-joined moisture fractions in layer order (the engine's `SLMSTR`).
    pub fn moisture_string(&self) -> String {
        join_column(self.layers.iter().map(|l| l.slmstr))
    }
}

fn join_column(values: impl Iterator<Item = f64>) -> String {
    values
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse the raw dataset: a header naming the `depth` and `slmstr` columns
/// followed by one comma-separated record per layer.
fn parse_dataset(contents: &str) -> RunResult<Vec<(f64, f64)>> {
    let mut lines = contents.lines();
    let header = lines
        .next()
        .ok_or_else(|| RunError::IOFailure("soil moisture dataset is empty".to_string()))?;

    let columns: Vec<&str> = header.split(',').map(str::trim).collect();
    let depth_col = column_index(&columns, "depth")?;
    let slmstr_col = column_index(&columns, "slmstr")?;

    let mut records = Vec::new();
    for (number, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let depth = parse_field(&fields, depth_col, "depth", number + 2)?;
        let slmstr = parse_field(&fields, slmstr_col, "slmstr", number + 2)?;
        records.push((depth, slmstr));
    }
    Ok(records)
}

fn column_index(columns: &[&str], name: &str) -> RunResult<usize> {
    columns
        .iter()
        .position(|c| *c == name)
        .ok_or_else(|| RunError::IOFailure(format!("dataset is missing a {name:?} column")))
}

fn parse_field(fields: &[&str], index: usize, name: &str, line: usize) -> RunResult<f64> {
    let raw = fields.get(index).ok_or_else(|| {
        RunError::IOFailure(format!("line {line}: missing {name} field"))
    })?;
    raw.parse().map_err(|_| {
        RunError::IOFailure(format!("line {line}: cannot parse {name} value {raw:?}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    #[test]
    fn records_are_negated_and_sorted_deepest_first() {
        let profile = SoilProfile::from_records(vec![(10.0, 0.2), (30.0, 0.3)]).unwrap();
        assert_eq!(profile.len(), 2);
        assert_eq!(profile.layers()[0].depth, -30.0);
        assert!(is_close!(profile.layers()[0].slmstr, 0.3));
        assert_eq!(profile.layers()[1].depth, -10.0);
        assert!(is_close!(profile.layers()[1].slmstr, 0.2));

        assert_eq!(profile.depth_string(), "-30,-10");
        assert_eq!(profile.moisture_string(), "0.3,0.2");
    }

    #[test]
    fn empty_records_fail() {
        let err = SoilProfile::from_records(vec![]).unwrap_err();
        assert!(matches!(err, RunError::IOFailure(_)));
    }

    #[test]
    fn duplicate_depths_fail_loudly() {
        let err = SoilProfile::from_records(vec![(10.0, 0.2), (10.0, 0.3)]).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn parses_dataset_with_extra_columns() {
        let records = parse_dataset("site,depth,slmstr\numbs,0.1,0.24\numbs,0.4,0.31\n").unwrap();
        assert_eq!(records, vec![(0.1, 0.24), (0.4, 0.31)]);
    }

    #[test]
    fn header_only_dataset_fails() {
        let records = parse_dataset("depth,slmstr\n").unwrap();
        let err = SoilProfile::from_records(records).unwrap_err();
        assert!(matches!(err, RunError::IOFailure(_)));
    }

    #[test]
    fn missing_column_fails() {
        let err = parse_dataset("depth,moisture\n0.1,0.24\n").unwrap_err();
        assert!(err.to_string().contains("slmstr"));
    }

    #[test]
    fn unparseable_value_reports_line() {
        let err = parse_dataset("depth,slmstr\n0.1,n/a\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn missing_file_is_an_io_failure() {
        let err = SoilProfile::from_csv(Path::new("no/such/dataset.csv")).unwrap_err();
        assert!(matches!(err, RunError::IOFailure(_)));
    }
}
