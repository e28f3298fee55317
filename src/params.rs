//! User-facing parameters for a single ensemble run.

use crate::errors::{RunError, RunResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Plant-functional-type taxonomy selector.
///
/// Chooses which of the two fixed PFT catalogs the run uses. The raw
/// selector string is normalised to lower case before matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Taxonomy {
    /// Site-level PFT definitions fitted at the study site.
    Umbs,
    /// The platform's standard temperate PFT definitions.
    Standard,
}

impl Taxonomy {
    /// Parse a raw selector, normalising case.
    ///
    /// Any value other than `"umbs"` or `"standard"` is an
    /// [`RunError::InvalidArgument`].
    pub fn parse(selector: &str) -> RunResult<Self> {
        match selector.to_ascii_lowercase().as_str() {
            "umbs" => Ok(Taxonomy::Umbs),
            "standard" => Ok(Taxonomy::Standard),
            other => Err(RunError::InvalidArgument(format!(
                "unknown PFT taxonomy {other:?}; expected \"umbs\" or \"standard\""
            ))),
        }
    }
}

/// Parameters for a single canopy disturbance ensemble run.
///
/// Construct with [`RunParameters::new`] and adjust the optional fields
/// through the chained setters. The struct is treated as immutable once
/// handed to [`submit_run`](crate::workflow::submit_run); validation of the
/// taxonomy selector and ensemble size happens there, before any external
/// call is made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunParameters {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Number of ensemble members. Must be positive; defaults to 1.
    pub ensemble_size: u32,
    /// Raw taxonomy selector, validated by the builder.
    pub taxonomy: String,
    /// Finite crown radius model.
    pub crown_model: bool,
    /// Nitrogen limitation on photosynthesis.
    pub n_limit_ps: bool,
    /// Nitrogen limitation on soil respiration.
    pub n_limit_soil: bool,
    /// Multiple-scattering radiative transfer (instead of two-stream).
    pub multiple_scatter: bool,
    /// Leaf trait plasticity with canopy depth.
    pub trait_plasticity: bool,
}

impl RunParameters {
    /// Create run parameters with default ensemble size and all
    /// biophysical toggles off.
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        taxonomy: impl Into<String>,
    ) -> Self {
        Self {
            start_date,
            end_date,
            ensemble_size: 1,
            taxonomy: taxonomy.into(),
            crown_model: false,
            n_limit_ps: false,
            n_limit_soil: false,
            multiple_scatter: false,
            trait_plasticity: false,
        }
    }

    /// Set the number of ensemble members.
    pub fn with_ensemble_size(&mut self, size: u32) -> &mut Self {
        self.ensemble_size = size;
        self
    }

    /// Enable or disable the finite crown radius model.
    pub fn with_crown_model(&mut self, enabled: bool) -> &mut Self {
        self.crown_model = enabled;
        self
    }

    /// Enable or disable nitrogen limitation on photosynthesis.
    pub fn with_n_limit_ps(&mut self, enabled: bool) -> &mut Self {
        self.n_limit_ps = enabled;
        self
    }

    /// Enable or disable nitrogen limitation on soil respiration.
    pub fn with_n_limit_soil(&mut self, enabled: bool) -> &mut Self {
        self.n_limit_soil = enabled;
        self
    }

    /// Enable or disable multiple-scattering radiative transfer.
    pub fn with_multiple_scatter(&mut self, enabled: bool) -> &mut Self {
        self.multiple_scatter = enabled;
        self
    }

    /// Enable or disable trait plasticity.
    pub fn with_trait_plasticity(&mut self, enabled: bool) -> &mut Self {
        self.trait_plasticity = enabled;
        self
    }

    /// Human-readable annotation attached to the workflow record.
    ///
    /// Fixed five-line block, one line per biophysical toggle.
    pub fn notes(&self) -> String {
        format!(
            "crown model: {}\n\
             N limit photosynthesis: {}\n\
             N limit soil respiration: {}\n\
             multiple scatter: {}\n\
             trait plasticity: {}",
            self.crown_model,
            self.n_limit_ps,
            self.n_limit_soil,
            self.multiple_scatter,
            self.trait_plasticity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates() -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(1902, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(1912, 6, 1).unwrap(),
        )
    }

    #[test]
    fn taxonomy_parse_is_case_insensitive() {
        assert_eq!(Taxonomy::parse("umbs").unwrap(), Taxonomy::Umbs);
        assert_eq!(Taxonomy::parse("UMBS").unwrap(), Taxonomy::Umbs);
        assert_eq!(Taxonomy::parse("Standard").unwrap(), Taxonomy::Standard);
        assert_eq!(Taxonomy::parse("sTaNdArD").unwrap(), Taxonomy::Standard);
    }

    #[test]
    fn taxonomy_parse_rejects_unknown_selector() {
        let err = Taxonomy::parse("tropical").unwrap_err();
        assert!(matches!(err, RunError::InvalidArgument(_)));
        assert!(err.to_string().contains("tropical"));
    }

    #[test]
    fn defaults() {
        let (start, end) = dates();
        let params = RunParameters::new(start, end, "umbs");
        assert_eq!(params.ensemble_size, 1);
        assert!(!params.crown_model);
        assert!(!params.n_limit_ps);
        assert!(!params.n_limit_soil);
        assert!(!params.multiple_scatter);
        assert!(!params.trait_plasticity);
    }

    #[test]
    fn notes_format_five_lines() {
        let (start, end) = dates();
        let mut params = RunParameters::new(start, end, "umbs");
        params.with_crown_model(true).with_multiple_scatter(true);

        let notes = params.notes();
        assert_eq!(notes.lines().count(), 5);
        assert_eq!(
            notes,
            "crown model: true\n\
             N limit photosynthesis: false\n\
             N limit soil respiration: false\n\
             multiple scatter: true\n\
             trait plasticity: false"
        );
    }
}
