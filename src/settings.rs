//! Run configuration fragments and the layered deep-merge.
//!
//! The final run configuration is assembled from an ordered list of JSON
//! fragments. Later layers win on key collision; merging is a deep
//! override, so a layer only needs to mention the keys it changes.

use crate::errors::{RunError, RunResult};
use crate::params::RunParameters;
use crate::pft::Pft;
use crate::soil::SoilProfile;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Top-level sections that must be populated before submission.
pub const REQUIRED_SECTIONS: [&str; 6] =
    ["workflow", "database", "pft", "run", "model", "ensemble"];

/// Connection descriptor for the platform's relational store.
///
/// Serialised into the `database` section of the run configuration. The
/// default carries the platform's stock connection values; callers may
/// override individual fields before building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    pub host: String,
    pub user: String,
    pub password: String,
    pub dbname: String,
    pub driver: String,
    pub write: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            user: "bety".to_string(),
            password: "bety".to_string(),
            dbname: "bety".to_string(),
            driver: "PostgreSQL".to_string(),
            write: true,
        }
    }
}

/// Fixed dataset ids referenced by the run inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputIds {
    pub landuse: i64,
    pub soil: i64,
    pub thsum: i64,
    pub veg: i64,
}

/// Deep-merge `overlay` into `base`.
///
/// Objects merge key by key, recursing into shared keys; any other value
/// kind replaces the base outright. Keys absent from the overlay are
/// preserved.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                deep_merge(base_map.entry(key).or_insert(Value::Null), value);
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Apply configuration layers in order, later layers overriding earlier ones.
pub fn merge_layers(layers: impl IntoIterator<Item = Value>) -> Value {
    let mut merged = Value::Object(Map::new());
    for layer in layers {
        deep_merge(&mut merged, layer);
    }
    merged
}

/// Check that every required top-level section survived the merge.
pub fn check_complete(settings: &Value) -> RunResult<()> {
    for section in REQUIRED_SECTIONS {
        if settings.get(section).is_none() {
            return Err(RunError::InvalidArgument(format!(
                "run configuration is missing the {section:?} section"
            )));
        }
    }
    Ok(())
}

/// Workflow identity and date range.
pub fn workflow_fragment(workflow_id: i64, start: NaiveDate, end: NaiveDate) -> Value {
    json!({
        "workflow": {
            "id": workflow_id,
            "start_date": start,
            "end_date": end,
        }
    })
}

/// Database connection descriptor.
pub fn database_fragment(database: &DatabaseSettings) -> Value {
    json!({ "database": { "bety": database } })
}

/// Plant-functional-type list.
pub fn pft_fragment(pfts: &[Pft]) -> Value {
    json!({ "pft": pfts })
}

/// Queue descriptor: the run executes on the platform host's batch queue.
pub fn queue_fragment() -> Value {
    json!({
        "host": {
            "name": "localhost",
            "queue": "batch",
        }
    })
}

/// Ensemble settings and meteorological-input defaults.
pub fn ensemble_fragment(size: u32) -> Value {
    json!({
        "ensemble": {
            "size": size,
            "variable": "NPP",
        },
        "run": {
            "inputs": {
                "met": {
                    "source": "CRUNCEP",
                    "output": "ED2",
                }
            }
        }
    })
}

/// Site identity and the fixed input-dataset references.
pub fn run_inputs_fragment(site_id: i64, inputs: &InputIds) -> Value {
    json!({
        "run": {
            "site": { "id": site_id },
            "inputs": {
                "lu": { "id": inputs.landuse },
                "soil": { "id": inputs.soil },
                "thsum": { "id": inputs.thsum },
                "veg": { "id": inputs.veg },
            }
        }
    })
}

/// Model identity and the engine namelist tags.
pub fn model_fragment(model_id: i64, model_type: &str, revision: &str, tags: Value) -> Value {
    json!({
        "model": {
            "id": model_id,
            "type": model_type,
            "revision": revision,
            "ed2in_tags": tags,
        }
    })
}

/// Final override: tell the platform not to wait for earlier runs.
pub fn no_wait_fragment() -> Value {
    json!({ "workflow": { "no_wait": true } })
}

/// Engine namelist tags derived from the biophysical toggles and the soil
/// profile, plus the site's fixed physical constants.
///
/// Each toggle becomes a `0`/`1` flag except multiple scattering, which
/// selects between the two radiative-transfer scheme codes (`ICANRAD` 1 for
/// multiple scatter, 2 for two-stream). The soil column tags (`NZG`, `SLZ`,
/// `SLMSTR`) come straight from the profile, deepest layer first. The
/// remaining tags are static site configuration: sandy soil texture, output
/// frequency switches, and the fixed PFT inclusion string.
pub fn engine_tags(params: &RunParameters, profile: &SoilProfile) -> Value {
    json!({
        "NZG": profile.len(),
        "SLZ": profile.depth_string(),
        "SLMSTR": profile.moisture_string(),
        "NSLCON": 1,
        "SLXSAND": 0.92,
        "SLXCLAY": 0.01,
        "CROWN_MOD": u8::from(params.crown_model),
        "N_PLANT_LIM": u8::from(params.n_limit_ps),
        "N_DECOMP_LIM": u8::from(params.n_limit_soil),
        "ICANRAD": if params.multiple_scatter { 1 } else { 2 },
        "TRAIT_PLASTICITY_SCHEME": u8::from(params.trait_plasticity),
        "INCLUDE_THESE_PFT": "6,9,10,11",
        "IFOUTPUT": 0,
        "IDOUTPUT": 0,
        "IMOUTPUT": 3,
        "IQOUTPUT": 3,
        "IYOUTPUT": 3,
        "ITOUTPUT": 3,
    })
}
