//! Assemble and submit a canopy disturbance ensemble run.

use crate::errors::{RunError, RunResult};
use crate::params::{RunParameters, Taxonomy};
use crate::pft::pft_list;
use crate::platform::{Platform, WorkflowRequest};
use crate::settings::{
    check_complete, database_fragment, engine_tags, ensemble_fragment, merge_layers,
    model_fragment, no_wait_fragment, pft_fragment, queue_fragment, run_inputs_fragment,
    workflow_fragment, DatabaseSettings, InputIds,
};
use crate::soil::SoilProfile;
use log::{debug, info};
use serde_json::Value;
use std::path::Path;

/// Platform id of the study site.
pub const SITE_ID: i64 = 1_000_000_033;

/// Model resolved against the platform's model table.
pub const MODEL_NAME: &str = "ED2";
pub const MODEL_REVISION: &str = "develop";

/// Fixed dataset ids for the non-meteorological model inputs.
pub const INPUT_IDS: InputIds = InputIds {
    landuse: 294,
    soil: 297,
    thsum: 295,
    veg: 296,
};

/// Relative path of the derived soil moisture dataset.
pub const SOIL_MOISTURE_PATH: &str = "data/derived/soil-moisture.csv";

/// Result of a successful submission: the platform's workflow identifier
/// and the full merged run configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedRun {
    pub workflow_id: i64,
    pub settings: Value,
}

/// Configure a run and hand it to the platform, reading the soil moisture
/// dataset from its fixed location.
pub fn submit_run<P: Platform>(params: &RunParameters, platform: &P) -> RunResult<SubmittedRun> {
    submit_run_with_dataset(params, platform, Path::new(SOIL_MOISTURE_PATH))
}

/// As [`submit_run`], with an explicit soil moisture dataset path.
///
/// Steps, in order: validate the parameters, load the soil profile, resolve
/// the model id, register the workflow row, merge the configuration layers,
/// and submit. Any failure aborts the whole call; an already-registered
/// workflow row is not rolled back if a later step fails.
pub fn submit_run_with_dataset<P: Platform>(
    params: &RunParameters,
    platform: &P,
    soil_dataset: &Path,
) -> RunResult<SubmittedRun> {
    let taxonomy = Taxonomy::parse(&params.taxonomy)?;
    if params.ensemble_size == 0 {
        return Err(RunError::InvalidArgument(
            "ensemble size must be positive".to_string(),
        ));
    }
    debug!(
        "run parameters validated: taxonomy {:?}, ensemble size {}, {} to {}",
        taxonomy, params.ensemble_size, params.start_date, params.end_date
    );

    // The soil profile drives the layer-dependent engine tags, so a missing
    // or malformed dataset must abort before any platform call.
    let profile = SoilProfile::from_csv(soil_dataset)?;
    debug!("soil profile loaded: {} layers", profile.len());

    let model_id = platform.lookup_model(MODEL_NAME, MODEL_REVISION)?;
    let workflow = platform.insert_workflow(&WorkflowRequest {
        site_id: SITE_ID,
        model_id,
        start_date: params.start_date,
        end_date: params.end_date,
        notes: params.notes(),
    })?;
    info!(
        "registered workflow {} for model {} at site {}",
        workflow.id, model_id, SITE_ID
    );

    let pfts = pft_list(taxonomy);
    let settings = merge_layers([
        workflow_fragment(workflow.id, params.start_date, params.end_date),
        database_fragment(&DatabaseSettings::default()),
        pft_fragment(&pfts),
        queue_fragment(),
        ensemble_fragment(params.ensemble_size),
        run_inputs_fragment(SITE_ID, &INPUT_IDS),
        model_fragment(
            model_id,
            MODEL_NAME,
            MODEL_REVISION,
            engine_tags(params, &profile),
        ),
        no_wait_fragment(),
    ]);
    check_complete(&settings)?;

    platform.submit(&settings)?;
    info!("workflow {} submitted", workflow.id);

    Ok(SubmittedRun {
        workflow_id: workflow.id,
        settings,
    })
}
