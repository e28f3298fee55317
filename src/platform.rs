//! Capability port onto the external workflow platform.

use crate::errors::RunResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Arguments for registering a new workflow row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRequest {
    pub site_id: i64,
    pub model_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Free-text annotation attached to the workflow.
    pub notes: String,
}

/// The platform's record of a registered workflow.
///
/// Created once per invocation and never mutated or deleted here; the `id`
/// is the only externally observable output besides the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowRecord {
    pub id: i64,
}

/// The external platform that owns model execution, queuing, and storage.
///
/// This crate only resolves a model, registers a workflow, and hands over
/// the finished configuration; everything past `submit` is the platform's
/// responsibility. All three calls are one-shot with no retry here. Real
/// implementations are backed by the platform's relational store and job
/// queue; tests use a call-recording stub.
pub trait Platform {
    /// Resolve a model id by name and revision.
    fn lookup_model(&self, name: &str, revision: &str) -> RunResult<i64>;

    /// Insert a workflow row, returning the platform's record of it.
    fn insert_workflow(&self, request: &WorkflowRequest) -> RunResult<WorkflowRecord>;

    /// Queue the assembled configuration for asynchronous execution.
    fn submit(&self, settings: &Value) -> RunResult<()>;
}
