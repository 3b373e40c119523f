//! Typed structs representing the consumer case-JSON schema.
//!
//! A case bundle is one `genData` document plus one document per record
//! group (`R`, `RYT`, `RYTCM`, ...). Record fields vary per group, so
//! individual records stay as JSON maps; everything with a fixed shape is
//! typed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scenario bucket every converted parameter is filed under. Converted
/// model data always lands in the base scenario.
pub const SCENARIO_BASE: &str = "SC_0";

/// One long-form record: dimension fields plus a `"Value"` entry.
/// Kept as a map because the field set differs per record group.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Scenario bucket key -> records. Converted data only populates
/// [`SCENARIO_BASE`], but the shape allows additional scenarios.
pub type ScenarioBuckets = BTreeMap<String, Vec<Record>>;

/// Parameter short key (e.g. `"CC"`) -> scenario buckets.
pub type ParamGroup = BTreeMap<String, ScenarioBuckets>;

// ── genData entries ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScenarioEntry {
    #[serde(rename = "ScenarioId")]
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TechEntry {
    #[serde(rename = "TechId")]
    pub id: String,
    #[serde(rename = "TechName")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommEntry {
    #[serde(rename = "CommId")]
    pub id: String,
    #[serde(rename = "CommName")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmisEntry {
    #[serde(rename = "EmisId")]
    pub id: String,
    #[serde(rename = "EmisName")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StgEntry {
    #[serde(rename = "StgId")]
    pub id: String,
    #[serde(rename = "StgName")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TsEntry {
    #[serde(rename = "TsId")]
    pub id: String,
    #[serde(rename = "TsName")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeEntry {
    #[serde(rename = "SeId")]
    pub id: String,
    #[serde(rename = "SeName")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DtEntry {
    #[serde(rename = "DtId")]
    pub id: String,
    #[serde(rename = "DtName")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DtbEntry {
    #[serde(rename = "DtbId")]
    pub id: String,
    #[serde(rename = "DtbName")]
    pub name: String,
}

// ── genData ─────────────────────────────────────────────────────────

/// The set-inventory document. Member lists are sorted by raw name so the
/// document is reproducible for identical input.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GenData {
    #[serde(rename = "osy-scenarios")]
    pub scenarios: Vec<ScenarioEntry>,
    #[serde(rename = "osy-years")]
    pub years: Vec<String>,
    /// Number of operating modes, stringified per the consumer schema.
    #[serde(rename = "osy-mo")]
    pub mode_count: String,
    #[serde(rename = "osy-tech")]
    pub technologies: Vec<TechEntry>,
    #[serde(rename = "osy-comm")]
    pub commodities: Vec<CommEntry>,
    #[serde(rename = "osy-emis")]
    pub emissions: Vec<EmisEntry>,
    #[serde(rename = "osy-stg")]
    pub storages: Vec<StgEntry>,
    #[serde(rename = "osy-ts")]
    pub timeslices: Vec<TsEntry>,
    #[serde(rename = "osy-se")]
    pub seasons: Vec<SeEntry>,
    #[serde(rename = "osy-dt")]
    pub daytypes: Vec<DtEntry>,
    #[serde(rename = "osy-dtb")]
    pub daybrackets: Vec<DtbEntry>,
    /// Constraints are authored in the application, never converted.
    #[serde(rename = "osy-constraints")]
    pub constraints: Vec<serde_json::Value>,
}

// ── bundle ──────────────────────────────────────────────────────────

/// The full conversion output: `genData` plus every record group.
/// Groups the converter knows about are always present, even when empty.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CaseBundle {
    #[serde(rename = "genData")]
    pub gen_data: GenData,
    #[serde(flatten)]
    pub groups: BTreeMap<String, ParamGroup>,
}
