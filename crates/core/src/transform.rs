//! Phase 3: record transformation.
//!
//! Re-keys normalized tuples into the consumer's case-JSON contract:
//! set aliasing and injection, deterministic identifier assignment, the
//! `genData` set inventory, and per-group long-form record packaging.
//!
//! Determinism is a hard invariant here: identical input must reproduce
//! byte-identical identifiers and record ordering, so members are sorted
//! before ids are assigned and records are sorted before they are emitted.

use crate::decl::ParseResult;
use crate::interpret::{Interpretation, TupleMap};
use osydata_interchange::{
    CaseBundle, CommEntry, DtEntry, DtbEntry, EmisEntry, GenData, ParamGroup, Record,
    ScenarioBuckets, ScenarioEntry, SeEntry, StgEntry, TechEntry, TsEntry, SCENARIO_BASE,
};
use std::collections::BTreeMap;

type IdMaps = BTreeMap<String, BTreeMap<String, String>>;

/// Set-name synonyms: files use either spelling, the consumer only the
/// canonical one.
const SET_ALIASES: &[(&str, &str)] = &[("FUEL", "COMMODITY")];

/// Sets the consumer expects to exist even when a model never declares
/// them. Injected with empty membership.
const REQUIRED_SETS: &[&str] = &["STORAGEINTRADAY", "STORAGEINTRAYEAR", "UDC"];

/// Identifier prefix per set. Sets without a prefix (region, year) keep
/// their raw literal as their identifier, as does mode-of-operation.
const ID_PREFIXES: &[(&str, &str)] = &[
    ("TECHNOLOGY", "T"),
    ("COMMODITY", "C"),
    ("FUEL", "C"),
    ("EMISSION", "E"),
    ("STORAGE", "S"),
    ("TIMESLICE", "Ts"),
    ("SEASON", "SE"),
    ("DAYTYPE", "DT"),
    ("DAILYTIMEBRACKET", "DTB"),
];

/// Every record group the consumer reads. All of them appear in the
/// output, empty or not -- the consumer relies on group presence.
const RECORD_GROUPS: &[&str] = &[
    "R", "RY", "RT", "RE", "RS", "RYT", "RYC", "RYE", "RYS", "RYCn", "RYTs", "RYSeDt", "RYDtb",
    "RYTTs", "RYCTs", "RYTM", "RYTCM", "RYTE", "RYTEM", "RYTSM", "RTSM", "RYTCn",
];

// ── parameter targets ───────────────────────────────────────────────

struct ParamTarget {
    group: &'static str,
    key: &'static str,
    dims: &'static [&'static str],
}

/// Where a parameter's records land: group, short key, and the ordered
/// dimension fields of its records. Parameters absent here are silently
/// dropped, mirroring the interpreter's skip policy.
fn target(param: &str) -> Option<ParamTarget> {
    let (group, key, dims): (&'static str, &'static str, &'static [&'static str]) = match param {
        "DiscountRate" => ("R", "DR", &["region"]),
        "DepreciationMethod" => ("R", "DM", &["region"]),
        "AccumulatedAnnualDemand" => ("RY", "AAD", &["region", "commodity", "year"]),
        "SpecifiedAnnualDemand" => ("RY", "SAD", &["region", "commodity", "year"]),
        "REMinProductionTarget" => ("RY", "REPT", &["region", "year"]),
        "OperationalLife" => ("RT", "OL", &["region", "technology"]),
        "CapacityToActivityUnit" => ("RT", "CAU", &["region", "technology"]),
        "TotalTechnologyModelPeriodActivityUpperLimit" => {
            ("RT", "TTMPAU", &["region", "technology"])
        }
        "TotalTechnologyModelPeriodActivityLowerLimit" => {
            ("RT", "TTMPAL", &["region", "technology"])
        }
        "DiscountRateIdv" => ("RT", "DRI", &["region", "technology"]),
        "DiscountRateTech" => ("RT", "DRT", &["region", "technology"]),
        "AnnualExogenousEmission" => ("RE", "AEE", &["region", "emission"]),
        "ModelPeriodExogenousEmission" => ("RE", "MPEE", &["region", "emission"]),
        "OperationalLifeStorage" => ("RS", "OLS", &["region", "storage"]),
        "DiscountRateStorage" => ("RS", "DRS", &["region", "storage"]),
        "MinStorageCharge" => ("RS", "MSC", &["region", "storage"]),
        "StorageMaxChargeRate" => ("RS", "SMCR", &["region", "storage"]),
        "StorageMaxDischargeRate" => ("RS", "SMDR", &["region", "storage"]),
        "CapitalCost" => ("RYT", "CC", &["region", "technology", "year"]),
        "FixedCost" => ("RYT", "FC", &["region", "technology", "year"]),
        "VariableCost" => ("RYT", "VC", &["region", "technology", "year"]),
        "ResidualCapacity" => ("RYT", "RC", &["region", "technology", "year"]),
        "TotalAnnualMaxCapacity" => ("RYT", "TAMC", &["region", "technology", "year"]),
        "TotalAnnualMinCapacity" => ("RYT", "TAMiC", &["region", "technology", "year"]),
        "TotalAnnualMaxCapacityInvestment" => ("RYT", "TAMCI", &["region", "technology", "year"]),
        "TotalAnnualMinCapacityInvestment" => ("RYT", "TAMiCI", &["region", "technology", "year"]),
        "TotalTechnologyAnnualActivityUpperLimit" => {
            ("RYT", "TTAAUL", &["region", "technology", "year"])
        }
        "TotalTechnologyAnnualActivityLowerLimit" => {
            ("RYT", "TTAALL", &["region", "technology", "year"])
        }
        "AvailabilityFactor" => ("RYT", "AF", &["region", "technology", "year"]),
        "RETagTechnology" => ("RYT", "RETT", &["region", "technology", "year"]),
        "NumberOfNewTechnologyUnits" => ("RYT", "NONTU", &["region", "technology", "year"]),
        "CapacityOfOneTechnologyUnit" => ("RYT", "COOTU", &["region", "technology", "year"]),
        "RETagFuel" => ("RYC", "RETF", &["region", "commodity", "year"]),
        "AnnualEmissionLimit" => ("RYE", "AEL", &["region", "emission", "year"]),
        "EmissionsPenalty" => ("RYE", "EP", &["region", "emission", "year"]),
        "ModelPeriodEmissionLimit" => ("RYE", "MPEL", &["region", "emission"]),
        "CapitalCostStorage" => ("RYS", "CCS", &["region", "storage", "year"]),
        "ResidualStorageCapacity" => ("RYS", "RSC", &["region", "storage", "year"]),
        "YearSplit" => ("RYTs", "YS", &["region", "timeslice", "year"]),
        "DaysInDayType" => ("RYSeDt", "DDT", &["region", "season", "daytype", "year"]),
        "DaySplit" => ("RYDtb", "DS", &["region", "dailytimebracket", "year"]),
        "CapacityFactor" => ("RYTTs", "CF", &["region", "technology", "timeslice", "year"]),
        "SpecifiedDemandProfile" => ("RYCTs", "SDP", &["region", "commodity", "timeslice", "year"]),
        "InputActivityRatio" => (
            "RYTCM",
            "IAR",
            &["region", "technology", "commodity", "mode", "year"],
        ),
        "OutputActivityRatio" => (
            "RYTCM",
            "OAR",
            &["region", "technology", "commodity", "mode", "year"],
        ),
        "EmissionActivityRatio" => (
            "RYTE",
            "EAR",
            &["region", "technology", "emission", "mode", "year"],
        ),
        "TechnologyToStorage" => ("RTSM", "TTS", &["region", "technology", "storage", "mode"]),
        "TechnologyFromStorage" => ("RTSM", "TFS", &["region", "technology", "storage", "mode"]),
        "Conversionls" => ("RYTs", "CLS", &["region", "timeslice", "season"]),
        "Conversionld" => ("RYTs", "CLD", &["region", "timeslice", "daytype"]),
        "Conversionlh" => ("RYTs", "CLH", &["region", "timeslice", "dailytimebracket"]),
        _ => return None,
    };
    Some(ParamTarget { group, key, dims })
}

/// Declared-set name for a record dimension field.
fn dim_set(dim: &'static str) -> &'static str {
    match dim {
        "region" => "REGION",
        "technology" => "TECHNOLOGY",
        "commodity" | "fuel" => "COMMODITY",
        "emission" => "EMISSION",
        "storage" => "STORAGE",
        "mode" => "MODE_OF_OPERATION",
        "year" => "YEAR",
        "timeslice" => "TIMESLICE",
        "season" => "SEASON",
        "daytype" => "DAYTYPE",
        "dailytimebracket" => "DAILYTIMEBRACKET",
        _ => dim,
    }
}

/// JSON field name for a record dimension.
fn dim_field(dim: &'static str) -> &'static str {
    match dim {
        "region" => "RegId",
        "technology" => "TechId",
        "commodity" | "fuel" => "CommId",
        "emission" => "EmisId",
        "storage" => "StgId",
        "mode" => "MoId",
        "year" => "Year",
        "timeslice" => "TsId",
        "season" => "SeId",
        "daytype" => "DtId",
        "dailytimebracket" => "DtbId",
        _ => dim,
    }
}

// ── transformation ──────────────────────────────────────────────────

/// Build the full case bundle from a parse result and its interpretation.
pub fn transform(parsed: &ParseResult, interp: &Interpretation) -> CaseBundle {
    let sets = normalize_sets(&parsed.sets);
    let id_maps: IdMaps = sets
        .iter()
        .map(|(name, members)| (name.clone(), identifier_map(name, members)))
        .collect();

    let mut groups: BTreeMap<String, ParamGroup> = BTreeMap::new();
    for (param, data) in &interp.params {
        let Some(t) = target(param) else { continue };
        let records = build_records(t.dims, data, &id_maps);
        let mut buckets = ScenarioBuckets::new();
        buckets.insert(SCENARIO_BASE.to_owned(), records);
        groups
            .entry(t.group.to_owned())
            .or_default()
            .insert(t.key.to_owned(), buckets);
    }
    for g in RECORD_GROUPS {
        groups.entry((*g).to_owned()).or_default();
    }

    CaseBundle {
        gen_data: build_gen_data(&sets, &id_maps),
        groups,
    }
}

/// Apply alias renames (merging member lists) and inject required sets.
fn normalize_sets(raw: &BTreeMap<String, Vec<String>>) -> BTreeMap<String, Vec<String>> {
    let mut out: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, members) in raw {
        let canonical = alias(name);
        match out.get_mut(canonical) {
            Some(existing) => {
                for m in members {
                    if !existing.contains(m) {
                        existing.push(m.clone());
                    }
                }
                existing.sort();
            }
            None => {
                out.insert(canonical.to_owned(), members.clone());
            }
        }
    }
    for required in REQUIRED_SETS {
        out.entry((*required).to_owned()).or_default();
    }
    out
}

fn alias(name: &str) -> &str {
    SET_ALIASES
        .iter()
        .find(|(from, _)| *from == name)
        .map_or(name, |(_, to)| *to)
}

/// Deterministic identifier map for one set: members sorted
/// lexicographically, ids assigned as `<prefix>_<index>`. Order of
/// declaration in the source never matters.
fn identifier_map(set_name: &str, members: &[String]) -> BTreeMap<String, String> {
    if set_name == "MODE_OF_OPERATION" {
        return members.iter().map(|m| (m.clone(), m.clone())).collect();
    }
    let Some(prefix) = ID_PREFIXES
        .iter()
        .find(|(s, _)| *s == set_name)
        .map(|(_, p)| *p)
    else {
        return members.iter().map(|m| (m.clone(), m.clone())).collect();
    };
    let mut sorted: Vec<&String> = members.iter().collect();
    sorted.sort();
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, m)| (m.clone(), format!("{}_{}", prefix, i)))
        .collect()
}

/// Identifier for a raw member, trying the set then its alias, falling
/// back to the literal for values outside every declared set.
fn map_id(raw: &str, set_name: &str, id_maps: &IdMaps) -> String {
    if let Some(id) = id_maps.get(set_name).and_then(|m| m.get(raw)) {
        return id.clone();
    }
    if let Some(id) = id_maps.get(alias(set_name)).and_then(|m| m.get(raw)) {
        return id.clone();
    }
    raw.to_owned()
}

/// Long-form records for one parameter, sorted by their stringified field
/// values so output order is stable across runs.
fn build_records(dims: &'static [&'static str], data: &TupleMap, id_maps: &IdMaps) -> Vec<Record> {
    let mut keyed: Vec<(Vec<String>, Record)> = Vec::with_capacity(data.len());
    for (tuple, value) in data {
        let mut rec = Record::new();
        let mut sort_key = Vec::with_capacity(dims.len() + 1);
        for (di, dim) in dims.iter().enumerate() {
            let Some(raw) = tuple.get(di) else { continue };
            let rendered = match *dim {
                // Year and mode stay literal in records.
                "year" | "mode" => raw.clone(),
                _ => map_id(raw, dim_set(dim), id_maps),
            };
            sort_key.push(rendered.clone());
            rec.insert(
                dim_field(dim).to_owned(),
                serde_json::Value::String(rendered),
            );
        }
        sort_key.push(value.to_string());
        rec.insert("Value".to_owned(), (*value).into());
        keyed.push((sort_key, rec));
    }
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, rec)| rec).collect()
}

/// The `genData` set inventory, member lists sorted by raw name.
fn build_gen_data(sets: &BTreeMap<String, Vec<String>>, id_maps: &IdMaps) -> GenData {
    let mut years = sets.get("YEAR").cloned().unwrap_or_default();
    years.sort();
    let mode_count = sets.get("MODE_OF_OPERATION").map_or(0, Vec::len);

    GenData {
        scenarios: vec![ScenarioEntry {
            id: SCENARIO_BASE.to_owned(),
        }],
        years,
        mode_count: mode_count.to_string(),
        technologies: entries(sets, id_maps, "TECHNOLOGY", |id, name| TechEntry { id, name }),
        commodities: entries(sets, id_maps, "COMMODITY", |id, name| CommEntry { id, name }),
        emissions: entries(sets, id_maps, "EMISSION", |id, name| EmisEntry { id, name }),
        storages: entries(sets, id_maps, "STORAGE", |id, name| StgEntry { id, name }),
        timeslices: entries(sets, id_maps, "TIMESLICE", |id, name| TsEntry { id, name }),
        seasons: entries(sets, id_maps, "SEASON", |id, name| SeEntry { id, name }),
        daytypes: entries(sets, id_maps, "DAYTYPE", |id, name| DtEntry { id, name }),
        daybrackets: entries(sets, id_maps, "DAILYTIMEBRACKET", |id, name| DtbEntry {
            id,
            name,
        }),
        constraints: Vec::new(),
    }
}

fn entries<T>(
    sets: &BTreeMap<String, Vec<String>>,
    id_maps: &IdMaps,
    set_name: &str,
    make: impl Fn(String, String) -> T,
) -> Vec<T> {
    let mut members = sets.get(set_name).cloned().unwrap_or_default();
    members.sort();
    let map = id_maps.get(set_name);
    members
        .into_iter()
        .map(|m| {
            let id = map
                .and_then(|ids| ids.get(&m))
                .cloned()
                .unwrap_or_else(|| m.clone());
            make(id, m)
        })
        .collect()
}
