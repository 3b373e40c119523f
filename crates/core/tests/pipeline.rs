//! End-to-end pipeline tests over a bundled sample model file.

use osydata_core::{convert_str, interpret, parse_str, Num};

const MODEL: &str = include_str!("fixtures/utopia.txt");

fn key(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| (*s).to_owned()).collect()
}

#[test]
fn parse_collects_sets_and_params() {
    let parsed = parse_str(MODEL);
    assert_eq!(parsed.sets.len(), 9);
    assert_eq!(parsed.sets["TECHNOLOGY"], ["E01", "E31", "E51", "E70", "RHE"]);
    assert_eq!(parsed.sets["MODE_OF_OPERATION"], ["1", "2"]);

    let cc = parsed
        .params
        .iter()
        .find(|p| p.name == "CapitalCost")
        .unwrap();
    assert_eq!(cc.default.as_deref(), Some("0"));
    assert_eq!(cc.slices.len(), 1);
    assert_eq!(cc.slices[0].column_labels, ["1990", "1995", "2000"]);
    assert_eq!(cc.slices[0].rows.len(), 5);

    let iar = parsed
        .params
        .iter()
        .find(|p| p.name == "InputActivityRatio")
        .unwrap();
    assert_eq!(iar.slices.len(), 2);
}

#[test]
fn interpretation_covers_every_registered_param() {
    let interp = interpret(&parse_str(MODEL));
    let names: Vec<&str> = interp.params.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        [
            "CapacityToActivityUnit",
            "CapitalCost",
            "Conversionls",
            "DiscountRate",
            "EmissionActivityRatio",
            "InputActivityRatio",
            "OperationalLife",
            "OutputActivityRatio",
            "SpecifiedAnnualDemand",
            "TechnologyToStorage",
            "YearSplit",
        ]
    );

    let cc = &interp.params["CapitalCost"];
    // RHE rows carry the default and are elided.
    assert_eq!(cc.len(), 12);
    assert_eq!(cc[&key(&["UTOPIA", "E01", "1990"])], Num::Int(1400));

    let ys = &interp.params["YearSplit"];
    assert_eq!(ys.len(), 12);
    assert_eq!(ys[&key(&["UTOPIA", "ID", "1990"])], Num::Float(0.1667));

    let cls = &interp.params["Conversionls"];
    assert_eq!(cls.len(), 4);
    assert_eq!(cls[&key(&["UTOPIA", "SD", "2"])], Num::Int(1));

    let tts = &interp.params["TechnologyToStorage"];
    assert_eq!(tts[&key(&["UTOPIA", "E51", "DAM", "1"])], Num::Int(1));

    // Only the unregistered StorageLevelStart was skipped.
    assert_eq!(interp.diagnostics.unknown_params, 1);
    assert_eq!(interp.diagnostics.coercion_failures, 0);
    assert_eq!(interp.diagnostics.dropped_tuples, 0);
    assert_eq!(interp.diagnostics.ambiguous_slices, 0);
}

#[test]
fn tuple_arity_matches_the_registry_everywhere() {
    let interp = interpret(&parse_str(MODEL));
    for (name, data) in &interp.params {
        let n = osydata_core::registry::dimensions(name).unwrap().len();
        assert!(
            data.keys().all(|t| t.len() == n),
            "arity broken for {}",
            name
        );
    }
}

#[test]
fn bundle_matches_the_consumer_contract() {
    let conversion = convert_str(MODEL);
    assert!(!conversion.empty_input);

    let gen = &conversion.bundle.gen_data;
    assert_eq!(gen.years, ["1990", "1995", "2000"]);
    assert_eq!(gen.mode_count, "2");
    assert_eq!(gen.technologies.len(), 5);
    assert_eq!(gen.technologies[0].id, "T_0");
    assert_eq!(gen.technologies[0].name, "E01");
    assert_eq!(gen.commodities[0].id, "C_0");
    assert_eq!(gen.commodities[0].name, "DSL");
    assert_eq!(gen.scenarios[0].id, "SC_0");
    // FUEL was declared in the source but the contract only knows
    // COMMODITY; no FUEL inventory exists anywhere in genData.
    assert_eq!(gen.emissions.len(), 1);
    assert_eq!(gen.storages[0].id, "S_0");

    let cc = &conversion.bundle.groups["RYT"]["CC"]["SC_0"];
    assert_eq!(cc.len(), 12);
    let first = &cc[0];
    assert_eq!(first["RegId"], "UTOPIA");
    assert_eq!(first["TechId"], "T_0");
    assert_eq!(first["Year"], "1990");
    assert_eq!(first["Value"], 1400);

    // Every standard record group is present, even when empty.
    for group in ["RYCn", "RYTCn", "RYSeDt", "RYDtb", "RYTSM"] {
        assert!(conversion.bundle.groups[group].is_empty());
    }
}

#[test]
fn five_dimensional_records_keep_mode_and_year_literal() {
    let conversion = convert_str(MODEL);
    let iar = &conversion.bundle.groups["RYTCM"]["IAR"]["SC_0"];
    assert_eq!(iar.len(), 4);

    // The E70/DSL fact from the second slice block.
    let rec = iar.iter().find(|r| r["CommId"] == "C_0").unwrap();
    assert_eq!(rec["TechId"], "T_3");
    assert_eq!(rec["MoId"], "1");
    assert_eq!(rec["Year"], "1990");
    assert_eq!(rec["Value"], 3.4);
}

#[test]
fn two_runs_produce_byte_identical_output() {
    let a = serde_json::to_string(&convert_str(MODEL).bundle).unwrap();
    let b = serde_json::to_string(&convert_str(MODEL).bundle).unwrap();
    assert_eq!(a, b);
}

#[test]
fn shuffled_set_declarations_keep_identifiers_stable() {
    let shuffled = MODEL.replace(
        "set TECHNOLOGY := E01 E31 E51 E70 RHE;",
        "set TECHNOLOGY := RHE E70 E51 E31 E01;",
    );
    let a = convert_str(MODEL).bundle;
    let b = convert_str(&shuffled).bundle;
    assert_eq!(a.gen_data.technologies, b.gen_data.technologies);
    assert_eq!(a.groups["RYT"], b.groups["RYT"]);
}

#[test]
fn reinserting_the_default_value_adds_no_records() {
    // An extra row whose values all equal the declared default.
    let with_default_row = MODEL.replace(
        "E70 1000 1000 1000\nRHE 0 0 0",
        "E70 1000 1000 1000\nRHE 0 0 0\nE75 0 0 0",
    );
    let base = convert_str(MODEL).bundle;
    let extra = convert_str(&with_default_row).bundle;
    assert_eq!(
        base.groups["RYT"]["CC"]["SC_0"].len(),
        extra.groups["RYT"]["CC"]["SC_0"].len()
    );
}
