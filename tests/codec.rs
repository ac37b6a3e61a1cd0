use std::{fs, sync::Arc};

use ccid::{
    break_ccid, Ccid, CcidError, CcidRule, Codec, Config, CountyTable, IrregularStore, IrregularTable, MemTables,
    RegionInput, RegionType, StateInput,
};

/// One canonical CCID of every shape the codec produces.
const CANONICAL: [&str; 13] = [
    "04", "56", "0401", "5600", "7298", "06ZZ", "04013", "0412A", "04ZZZ", "04123U", "0412AL", "04ZZZL", "25002U",
];

#[test]
fn break_then_assemble_restores_every_shape() {
    let codec = Codec::default();
    for ccid in CANONICAL {
        let (ty, state, district) = break_ccid(ccid).unwrap();
        let rebuilt = match district {
            None => codec.assemble(ty, state, None),
            Some(district) => codec.assemble(ty, district, Some(StateInput::from(state))),
        };
        assert_eq!(rebuilt.unwrap().as_str(), ccid, "round trip of {ccid}");
    }
}

#[test]
fn assembling_a_canonical_code_is_idempotent() {
    let codec = Codec::default();
    for ccid in CANONICAL {
        let ty = Ccid::parse(ccid).unwrap().region_type();
        assert_eq!(codec.assemble(ty, ccid, None).unwrap().as_str(), ccid, "idempotence of {ccid}");
    }
}

#[test]
fn documented_examples() {
    let codec = Codec::default();
    assert!(matches!(
        codec.assemble(RegionType::Congressional, "450", Some("04".into())),
        Err(CcidError::AmbiguousStateInput { .. })
    ));
    assert_eq!(codec.assemble(RegionType::Congressional, "At Large", Some(StateInput::Fips(56))).unwrap().as_str(), "5600");
    assert_eq!(codec.assemble(RegionType::Congressional, "At Large", Some(StateInput::Fips(72))).unwrap().as_str(), "7298");

    for (ccid, expected) in [("9", CcidRule::Length), ("96123", CcidRule::StateRange), ("04123X", CcidRule::Suffix)] {
        match break_ccid(ccid) {
            Err(CcidError::MalformedCcid { rule, .. }) => assert_eq!(rule, expected, "{ccid}"),
            other => panic!("expected malformed {ccid}, got {other:?}"),
        }
    }
}

#[test]
fn float_codes_from_spreadsheets() {
    let codec = Codec::default();
    let raw = RegionInput::try_from(4013.0).unwrap();
    assert_eq!(codec.assemble(RegionType::County, raw, None).unwrap().as_str(), "04013");
    assert!(RegionInput::try_from(4013.5).is_err());
}

#[test]
fn integer_codes_with_state_keep_low_state_fips() {
    let codec = Codec::default();
    assert_eq!(codec.assemble(RegionType::County, 1001u32, Some(StateInput::Fips(1))).unwrap().as_str(), "01001");
    assert_eq!(codec.assemble(RegionType::County, RegionInput::Code(1001), Some("AL".into())).unwrap().as_str(), "01001");

    let from_float = RegionInput::try_from(1001.0).unwrap();
    assert_eq!(codec.assemble(RegionType::County, from_float, Some("AL".into())).unwrap().as_str(), "01001");
    assert_eq!(codec.assemble(RegionType::StateLegLower, 1001u32, Some(StateInput::Fips(1))).unwrap().as_str(), "01001L");
    assert_eq!(codec.assemble(RegionType::Congressional, 601u32, Some("CA".into())).unwrap().as_str(), "0601");

    // the padded prefix must still agree with the state
    assert!(matches!(
        codec.assemble(RegionType::County, 6013u32, Some("AZ".into())),
        Err(CcidError::AmbiguousStateInput { .. })
    ));
    // text keeps the stricter rule
    assert!(matches!(
        codec.assemble(RegionType::County, "1001", Some(StateInput::Fips(1))),
        Err(CcidError::AmbiguousStateInput { .. })
    ));
}

#[test]
fn vermont_fragments_fall_outside_the_ccid_body_grammar() {
    let house = IrregularTable::from_census_rows([("Addison-1 District (2018), Vermont", "620L900US50A-1")]);
    let tables = MemTables::new().with("VT_SLDL.json", house.to_json().unwrap().as_bytes());
    let store = IrregularStore::new(Arc::new(tables), [("VT", RegionType::StateLegLower)]).unwrap();
    let codec = Codec::new(CountyTable::new(), store);

    for (raw, state) in [("50A-1", None), ("Addison-1", Some(StateInput::from("VT")))] {
        match codec.assemble(RegionType::StateLegLower, raw, state) {
            Err(CcidError::MalformedCcid { ccid, rule }) => {
                assert_eq!(rule, CcidRule::Body, "{raw}");
                assert_eq!(ccid, "50A-1L");
            }
            other => panic!("expected malformed CCID for {raw}, got {other:?}"),
        }
    }
}

#[test]
fn ccids_serialize_as_plain_strings() {
    let ccid = Ccid::parse("0412AL").unwrap();
    assert_eq!(serde_json::to_string(&ccid).unwrap(), "\"0412AL\"");
    assert_eq!(serde_json::from_str::<Ccid>("\"0412AL\"").unwrap(), ccid);
    assert!(serde_json::from_str::<Ccid>("\"0412AX\"").is_err());
}

#[test]
fn codec_from_config_reads_tables_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let tables = dir.path().join("irregulars");
    fs::create_dir(&tables).unwrap();

    let house = IrregularTable::from_census_rows([
        ("First Barnstable District (2018), Massachusetts", "620L900US25001"),
        ("Second Barnstable District (2018), Massachusetts", "620L900US25002"),
    ]);
    fs::write(tables.join("MA_SLDL.json"), house.to_json().unwrap()).unwrap();
    fs::write(dir.path().join("counties.csv"), "statefp,countyfp,name\n25,001,Barnstable County\n04,013,Maricopa County\n").unwrap();
    fs::write(
        dir.path().join("ccid.json"),
        r#"{"irregular_dir": "irregulars", "irregular": {"MA": ["State Legislative District (Lower Chamber)"]}, "county_csv": "counties.csv"}"#,
    ).unwrap();

    let config = Config::from_path(&dir.path().join("ccid.json")).unwrap();
    let codec = Codec::from_config(&config).unwrap();

    let lower = RegionType::StateLegLower;
    assert_eq!(codec.assemble(lower, "2nd Barnstable", Some("MA".into())).unwrap().as_str(), "25002L");
    assert_eq!(codec.assemble(lower, "Second Barnstable District", Some("25".into())).unwrap().as_str(), "25002L");
    assert!(matches!(
        codec.assemble(lower, "25003", None),
        Err(CcidError::InvalidIrregularCode { .. })
    ));
    // the upper chamber is not flagged, so its names use the trailing number
    assert_eq!(codec.assemble(RegionType::StateLegUpper, "Senate District 3", Some("MA".into())).unwrap().as_str(), "25003U");

    assert_eq!(codec.assemble(RegionType::County, "Barnstable", Some("MA".into())).unwrap().as_str(), "25001");
    assert_eq!(codec.assemble(RegionType::County, "maricopa county", Some("AZ".into())).unwrap().as_str(), "04013");
}

#[test]
fn codec_from_config_requires_flagged_tables() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config { irregular_dir: dir.path().to_path_buf(), ..Config::default() };
    assert!(Codec::from_config(&config).is_err());

    let missing_dir = Config { irregular_dir: dir.path().join("absent"), ..Config::default() };
    assert!(Codec::from_config(&missing_dir).is_err());
}

#[test]
fn batch_matches_single_assembly() {
    let codec = Codec::default();
    let rows: Vec<_> = (1u32..=40)
        .map(|district| (RegionType::StateLegUpper, RegionInput::from(district), Some(StateInput::from("AZ"))))
        .collect();
    let results = codec.assemble_batch(&rows);
    assert_eq!(results.len(), 40);
    for (i, result) in results.into_iter().enumerate() {
        assert_eq!(result.unwrap().as_str(), format!("04{:03}U", i + 1));
    }
}
