use metamap::{
    ExportError, ExportKind, HierarchyMap, MemorySource, NameIndex, Record, RecordKind,
    RecordSource, SnapshotSource, group_by_parent, project_index, resolve_output_dir, run_exports,
    write_json,
};
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
  "game": "Example",
  "sounds": [{"name": "snd_click"}, {"name": "snd_open"}],
  "sprites": [{"name": "spr_player"}, {"name": "spr_敌人"}],
  "objects": [
    {"name": "obj_enemy"},
    {"name": "obj_orc", "parent": 0},
    {"name": "obj_goblin", "parent": 0},
    {"name": "obj_goblin_chief", "parent": 2}
  ]
}"#;

#[test]
fn test_index_scenario() {
    let records = vec![Record::new("snd_click"), Record::new("snd_open")];
    let json = serde_json::to_value(project_index(&records)).unwrap();
    assert_eq!(json, serde_json::json!({"0": "snd_click", "1": "snd_open"}));
}

#[test]
fn test_hierarchy_scenario() {
    let records = vec![
        Record::new("obj_enemy"),
        Record::new("obj_goblin").with_parent("obj_enemy"),
        Record::new("obj_orc").with_parent("obj_enemy"),
    ];
    let json = serde_json::to_value(group_by_parent(&records)).unwrap();
    assert_eq!(json, serde_json::json!({"obj_enemy": ["obj_goblin", "obj_orc"]}));
}

#[test]
fn test_empty_source_writes_empty_objects() {
    let temp_dir = TempDir::new().unwrap();
    run_exports(&MemorySource::new(), &ExportKind::ALL, temp_dir.path()).unwrap();

    for kind in ExportKind::ALL {
        let text = fs::read_to_string(temp_dir.path().join(kind.file_name())).unwrap();
        assert_eq!(text, "{}", "{kind}");
    }
}

#[test]
fn test_snapshot_to_files_via_paths_json() {
    let temp_dir = TempDir::new().unwrap();
    let snapshot_path = temp_dir.path().join("game.snapshot.json");
    fs::write(&snapshot_path, SNAPSHOT).unwrap();
    let paths_file = temp_dir.path().join("paths.json");
    fs::write(&paths_file, r#"{"data_meta": "reference/data"}"#).unwrap();

    let source = SnapshotSource::load(&snapshot_path).unwrap();
    let out_dir = resolve_output_dir(&paths_file, "data_meta").unwrap();
    let reports = run_exports(&source, &ExportKind::ALL, &out_dir).unwrap();
    assert_eq!(reports.len(), 4);

    let sprites = fs::read_to_string(out_dir.join("sprite_index_map.json")).unwrap();
    assert!(sprites.contains("\"1\": \"spr_敌人\""));

    let tree = fs::read_to_string(out_dir.join("object_tree.json")).unwrap();
    assert_eq!(
        tree,
        "{\n  \"obj_enemy\": [\n    \"obj_goblin\",\n    \"obj_orc\"\n  ],\n  \"obj_goblin\": [\n    \"obj_goblin_chief\"\n  ]\n}"
    );

    let first: Vec<Vec<u8>> = ExportKind::ALL
        .iter()
        .map(|k| fs::read(out_dir.join(k.file_name())).unwrap())
        .collect();
    run_exports(&source, &ExportKind::ALL, &out_dir).unwrap();
    for (kind, before) in ExportKind::ALL.iter().zip(first) {
        assert_eq!(fs::read(out_dir.join(kind.file_name())).unwrap(), before);
    }
}

#[test]
fn test_missing_key_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let paths_file = temp_dir.path().join("paths.json");
    fs::write(&paths_file, r#"{"src_gml": "code"}"#).unwrap();

    let result = resolve_output_dir(&paths_file, "data_meta")
        .map_err(ExportError::from)
        .and_then(|dir| run_exports(&MemorySource::new(), &ExportKind::ALL, &dir));

    assert!(matches!(result, Err(ExportError::Configuration(_))));
    let entries: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_compiled_snapshot_aborts() {
    let temp_dir = TempDir::new().unwrap();
    let snapshot_path = temp_dir.path().join("compiled.json");
    fs::write(&snapshot_path, r#"{"compiled": true, "objects": [{"name": "o"}]}"#).unwrap();

    let source = SnapshotSource::load(&snapshot_path).unwrap();
    let out_dir = temp_dir.path().join("out");
    let err = run_exports(&source, &[ExportKind::Objects], &out_dir).unwrap_err();
    assert!(matches!(err, ExportError::PreconditionUnmet { .. }));
    assert!(!out_dir.exists());
    assert!(source.records(RecordKind::Object).len() == 1);
}

fn arb_index() -> impl Strategy<Value = NameIndex> {
    prop::collection::vec(any::<String>(), 0..32)
        .prop_map(|names| names.into_iter().enumerate().map(|(i, n)| (i.to_string(), n)).collect::<NameIndex>())
}

fn arb_hierarchy() -> impl Strategy<Value = HierarchyMap> {
    prop::collection::btree_map(any::<String>(), prop::collection::vec(any::<String>(), 1..5), 0..16)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn index_round_trips_through_file(index in arb_index()) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sound_index_map.json");
        write_json(&index, &path).unwrap();

        let parsed: NameIndex = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        prop_assert!(parsed.iter().eq(index.iter()));
    }

    #[test]
    fn hierarchy_round_trips_through_file(map in arb_hierarchy()) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("object_tree.json");
        write_json(&map, &path).unwrap();

        let parsed: HierarchyMap = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        prop_assert_eq!(parsed, map);
    }
}
