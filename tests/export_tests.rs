//! Export File Tests
//!
//! The file sink must emit the identical bytes the session path encodes,
//! appended across calls.

mod common;

use std::fs;

use serde::{Deserialize, Serialize};
use tempfile::tempdir;

use common::{config, wire, RequestLog, ScriptedChannel};
use kvwire::{AutocompleteItem, Client, Command, ExportFile};

#[derive(Debug, Serialize, Deserialize)]
struct Person {
    name: String,
    age: u32,
}

#[test]
fn test_export_set_writes_encoded_command() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bulk-import.txt");
    let export = ExportFile::new(&path);

    export.set("key1", "value1").unwrap();

    assert_eq!(fs::read(&path).unwrap(), wire(&Command::set("key1", "value1")));
}

#[test]
fn test_export_appends_across_calls() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bulk-import.txt");
    let export = ExportFile::new(&path);

    export.set("key1", "value1").unwrap();
    export.set_add("setkey1", &["m1", "m2", "m3"]).unwrap();

    let mut expected = wire(&Command::set("key1", "value1"));
    expected.extend(wire(&Command::sadd("setkey1", ["m1", "m2", "m3"])));
    assert_eq!(fs::read(&path).unwrap(), expected);
}

#[test]
fn test_export_set_entity_matches_client_serialization() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("entities.txt");
    let export = ExportFile::new(&path);

    let p = Person {
        name: "Ram".to_string(),
        age: 40,
    };
    export.set_entity("entitykey1", &p).unwrap();

    let json = serde_json::to_string(&p).unwrap();
    assert_eq!(
        fs::read(&path).unwrap(),
        wire(&Command::set("entitykey1", &json))
    );
}

#[test]
fn test_export_autocomplete_matches_session_path() {
    // Identical codec, different sink: the file must hold exactly the
    // bytes the socket path would send.
    let dir = tempdir().unwrap();
    let path = dir.path().join("autocomplete.txt");
    let export = ExportFile::new(&path);

    let items = [
        AutocompleteItem::new("Mohan", "1"),
        AutocompleteItem::new("Manmohan", "3"),
    ];
    export.autocomplete_add("collector:names", &items).unwrap();

    let log = RequestLog::new();
    let client = Client::with_channel(ScriptedChannel::new(log.clone()), &config());
    client.autocomplete_add("collector:names", &items).unwrap();

    assert_eq!(fs::read(&path).unwrap(), log.take()[0]);
}

#[test]
fn test_export_two_way_map_add() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("map.txt");
    let export = ExportFile::new(&path);

    export.two_way_map_add("k1", &[("z1", "z2")]).unwrap();

    assert_eq!(
        fs::read(&path).unwrap(),
        wire(&Command::zadd_zero_scored("k1", ["z1:z2", "z2:z1"]))
    );
}
