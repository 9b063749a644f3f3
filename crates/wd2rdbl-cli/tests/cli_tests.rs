//! Command-level tests against files on disk

use clap::Parser;
use serde_json::json;
use std::ffi::OsString;
use wd2rdbl_cli::commands::{convert_sources, load_mapper};
use wd2rdbl_cli::source::http_client;
use wd2rdbl_cli::{run, Cli, CliError, Source};
use wd2rdbl_mapper::MapperError;

const VOCABULARY: &str = r#"{
    "@context": {"@vocab": "https://id.kb.se/vocab/"},
    "terms": {
        "wd:Q5": {"matches": "Human"},
        "wdt:P569": {"matches": "birthDate"},
        "wdt:P999": {"note": "no term"}
    }
}"#;

#[tokio::test]
async fn test_missing_vocabulary_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let vocab = dir.path().join("missing.jsonld");
    let item = dir.path().join("q1.json");
    std::fs::write(&item, r#"{"id": "Q1", "type": "item"}"#).unwrap();

    let args: Vec<OsString> = vec![
        "wd2rdbl".into(),
        "--vocab".into(),
        vocab.into_os_string(),
        "convert".into(),
        item.into_os_string(),
    ];
    let cli = Cli::try_parse_from(args).unwrap();

    let err = run(cli).await.unwrap_err();
    assert!(matches!(err, CliError::Mapper(MapperError::VocabularyLoad(_))));
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn test_convert_with_vocabulary_file() {
    let dir = tempfile::tempdir().unwrap();
    let vocab = dir.path().join("vocmap.jsonld");
    std::fs::write(&vocab, VOCABULARY).unwrap();

    let item = dir.path().join("q42.json");
    let entity = json!({"entities": {"Q42": {
        "id": "Q42",
        "type": "item",
        "labels": {"en": {"language": "en", "value": "Douglas Adams"}},
        "claims": {
            "P31": [{
                "mainsnak": {"snaktype": "value", "property": "P31",
                             "datavalue": {"value": {"entity-type": "item", "id": "Q5"}, "type": "wikibase-entityid"}},
                "rank": "normal"
            }],
            "P569": [{
                "mainsnak": {"snaktype": "value", "property": "P569",
                             "datavalue": {"value": {"time": "+1952-03-11T00:00:00Z", "calendarmodel": "http://www.wikidata.org/entity/Q1985727"}, "type": "time"}},
                "rank": "normal"
            }]
        }
    }}});
    std::fs::write(&item, entity.to_string()).unwrap();

    let mapper = load_mapper(&vocab).unwrap();
    assert_eq!(mapper.vocab().len(), 2);

    let document = convert_sources(&mapper, &http_client().unwrap(), &[Source::File(item)])
        .await
        .unwrap();

    let node = &document["@graph"][0];
    assert_eq!(node["@id"], "http://www.wikidata.org/entity/Q42");
    assert_eq!(node["@type"], json!(["Human"]));
    assert_eq!(node["rdfs:label"], json!([{"@language": "en", "@value": "Douglas Adams"}]));
    assert_eq!(node["birthDate"][0]["@value"], "+1952-03-11T00:00:00Z");
}

#[tokio::test]
async fn test_invalid_config_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("wd2rdbl.toml");
    std::fs::write(&config, "[pipeline]\nbatch_size = 0\n").unwrap();

    let args: Vec<OsString> = vec![
        "wd2rdbl".into(),
        "--config".into(),
        config.into_os_string(),
        "dump".into(),
    ];
    let cli = Cli::try_parse_from(args).unwrap();

    let err = run(cli).await.unwrap_err();
    assert!(matches!(err, CliError::Pipeline(_)));
    assert_eq!(err.exit_code(), 1);
}
