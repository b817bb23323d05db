/// Tests for loading completer configuration and vocabularies from disk
use ontoedit_completion::{
    CompleterConfig, CompletionError, ConfigLoader, EntityKind, ExpectedKinds, EntityMatcher,
    ShortFormRenderer, Vocabulary, VocabularyMatcher,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_yaml_config_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("completer.yaml");
    fs::write(
        &path,
        "max_entries: 25\npopup_width: 420\ndismiss_on_empty_refresh: false\n",
    )
    .unwrap();

    let config = ConfigLoader::load_from_path(&path).unwrap();

    assert_eq!(config.max_entries, 25);
    assert_eq!(config.popup_width, 420);
    assert_eq!(config.popup_height, 300);
    assert!(!config.dismiss_on_empty_refresh);
}

#[test]
fn test_load_json_config_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("completer.json");
    fs::write(&path, r#"{"extra_delimiters": ["\t"]}"#).unwrap();

    let config = ConfigLoader::load_from_path(&path).unwrap();

    assert!(config.delimiters().contains('\t'));
    assert_eq!(config.sentinel, CompleterConfig::default().sentinel);
}

#[test]
fn test_missing_config_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = ConfigLoader::load_from_path(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, CompletionError::Io(_)));
}

#[test]
fn test_malformed_yaml_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("completer.yml");
    fs::write(&path, "max_entries: [not a number").unwrap();

    let err = ConfigLoader::load_from_path(&path).unwrap_err();
    assert!(matches!(err, CompletionError::Yaml(_)));
}

#[test]
fn test_vocabulary_json_feeds_matcher() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vocabulary.json");
    fs::write(
        &path,
        r#"{"entities": [
            {"kind": "class", "iri": "http://example.org/pizza#Margherita"},
            {"kind": "object_property", "iri": "http://example.org/pizza#hasTopping"},
            {"kind": "class", "iri": "http://example.org/pizza#MeatyPizza"}
        ]}"#,
    )
    .unwrap();

    let vocabulary = Vocabulary::load_from_json(&path).unwrap();
    let matcher = VocabularyMatcher::from_entities(vocabulary.entities, &ShortFormRenderer);

    assert_eq!(matcher.len(), 3);
    let found = matcher.matches("m", ExpectedKinds::none().with(EntityKind::Class));
    assert_eq!(found.len(), 2);
    assert!(matcher
        .matches("has", ExpectedKinds::none().with(EntityKind::Class))
        .is_empty());
}
