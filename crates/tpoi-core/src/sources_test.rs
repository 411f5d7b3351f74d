use std::path::Path;

use super::*;

fn make_source(name: &str, kind: SourceKind) -> SourceConfig {
    SourceConfig {
        name: name.to_string(),
        kind,
        base_url: "https://www.gotokyo.org/".to_string(),
        default_type: None,
        excluded_url_suffixes: None,
        name_denylist: None,
        notes: None,
    }
}

#[test]
fn slug_simple_name() {
    let source = make_source("Go Tokyo Events", SourceKind::Event);
    assert_eq!(source.slug(), "go_tokyo_events");
}

#[test]
fn slug_collapses_separators_and_strips_symbols() {
    let source = make_source("Tabelog -- Tokyo!", SourceKind::Directory);
    assert_eq!(source.slug(), "tabelog_tokyo");
}

#[test]
fn fallback_type_follows_kind() {
    assert_eq!(
        make_source("events", SourceKind::Event).fallback_type(),
        PoiType::EventVenue
    );
    assert_eq!(
        make_source("food", SourceKind::Directory).fallback_type(),
        PoiType::Restaurant
    );
}

#[test]
fn fallback_type_prefers_configured_default() {
    let mut source = make_source("shops", SourceKind::Directory);
    source.default_type = Some(PoiType::Shop);
    assert_eq!(source.fallback_type(), PoiType::Shop);
}

#[test]
fn excluded_suffixes_default_when_unset() {
    let source = make_source("events", SourceKind::Event);
    assert!(source
        .excluded_suffixes()
        .contains(&"/event/index.html".to_string()));
    assert!(source
        .denied_names()
        .contains(&"More details here".to_string()));
}

#[test]
fn empty_denylist_overrides_defaults() {
    let mut source = make_source("events", SourceKind::Event);
    source.name_denylist = Some(vec![]);
    assert!(source.denied_names().is_empty());
}

#[test]
fn validate_rejects_empty_name() {
    let sources_file = SourcesFile {
        sources: vec![make_source("  ", SourceKind::Event)],
    };
    let err = validate_sources(&sources_file).unwrap_err();
    assert!(err.to_string().contains("non-empty"));
}

#[test]
fn validate_rejects_relative_base_url() {
    let mut source = make_source("events", SourceKind::Event);
    source.base_url = "/en/".to_string();
    let sources_file = SourcesFile {
        sources: vec![source],
    };
    let err = validate_sources(&sources_file).unwrap_err();
    assert!(err.to_string().contains("absolute http(s) URL"));
}

#[test]
fn validate_rejects_duplicate_name() {
    let sources_file = SourcesFile {
        sources: vec![
            make_source("Events", SourceKind::Event),
            make_source("events", SourceKind::Event),
        ],
    };
    let err = validate_sources(&sources_file).unwrap_err();
    assert!(err.to_string().contains("duplicate source name"));
}

#[test]
fn validate_rejects_duplicate_slug() {
    let sources_file = SourcesFile {
        sources: vec![
            make_source("go tokyo", SourceKind::Event),
            make_source("go-tokyo", SourceKind::Event),
        ],
    };
    let err = validate_sources(&sources_file).unwrap_err();
    assert!(err.to_string().contains("duplicate source slug"));
}

#[test]
fn validate_rejects_empty_slug() {
    let sources_file = SourcesFile {
        sources: vec![make_source("!!!", SourceKind::Event)],
    };
    let err = validate_sources(&sources_file).unwrap_err();
    assert!(err.to_string().contains("empty slug"));
}

#[test]
fn find_matches_name_or_slug() {
    let sources_file = SourcesFile {
        sources: vec![make_source("Go Tokyo Events", SourceKind::Event)],
    };
    assert!(sources_file.find("go tokyo events").is_some());
    assert!(sources_file.find("go_tokyo_events").is_some());
    assert!(sources_file.find("tabelog").is_none());
}

#[test]
fn parses_yaml_with_optional_fields() {
    let yaml = r"
sources:
  - name: shops
    kind: directory
    base_url: https://example.org/
    default_type: shop
    excluded_url_suffixes: [/index.html]
";
    let file: SourcesFile = serde_yaml::from_str(yaml).expect("valid yaml");
    let source = &file.sources[0];
    assert_eq!(source.kind, SourceKind::Directory);
    assert_eq!(source.default_type, Some(PoiType::Shop));
    assert_eq!(source.excluded_suffixes(), vec!["/index.html".to_string()]);
}

#[test]
fn load_sources_from_real_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("sources.yaml");
    assert!(
        path.exists(),
        "sources.yaml missing at {path:?}; required for this test"
    );
    let sources_file = load_sources(&path).expect("failed to load sources.yaml");
    assert!(sources_file.find("gotokyo_events").is_some());
    assert!(sources_file.find("tabelog_tokyo").is_some());
}

#[test]
fn load_sources_reports_missing_file() {
    let err = load_sources(Path::new("/definitely/not/here/sources.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::SourcesFileIo { .. }));
}

#[test]
fn source_kind_display() {
    assert_eq!(SourceKind::Event.to_string(), "event");
    assert_eq!(SourceKind::Directory.to_string(), "directory");
}
