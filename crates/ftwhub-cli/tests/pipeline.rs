//! Data directory to rendered output, end to end.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use ftwhub_cli::commands::{load_events, render};
use ftwhub_cli::{ClientError, LoadError};
use tempfile::TempDir;

fn write(root: &Path, name: &str, content: &str) {
    let path = root.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "series.yaml",
        r#"
series:
  abend:
    defaults:
      description: Offener Tanzabend mit Live-Musik
      links:
        homepage: 'https://example.org/abend'
"#,
    );
    write(
        dir.path(),
        "events/2024-05.yaml",
        r#"
events:
  - title: Tanzabend im Mai
    series: abend
    start: 2024-05-03 19:30:00
    links:
      fb.event: 'https://facebook.com/events/1'
  - title: Frühlingsball
    start: 2024-05-18
    workshop_event:
      title: Ball-Vorbereitung
      start: 2024-05-18 14:00:00
"#,
    );
    write(
        dir.path(),
        "events/2024-06.yaml",
        r#"
events:
  - title: Tanzabend im Juni
    series: abend
    start: 2024-06-07 19:30:00
    description: Diesmal im Garten
"#,
    );
    dir
}

fn render_json(f: impl FnOnce(&mut Vec<u8>)) -> serde_json::Value {
    let mut buf = Vec::new();
    f(&mut buf);
    serde_json::from_slice(&buf).unwrap()
}

#[test]
fn events_from_several_files_are_normalized_and_sorted() {
    let dir = data_dir();
    let events = load_events(Some(dir.path())).unwrap();

    let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Tanzabend im Mai",
            "Frühlingsball",
            "Ball-Vorbereitung",
            "Tanzabend im Juni"
        ]
    );

    let may = &events[0];
    assert_eq!(may.description, "Offener Tanzabend mit Live-Musik");
    let link_types: Vec<&str> = may.links.iter().map(|l| l.link_type.as_str()).collect();
    assert_eq!(link_types, vec!["fb.event", "homepage"]);

    let june = &events[3];
    assert_eq!(june.description, "Diesmal im Garten");

    let workshop = &events[2];
    assert!(workshop.workshop && workshop.sub_event && !workshop.social);
}

#[test]
fn month_summary_from_data_dir() {
    let dir = data_dir();
    let events = load_events(Some(dir.path())).unwrap();
    let json = render_json(|out| {
        render::monatsuebersicht_html(&events, "2024-05", out, false).unwrap();
    });

    let titles = |bucket: &str| -> Vec<String> {
        json[bucket]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["title"].as_str().unwrap().to_string())
            .collect()
    };
    assert_eq!(titles("events"), vec!["Tanzabend im Mai", "Frühlingsball"]);
    assert_eq!(titles("workshops"), vec!["Ball-Vorbereitung"]);
    assert_eq!(titles("preview"), vec!["Tanzabend im Juni"]);
}

#[test]
fn website_listing_from_data_dir() {
    let dir = data_dir();
    let events = load_events(Some(dir.path())).unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
    let json = render_json(|out| render::folktanz_at(&events, today, out, false).unwrap());

    let groups = json.as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["name"], "Juni 2024");
    assert_eq!(groups[0]["events"][0]["title"], "Tanzabend im Juni");
}

#[test]
fn no_data_dir_renders_empty_output() {
    let events = load_events(None).unwrap();
    assert!(events.is_empty());
    let json = render_json(|out| render::events(&events, out, false).unwrap());
    assert_eq!(json, serde_json::json!([]));
}

#[test]
fn invalid_event_fails_the_run() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "events.yaml", "events:\n  - title: Ohne Datum\n");
    let err = load_events(Some(dir.path())).unwrap_err();
    assert!(matches!(err, ClientError::Normalize(_)));
    assert!(err.to_string().contains("Ohne Datum"));
}

#[test]
fn broken_yaml_fails_the_run() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "events.yaml", "events: [\n");
    let err = load_events(Some(dir.path())).unwrap_err();
    assert!(matches!(err, ClientError::Load(LoadError::Yaml { .. })));
}
