use super::*;

#[test]
fn default_is_the_reference_booth() {
    let cfg = BoothConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.layout.slot_count(), 3);
    assert_eq!(cfg.layout.canvas.width, 300);
    assert_eq!(cfg.layout.canvas.height, 900);
    assert_eq!(cfg.layout.fit, FitStrategy::Cover);
    assert_eq!(cfg.countdown.seconds, 3);
    assert_eq!(cfg.countdown.step(), Duration::from_millis(800));
    assert_eq!(cfg.overlays.len(), 3);
}

#[test]
fn parses_json_with_defaults() {
    let json = r#"
{
  "canvas": { "width": 100, "height": 300 },
  "slots": [
    { "x": 5, "y": 10, "width": 90, "height": 67.5 }
  ],
  "overlays": ["frames/a.png"]
}
"#;
    let cfg = BoothConfig::from_reader(json.as_bytes()).unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.layout.fit, FitStrategy::Cover);
    assert_eq!(cfg.countdown, CountdownConfig::default());
    assert_eq!(cfg.layout.slots[0], Slot::new(5.0, 10.0, 90.0, 67.5));
}

#[test]
fn round_trips_through_json() {
    let mut cfg = BoothConfig::default();
    cfg.layout.fit = FitStrategy::Contain;
    let s = serde_json::to_string(&cfg).unwrap();
    assert!(s.contains("\"fit\":\"contain\""));
    let back = BoothConfig::from_reader(s.as_bytes()).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn validate_rejects_bad_layouts() {
    let mut cfg = BoothConfig::default();
    cfg.layout.slots.clear();
    assert!(cfg.validate().is_err());

    let mut cfg = BoothConfig::default();
    cfg.layout.slots[1].height = 0.0;
    let err = cfg.validate().unwrap_err().to_string();
    assert!(err.contains("slot 1"));

    let mut cfg = BoothConfig::default();
    cfg.layout.canvas.width = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = BoothConfig::default();
    cfg.overlays.clear();
    assert!(cfg.validate().is_err());

    let mut cfg = BoothConfig::default();
    cfg.overlays[0] = "../outside.png".to_string();
    assert!(cfg.validate().is_err());
}

#[test]
fn malformed_json_is_a_validation_error() {
    let err = BoothConfig::from_reader("{".as_bytes()).unwrap_err();
    assert!(err.to_string().contains("parse booth config JSON"));
    assert!(BoothConfig::from_path("does/not/exist.json").is_err());
}

#[test]
fn normalize_rel_path_rules() {
    assert_eq!(normalize_rel_path("a/./b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./").is_err());
    assert!(normalize_rel_path("a/../b.png").is_err());
}
