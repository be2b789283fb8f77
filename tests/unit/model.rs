use super::*;

#[test]
fn defaults_match_the_input_surface() {
    let o = LayoutOptions::default();
    assert_eq!(o.name_size, 45);
    assert_eq!(o.text_size, 40);
    assert!(o.show_name);
    assert!(!o.shadow_enabled);
    assert_eq!(o.shadow_offset, 2);
    assert!(!o.add_letterbox);
    assert!(!o.trims_top());
    o.validate().unwrap();
}

#[test]
fn zero_sizes_are_rejected() {
    let o = LayoutOptions {
        text_size: 0,
        ..LayoutOptions::default()
    };
    assert!(o.validate().is_err());

    let o = LayoutOptions {
        name_size: 0,
        ..LayoutOptions::default()
    };
    assert!(o.validate().is_err());
}

#[test]
fn trim_top_requires_letterbox() {
    let o = LayoutOptions {
        trim_top: true,
        ..LayoutOptions::default()
    };
    assert!(!o.trims_top());
    let o = LayoutOptions {
        add_letterbox: true,
        ..o
    };
    assert!(o.trims_top());
}

#[test]
fn config_json_fills_missing_fields_with_defaults() {
    let json = r#"{ "options": { "main_text": "Hello\nWorld", "shadow_enabled": true } }"#;
    let cfg = CardConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.options.main_text, "Hello\nWorld");
    assert!(cfg.options.shadow_enabled);
    assert_eq!(cfg.options.text_size, 40);
    assert!(cfg.default_font.is_none());
}

#[test]
fn config_json_rejects_invalid_options() {
    let json = r#"{ "options": { "text_size": 0 } }"#;
    assert!(CardConfig::from_reader(json.as_bytes()).is_err());
    assert!(CardConfig::from_reader("{ nope".as_bytes()).is_err());
}

#[test]
fn config_from_path_resolves_relative_font() {
    let dir = std::env::temp_dir().join(format!("umagen_config_test_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("card.json");
    std::fs::write(&path, r#"{ "default_font": "fonts/card.ttf" }"#).unwrap();

    let cfg = CardConfig::from_path(&path).unwrap();
    assert_eq!(cfg.default_font, Some(dir.join("fonts/card.ttf")));

    let _ = std::fs::remove_dir_all(&dir);
    assert!(CardConfig::from_path(dir.join("missing.json")).is_err());
}
