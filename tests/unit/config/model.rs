use super::*;

#[test]
fn empty_object_uses_defaults() {
    let config = GlyphFxConfig::from_json_str("{}").unwrap();
    assert_eq!(config, GlyphFxConfig::default());
    assert_eq!(config.resolve_options(), ResolveOptions::default());
    assert!(config.registry().is_empty());
}

#[test]
fn parses_policies_and_pacing() {
    let config = GlyphFxConfig::from_json_str(
        r#"{
            "pacing": { "interval_secs": 0.1 },
            "on_handler_error": "skip_subtree",
            "unknown_tags": "literal"
        }"#,
    )
    .unwrap();
    let opts = config.resolve_options();
    assert_eq!(opts.pacing.interval_secs, 0.1);
    assert_eq!(opts.pacing.start_delay_secs, 0.0);
    assert_eq!(opts.on_handler_error, HandlerErrorPolicy::SkipSubtree);
    assert_eq!(opts.unknown_tags, UnknownTagPolicy::Literal);
}

#[test]
fn handler_params_fall_back_to_defaults() {
    let config = GlyphFxConfig::from_json_str(
        r##"{ "tags": [
            { "id": "f", "handler": { "kind": "fade", "duration_secs": 1.5 } },
            { "id": "g", "handler": { "kind": "group" } },
            { "id": "t", "handler": { "kind": "tint", "color": "#00ff00" } }
        ] }"##,
    )
    .unwrap();
    assert_eq!(
        config.tags[0].handler,
        Some(HandlerDef::Fade(Fade {
            duration_secs: 1.5,
            ..Fade::default()
        }))
    );
    assert_eq!(config.tags[1].handler, Some(HandlerDef::Group));
    match &config.tags[2].handler {
        Some(HandlerDef::Tint(t)) => {
            assert_eq!(t.color, Some(crate::foundation::core::Rgba::rgba(0.0, 1.0, 0.0, 1.0)));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn malformed_entries_reach_the_registry_drop_policy() {
    let config = GlyphFxConfig::from_path("tests/data/lenient.json").unwrap();
    let regs = config.registrations();
    assert_eq!(regs.len(), 4);
    assert!(regs[2].handler.is_none());

    let registry = config.registry();
    assert_eq!(registry.len(), 1);
    assert!(registry.resolve("red").is_some());
    assert!(registry.resolve("orphan").is_none());
}

#[test]
fn fixture_declares_every_builtin_kind() {
    let config = GlyphFxConfig::from_path("tests/data/dialogue.json").unwrap();
    assert_eq!(config.tags.len(), 11);
    assert_eq!(config.registry().len(), 11);
    assert_eq!(config.pacing.start_delay_secs, 0.25);
}

#[test]
fn json_round_trips() {
    let config = GlyphFxConfig::from_path("tests/data/dialogue.json").unwrap();
    let json = config.to_json_string().unwrap();
    assert_eq!(GlyphFxConfig::from_json_str(&json).unwrap(), config);
}

#[test]
fn syntax_and_schema_errors_are_serde_errors() {
    for bad in [
        "{",
        r#"{ "on_handler_error": "retry" }"#,
        r#"{ "tags": [ { "id": "x", "handler": { "kind": "sparkle" } } ] }"#,
        r#"{ "tags": [ { "id": "x", "handler": { "kind": "tint", "color": "red" } } ] }"#,
    ] {
        assert!(
            matches!(GlyphFxConfig::from_json_str(bad), Err(GlyphFxError::Serde(_))),
            "{bad}"
        );
    }
}

#[test]
fn out_of_range_values_are_config_errors() {
    let err = GlyphFxConfig::from_json_str(r#"{ "pacing": { "interval_secs": -1 } }"#).unwrap_err();
    assert!(matches!(err, GlyphFxError::Config(_)));
    assert!(err.to_string().contains("$.pacing.interval_secs"));

    let err = GlyphFxConfig::from_json_str(
        r#"{ "tags": [ { "id": "s", "handler": { "kind": "speed", "factor": 0 } } ] }"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("$.tags[0].handler.factor"));
}

#[test]
fn missing_file_is_a_config_error() {
    assert!(matches!(
        GlyphFxConfig::from_path("tests/data/does-not-exist.json"),
        Err(GlyphFxError::Config(_))
    ));
}
