use super::*;

#[test]
fn display_prefixes_are_stable() {
    let parse = GlyphFxError::from(ParseError::new(3, ParseErrorKind::UnterminatedTag));
    assert!(parse.to_string().contains("parse error:"));
    assert!(parse.to_string().contains("at byte 3"));

    let timeline = GlyphFxError::from(TimelineError::PauseOutOfBounds {
        index: 9,
        char_count: 4,
    });
    assert!(timeline.to_string().contains("timeline error:"));

    assert!(
        GlyphFxError::document("x")
            .to_string()
            .contains("document error:")
    );
    assert!(GlyphFxError::config("x").to_string().contains("config error:"));
    assert!(
        GlyphFxError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn handler_error_names_the_tag() {
    let err = GlyphFxError::handler(
        "wave",
        HandlerError::invalid_attribute("amp", "loud", "expected a number"),
    );
    let msg = err.to_string();
    assert!(msg.contains("'wave'"));
    assert!(msg.contains("\"loud\""));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn range_out_of_bounds_reports_range_and_count() {
    let err = TimelineError::RangeOutOfBounds {
        range: CharRange { start: 3, end: 9 },
        char_count: 4,
    };
    assert_eq!(
        err.to_string(),
        "range [3, 9) is out of bounds for 4 characters"
    );
}

#[test]
fn inverted_range_reports_range() {
    let err = TimelineError::InvertedRange {
        range: CharRange { start: 3, end: 1 },
    };
    assert_eq!(err.to_string(), "range [3, 1) starts after it ends");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = GlyphFxError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
