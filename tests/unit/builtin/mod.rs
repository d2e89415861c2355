use super::*;
use crate::registry::handler::TagHandlerRegistry;

#[test]
fn builtin_names_are_distinct() {
    let regs = builtin_registrations();
    let registry = TagHandlerRegistry::build(regs.clone());
    assert_eq!(registry.len(), regs.len());
    for name in ["tint", "FADE", "pop", "group_pivot", "speed"] {
        assert!(registry.resolve(name).is_some(), "{name}");
    }
}

#[test]
fn primary_prefers_named_then_short_form_then_default() {
    let named = TagNode::new("t").with_attr("secs", "2").with_attr("value", "3");
    assert_eq!(primary(&named, "secs", 1.0).unwrap(), 2.0);
    let short = TagNode::new("t").with_attr("value", "3");
    assert_eq!(primary(&short, "secs", 1.0).unwrap(), 3.0);
    assert_eq!(primary(&TagNode::new("t"), "secs", 1.0).unwrap(), 1.0);
    let bad = TagNode::new("t").with_attr("value", "soon");
    assert!(matches!(
        primary(&bad, "secs", 1.0),
        Err(HandlerError::InvalidAttribute { .. })
    ));
}

#[test]
fn negative_values_are_rejected() {
    assert_eq!(non_negative("secs", 0.0).unwrap(), 0.0);
    let err = non_negative("secs", -1.0).unwrap_err();
    assert!(err.to_string().contains("'secs'"));
}

#[test]
fn ease_attribute_is_parsed() {
    let tag = TagNode::new("fade").with_attr("ease", "in_cubic");
    assert_eq!(ease(&tag, Ease::Linear).unwrap(), Ease::InCubic);
    assert_eq!(ease(&TagNode::new("fade"), Ease::OutQuad).unwrap(), Ease::OutQuad);
    let bad = TagNode::new("fade").with_attr("ease", "wobbly");
    assert!(ease(&bad, Ease::Linear).is_err());
}

#[test]
fn reveal_progress_clamps_and_handles_zero_duration() {
    assert_eq!(reveal_progress(-1.0, 2.0), 0.0);
    assert_eq!(reveal_progress(1.0, 2.0), 0.5);
    assert_eq!(reveal_progress(5.0, 2.0), 1.0);
    assert_eq!(reveal_progress(0.0, 0.0), 1.0);
    assert_eq!(reveal_progress(-0.1, 0.0), 0.0);
}
