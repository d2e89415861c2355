use super::*;
use crate::foundation::error::HandlerError;
use crate::modifier::character::CharacterModifier;
use crate::modifier::provider::TagContext;

struct Noop;

impl ModifierProvider for Noop {
    fn create_modifier(
        &self,
        _ctx: &TagContext<'_>,
    ) -> Result<Option<CharacterModifier>, HandlerError> {
        Ok(None)
    }
}

fn handler() -> (Arc<dyn ModifierProvider>, TagHandler) {
    let p: Arc<dyn ModifierProvider> = Arc::new(Noop);
    (p.clone(), TagHandler::Modifier(p))
}

fn is_same(resolved: Option<&TagHandler>, expected: &Arc<dyn ModifierProvider>) -> bool {
    matches!(resolved, Some(TagHandler::Modifier(p)) if Arc::ptr_eq(p, expected))
}

#[test]
fn case_insensitive_collision_last_wins() {
    let (a, ha) = handler();
    let (b, hb) = handler();
    let registry = TagHandlerRegistry::build([
        TagHandlerRegistration::new("x", ha),
        TagHandlerRegistration::new("X", hb),
    ]);
    assert_eq!(registry.len(), 1);
    assert!(is_same(registry.resolve("x"), &b));
    assert!(is_same(registry.resolve("X"), &b));
    assert!(!is_same(registry.resolve("x"), &a));
}

#[test]
fn malformed_registrations_are_dropped() {
    let (_, h) = handler();
    let registry = TagHandlerRegistry::build([
        TagHandlerRegistration::new("", h.clone()),
        TagHandlerRegistration::new("   ", h),
        TagHandlerRegistration {
            identifier: "wave".to_owned(),
            handler: None,
        },
    ]);
    assert!(registry.is_empty());
    assert!(registry.resolve("wave").is_none());
}

#[test]
fn unknown_identifier_is_none() {
    let (a, h) = handler();
    let registry = TagHandlerRegistry::build([TagHandlerRegistration::new("Wave", h)]);
    assert!(is_same(registry.resolve("WAVE"), &a));
    assert!(registry.resolve("shake").is_none());
}

#[test]
fn debug_names_capability() {
    let (_, h) = handler();
    assert_eq!(format!("{h:?}"), "TagHandler(\"modifier\")");
}
