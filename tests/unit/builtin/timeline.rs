use super::*;
use crate::builtin::builtin_registrations;
use crate::foundation::error::{GlyphFxError, GlyphFxResult};
use crate::parser::TagParser;
use crate::parser::curly::CurlyParser;
use crate::registry::handler::TagHandlerRegistry;
use crate::resolve::options::ResolveOptions;
use crate::resolve::pass::resolve;
use crate::timeline::builder::RevealPacing;
use crate::timeline::schedule::TimelineSchedule;

fn schedule(markup: &str) -> GlyphFxResult<TimelineSchedule> {
    let registry = TagHandlerRegistry::build(builtin_registrations());
    let options = ResolveOptions {
        pacing: RevealPacing {
            interval_secs: 1.0,
            start_delay_secs: 0.0,
        },
        ..ResolveOptions::default()
    };
    let doc = CurlyParser.parse(markup)?;
    Ok(resolve(&doc, &registry, &options)?.schedule().clone())
}

#[test]
fn delay_shifts_the_wrapped_text() {
    let s = schedule("a{delay=2}bc{/delay}d").unwrap();
    assert_eq!(s.reveal_times(), &[0.0, 3.0, 4.0, 3.0]);
    assert_eq!(s.duration(), 4.0);
}

#[test]
fn pause_holds_before_the_next_character() {
    let s = schedule("ab{pause=0.5/}cd").unwrap();
    assert_eq!(s.reveal_times(), &[0.0, 1.0, 2.5, 3.5]);
    assert_eq!(s.duration(), 4.5);
}

#[test]
fn trailing_pause_only_lengthens_the_schedule() {
    let s = schedule("ab{pause secs=2/}").unwrap();
    assert_eq!(s.reveal_times(), &[0.0, 1.0]);
    assert_eq!(s.duration(), 4.0);
}

#[test]
fn group_reveals_together() {
    let s = schedule("a{group}bcd{/group}e").unwrap();
    assert_eq!(s.reveal_times(), &[0.0, 1.0, 1.0, 1.0, 4.0]);
}

#[test]
fn speed_shortens_intervals() {
    let s = schedule("{speed=2}ab{/speed}cd").unwrap();
    assert_eq!(s.reveal_times(), &[0.0, 0.5, 1.0, 2.0]);
}

#[test]
fn invalid_parameters_are_handler_errors() {
    for markup in ["{speed=0}a{/speed}", "{delay=-1}a{/delay}", "{pause=x/}a"] {
        assert!(
            matches!(schedule(markup), Err(GlyphFxError::Handler { .. })),
            "{markup}"
        );
    }
}

#[test]
fn handlers_use_their_configured_defaults() {
    let mut builder = TimelineBuilder::new(2, RevealPacing::INSTANT);
    let doc = CurlyParser.parse("{pause}ab{/pause}").unwrap();
    let tag_id = doc.children(doc.root())[0];
    let ctx = TagContext {
        document: &doc,
        node: tag_id,
        tag: doc.tag(tag_id).unwrap(),
        range: crate::foundation::core::CharRange { start: 0, end: 2 },
    };
    Pause { secs: 1.5 }.apply(&ctx, &mut builder).unwrap();
    Delay { secs: 0.25 }.apply(&ctx, &mut builder).unwrap();
    let s = builder.finalize().unwrap();
    assert_eq!(s.reveal_times(), &[1.75, 1.75]);
}
