use super::*;
use crate::foundation::error::HandlerError;
use crate::modifier::character::CharacterModifier;
use crate::modifier::provider::{ModifierProvider, TagContext};
use crate::parser::TagParser;
use crate::parser::curly::CurlyParser;
use crate::registry::handler::{TagHandler, TagHandlerRegistration, TagHandlerRegistry};
use crate::resolve::options::ResolveOptions;
use crate::resolve::pass::resolve;
use crate::state::color::ColorState;
use crate::state::material::MaterialState;
use crate::state::transform::TransformState;
use crate::timeline::builder::RevealPacing;

struct Alpha;

impl ModifierProvider for Alpha {
    fn create_modifier(
        &self,
        ctx: &TagContext<'_>,
    ) -> Result<Option<CharacterModifier>, HandlerError> {
        let a = ctx.tag.attr_f64_or("a", 1.0)?;
        Ok(Some(CharacterModifier::color(
            move |state: &mut ColorState, _: &ModifyCtx| state.set_alpha(a),
        )))
    }
}

struct Nudge;

impl ModifierProvider for Nudge {
    fn create_modifier(
        &self,
        _ctx: &TagContext<'_>,
    ) -> Result<Option<CharacterModifier>, HandlerError> {
        Ok(Some(CharacterModifier::transform(
            |state: &mut TransformState, _: &ModifyCtx| state.position.x += 1.0,
        )))
    }
}

struct Probe;

impl ModifierProvider for Probe {
    fn create_modifier(
        &self,
        _ctx: &TagContext<'_>,
    ) -> Result<Option<CharacterModifier>, HandlerError> {
        Ok(Some(CharacterModifier::material(
            |state: &mut MaterialState, ctx: &ModifyCtx| {
                state.set(0, ctx.char_elapsed);
                state.set(1, ctx.index_in_range() as f64);
                state.set(2, ctx.session_elapsed);
            },
        )))
    }
}

fn plan_for(markup: &str) -> EvaluationPlan {
    let registry = TagHandlerRegistry::build([
        TagHandlerRegistration::new("alpha", TagHandler::modifier(Alpha)),
        TagHandlerRegistration::new("nudge", TagHandler::modifier(Nudge)),
        TagHandlerRegistration::new("probe", TagHandler::modifier(Probe)),
    ]);
    let options = ResolveOptions {
        pacing: RevealPacing {
            interval_secs: 0.5,
            start_delay_secs: 1.0,
        },
        ..ResolveOptions::default()
    };
    let doc = CurlyParser.parse(markup).unwrap();
    EvaluationPlan::new(&resolve(&doc, &registry, &options).unwrap())
}

#[test]
fn later_modifier_wins_within_a_subsystem() {
    let plan = plan_for("{alpha a=0.2}ab{alpha a=0.7}c{/alpha}{/alpha}d");
    let frame = plan.evaluate(10.0);
    let alphas: Vec<f64> = frame.states().iter().map(|s| s.color.color.a).collect();
    assert_eq!(alphas, vec![0.2, 0.2, 0.7, 0.0]);
}

#[test]
fn subsystems_do_not_interact() {
    let plan = plan_for("{nudge}{alpha a=0.5}x{/alpha}{/nudge}");
    let frame = plan.evaluate(10.0);
    let s = frame.state(0).unwrap();
    assert_eq!(s.color.color.a, 0.5);
    assert_eq!(s.transform.position.x, 1.0);
    assert!(s.material.is_empty());
}

#[test]
fn states_reset_every_pass() {
    let plan = plan_for("{nudge}ab{/nudge}");
    let mut frame = FrameStates::default();
    plan.evaluate_into(3.0, &mut frame);
    plan.evaluate_into(3.0, &mut frame);
    assert_eq!(frame.len(), 2);
    assert_eq!(frame.state(1).unwrap().transform.position.x, 1.0);
}

#[test]
fn modifiers_see_character_elapsed_time() {
    let plan = plan_for("z{probe}abc{/probe}");
    let frame = plan.evaluate(2.0);
    // Reveal times: 1.0, 1.5, 2.0, 2.5.
    let c = frame.state(3).unwrap();
    assert_eq!(c.material.get(0), Some(-0.5));
    assert_eq!(c.material.get(1), Some(2.0));
    assert_eq!(c.material.get(2), Some(2.0));
    assert!(frame.is_revealed(2));
    assert!(!frame.is_revealed(3));
    assert_eq!(frame.state(0).unwrap().material.len(), 0);
}

#[test]
fn evaluation_is_idempotent() {
    let plan = plan_for("{probe}{alpha a=0.3}hello{/alpha}{/probe} {nudge}world{/nudge}");
    let a = plan.evaluate(1.75);
    let b = plan.evaluate(1.75);
    assert_eq!(a, b);
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_ne!(a.fingerprint(), plan.evaluate(1.8).fingerprint());
}

#[test]
fn parallel_matches_sequential() {
    let plan = plan_for("{probe}{alpha a=0.3}hello{/alpha}{/probe} {nudge}world{/nudge}");
    for t in [0.0, 1.2, 3.3, 9.0] {
        let seq = plan.evaluate(t);
        let mut par = FrameStates::new(1);
        plan.evaluate_parallel(t, &mut par);
        assert_eq!(seq, par);
        assert_eq!(seq.fingerprint(), par.fingerprint());
    }
}

#[test]
fn plan_indexes_modifiers_by_character() {
    let plan = plan_for("a{alpha}b{nudge}c{/nudge}{/alpha}");
    assert_eq!(plan.char_count(), 3);
    assert_eq!(plan.modifiers_for(0).count(), 0);
    assert_eq!(plan.modifiers_for(1).count(), 1);
    let tags: Vec<&str> = plan.modifiers_for(2).map(|m| m.tag.as_str()).collect();
    assert_eq!(tags, vec!["alpha", "nudge"]);
    assert_eq!(plan.modifiers_for(99).count(), 0);
}
