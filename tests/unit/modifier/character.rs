use super::*;
use crate::foundation::core::{Rgba, Vec2};

fn ctx(char_index: usize) -> ModifyCtx {
    ModifyCtx {
        char_index,
        session_elapsed: 1.0,
        char_elapsed: 0.5,
        range: CharRange { start: 2, end: 6 },
    }
}

#[derive(Debug)]
struct Lift(f64);

impl SubsystemModifier<TransformState> for Lift {
    fn modify(&self, state: &mut TransformState, ctx: &ModifyCtx) {
        state.position.y += self.0 * ctx.index_in_range() as f64;
    }
}

#[test]
fn modifier_only_writes_its_subsystem() {
    let tint = CharacterModifier::color(|state: &mut ColorState, _: &ModifyCtx| {
        state.set_rgb(Rgba::rgba(1.0, 0.0, 0.0, 1.0));
    });
    assert_eq!(tint.subsystem(), Subsystem::Color);

    let mut state = CharacterState::default();
    tint.apply(&mut state, &ctx(3));
    assert!(state.color.override_rgb);
    assert_eq!(state.material, MaterialState::default());
    assert_eq!(state.transform, TransformState::default());
}

#[test]
fn struct_modifiers_see_context() {
    let lift = CharacterModifier::transform(Lift(2.0));
    assert_eq!(lift.subsystem(), Subsystem::Transform);

    let mut state = CharacterState::default();
    lift.apply(&mut state, &ctx(4));
    assert_eq!(state.transform.position, Vec2::new(0.0, 4.0));
}

#[test]
fn material_modifier_targets_material() {
    let m = CharacterModifier::material(|state: &mut MaterialState, ctx: &ModifyCtx| {
        state.set(9, ctx.session_elapsed);
    });
    let mut state = CharacterState::default();
    m.apply(&mut state, &ctx(2));
    assert_eq!(state.material.get(9), Some(1.0));
    assert_eq!(format!("{m:?}"), "CharacterModifier(Material)");
}

#[test]
fn ctx_reveal_flag_follows_char_elapsed() {
    let mut c = ctx(2);
    assert!(c.is_revealed());
    c.char_elapsed = -0.1;
    assert!(!c.is_revealed());
    assert_eq!(c.index_in_range(), 0);
}
