//! glyphfx is an animated rich-text engine.
//!
//! Markup is parsed into a document tree, every tag is resolved through a registry of
//! handlers into per-character modifiers and reveal-timeline requests, and each frame the
//! modifiers are replayed over fresh per-character states:
//!
//! - Parse markup with a [`TagParser`] (the built-in one is [`CurlyParser`])
//! - Build a [`TagHandlerRegistry`], by hand or from a [`GlyphFxConfig`]
//! - [`resolve`] the [`Document`] into a [`Resolution`], or let [`AnimatedText`] do both
//! - Evaluate [`FrameStates`] for any session time
//!
//! Evaluation is deterministic: the same snapshot at the same time yields bit-identical
//! states, sequentially or in parallel.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod config;
mod document;
mod eval;
mod foundation;
mod modifier;
mod parser;
mod registry;
mod resolve;
mod session;
mod state;
mod timeline;

/// Reference tag handlers and their default registrations.
pub mod builtin;

pub use crate::animation::ease::Ease;
pub use crate::config::model::{GlyphFxConfig, HandlerDef, TagDef};
pub use crate::document::node::{Document, Node, NodeId, NodeKind};
pub use crate::document::tag::TagNode;
pub use crate::eval::fingerprint::FrameFingerprint;
pub use crate::eval::frame::FrameStates;
pub use crate::eval::plan::EvaluationPlan;
pub use crate::foundation::core::{Affine, CharRange, Point, Rgba, Vec2};
pub use crate::foundation::error::{
    GlyphFxError, GlyphFxResult, HandlerError, ParseError, ParseErrorKind, TimelineError,
};
pub use crate::modifier::character::{CharacterModifier, ModifyCtx, SubsystemModifier};
pub use crate::modifier::provider::{CompositeProvider, ModifierIter, ModifierProvider, TagContext};
pub use crate::parser::TagParser;
pub use crate::parser::curly::CurlyParser;
pub use crate::registry::handler::{TagHandler, TagHandlerRegistration, TagHandlerRegistry};
pub use crate::resolve::options::{HandlerErrorPolicy, ResolveOptions, UnknownTagPolicy};
pub use crate::resolve::output::OutputText;
pub use crate::resolve::pass::{Resolution, ResolvedModifier, resolve};
pub use crate::session::animated_text::AnimatedText;
pub use crate::state::character::{CharacterState, Subsystem};
pub use crate::state::color::ColorState;
pub use crate::state::material::MaterialState;
pub use crate::state::transform::{PivotGroup, TransformState};
pub use crate::timeline::builder::{RevealPacing, TimelineBuilder, TimelineHandler};
pub use crate::timeline::schedule::TimelineSchedule;
