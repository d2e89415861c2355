use crate::document::node::{Document, NodeId, NodeKind};
use crate::document::tag::TagNode;
use crate::foundation::core::CharRange;
use crate::foundation::error::{GlyphFxError, GlyphFxResult, HandlerError};
use crate::modifier::character::CharacterModifier;
use crate::modifier::provider::TagContext;
use crate::registry::handler::{TagHandler, TagHandlerRegistry};
use crate::resolve::options::{HandlerErrorPolicy, ResolveOptions, UnknownTagPolicy};
use crate::resolve::output::OutputText;
use crate::timeline::builder::TimelineBuilder;
use crate::timeline::schedule::TimelineSchedule;

/// A modifier attached to the character slots of the tag that produced it.
#[derive(Clone, Debug)]
pub struct ResolvedModifier {
    /// The modifier.
    pub modifier: CharacterModifier,
    /// Slots it applies to.
    pub range: CharRange,
    /// Name of the source tag.
    pub tag: String,
}

/// Immutable snapshot produced by one resolution pass over one document.
#[derive(Clone, Debug)]
pub struct Resolution {
    modifiers: Vec<ResolvedModifier>,
    schedule: TimelineSchedule,
    output: OutputText,
}

impl Resolution {
    /// Modifiers in document pre-order; composite expansions keep their own order.
    pub fn modifiers(&self) -> &[ResolvedModifier] {
        &self.modifiers
    }

    /// Finalized reveal schedule.
    pub fn schedule(&self) -> &TimelineSchedule {
        &self.schedule
    }

    /// Output text and slot mapping.
    pub fn output(&self) -> &OutputText {
        &self.output
    }

    /// Number of character slots.
    pub fn char_count(&self) -> usize {
        self.output.char_count()
    }
}

/// Walk `document` depth-first, dispatch every tag to its registered handler, and collect
/// modifiers plus the reveal schedule.
///
/// A tag's handler runs after its children have been walked, so it sees the character range
/// its descendant text spans. Its output is still ordered ahead of anything its descendants
/// produced, keeping the result in document pre-order.
#[tracing::instrument(skip_all, fields(nodes = document.len()))]
pub fn resolve(
    document: &Document,
    registry: &TagHandlerRegistry,
    options: &ResolveOptions,
) -> GlyphFxResult<Resolution> {
    document.validate()?;

    let char_count = count_slots(document, registry, options.unknown_tags);
    let mut resolver = Resolver {
        document,
        registry,
        options,
        cursor: 0,
        modifiers: Vec::new(),
        timeline: TimelineBuilder::new(char_count, options.pacing),
        output: OutputText::default(),
    };
    resolver.visit(document.root())?;
    debug_assert_eq!(resolver.cursor, char_count);

    let schedule = resolver.timeline.finalize()?;
    Ok(Resolution {
        modifiers: resolver.modifiers,
        schedule,
        output: resolver.output,
    })
}

fn count_slots(
    document: &Document,
    registry: &TagHandlerRegistry,
    policy: UnknownTagPolicy,
) -> usize {
    document
        .preorder()
        .into_iter()
        .map(|id| match document.kind(id) {
            Some(NodeKind::TextRun(text)) => text.chars().count(),
            Some(NodeKind::Tag(tag))
                if policy == UnknownTagPolicy::Literal && registry.resolve(tag.name()).is_none() =>
            {
                literal_len(tag.open_markup()) + literal_len(tag.close_markup())
            }
            _ => 0,
        })
        .sum()
}

fn literal_len(markup: Option<&str>) -> usize {
    markup.map_or(0, |m| m.chars().count())
}

struct Resolver<'a> {
    document: &'a Document,
    registry: &'a TagHandlerRegistry,
    options: &'a ResolveOptions,
    cursor: usize,
    modifiers: Vec<ResolvedModifier>,
    timeline: TimelineBuilder,
    output: OutputText,
}

impl<'a> Resolver<'a> {
    fn visit(&mut self, id: NodeId) -> GlyphFxResult<()> {
        let document = self.document;
        match document.kind(id) {
            Some(NodeKind::Root { children }) => {
                for &child in children {
                    self.visit(child)?;
                }
            }
            Some(NodeKind::TextRun(text)) => self.push_slots(text),
            Some(NodeKind::Passthrough(markup)) => self.output.push_verbatim(markup),
            Some(NodeKind::Tag(tag)) => self.visit_tag(id, tag)?,
            None => {
                return Err(GlyphFxError::document(format!("unknown node {id:?}")));
            }
        }
        Ok(())
    }

    fn push_slots(&mut self, text: &str) {
        self.output.push_slots(text);
        self.cursor += text.chars().count();
    }

    fn visit_children(&mut self, id: NodeId) -> GlyphFxResult<()> {
        let document = self.document;
        for &child in document.children(id) {
            self.visit(child)?;
        }
        Ok(())
    }

    fn visit_tag(&mut self, id: NodeId, tag: &'a TagNode) -> GlyphFxResult<()> {
        let registry = self.registry;
        let Some(handler) = registry.resolve(tag.name()) else {
            tracing::debug!(tag = tag.name(), "no handler registered");
            let literal = self.options.unknown_tags == UnknownTagPolicy::Literal;
            if literal && let Some(open) = tag.open_markup() {
                self.push_slots(open);
            }
            self.visit_children(id)?;
            if literal && let Some(close) = tag.close_markup() {
                self.push_slots(close);
            }
            return Ok(());
        };

        let start = self.cursor;
        let modifier_mark = self.modifiers.len();
        let timeline_mark = self.timeline.mark();

        self.visit_children(id)?;

        let ctx = TagContext {
            document: self.document,
            node: id,
            tag,
            range: CharRange {
                start,
                end: self.cursor,
            },
        };
        match self.invoke(handler, ctx, timeline_mark) {
            Ok(produced) => {
                let resolved = produced.into_iter().map(|modifier| ResolvedModifier {
                    modifier,
                    range: ctx.range,
                    tag: tag.name().to_owned(),
                });
                let descendants = self.modifiers.split_off(modifier_mark);
                self.modifiers.extend(resolved);
                self.modifiers.extend(descendants);
                Ok(())
            }
            Err(source) => match self.options.on_handler_error {
                HandlerErrorPolicy::Abort => Err(GlyphFxError::handler(tag.name(), source)),
                HandlerErrorPolicy::SkipSubtree => {
                    tracing::warn!(
                        tag = tag.name(),
                        range = %ctx.range,
                        error = %source,
                        "skipping tag subtree after handler error"
                    );
                    self.modifiers.truncate(modifier_mark);
                    self.timeline.truncate(timeline_mark);
                    Ok(())
                }
            },
        }
    }

    fn invoke(
        &mut self,
        handler: &TagHandler,
        ctx: TagContext<'_>,
        timeline_mark: usize,
    ) -> Result<Vec<CharacterModifier>, HandlerError> {
        match handler {
            TagHandler::Modifier(p) => Ok(p.create_modifier(&ctx)?.into_iter().collect()),
            TagHandler::Composite(p) => p.create_modifiers(ctx).collect(),
            TagHandler::Timeline(h) => {
                let tail = self.timeline.mark();
                h.apply(&ctx, &mut self.timeline)?;
                self.timeline.hoist(timeline_mark, tail);
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/pass.rs"]
mod tests;
