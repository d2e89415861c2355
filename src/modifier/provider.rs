use crate::document::node::{Document, NodeId};
use crate::document::tag::TagNode;
use crate::foundation::core::CharRange;
use crate::foundation::error::HandlerError;
use crate::modifier::character::CharacterModifier;

/// What a tag handler sees when it is invoked.
#[derive(Clone, Copy, Debug)]
pub struct TagContext<'a> {
    /// The whole document, for parent and sibling lookups.
    pub document: &'a Document,
    /// Id of the tag node.
    pub node: NodeId,
    /// The tag itself.
    pub tag: &'a TagNode,
    /// Character slots spanned by the tag's descendant text.
    pub range: CharRange,
}

/// Lazily produced modifiers from a composite provider, consumed once in order.
pub type ModifierIter<'a> = Box<dyn Iterator<Item = Result<CharacterModifier, HandlerError>> + 'a>;

/// Handler that turns a tag into at most one modifier.
pub trait ModifierProvider: Send + Sync {
    /// Build the modifier for `ctx.tag`, or `None` when the tag has no effect.
    fn create_modifier(
        &self,
        ctx: &TagContext<'_>,
    ) -> Result<Option<CharacterModifier>, HandlerError>;
}

/// Handler that expands a tag into an ordered sequence of modifiers, possibly across
/// subsystems. Order is preserved through evaluation.
pub trait CompositeProvider: Send + Sync {
    /// Build a fresh sequence for `ctx.tag`.
    fn create_modifiers<'a>(&'a self, ctx: TagContext<'a>) -> ModifierIter<'a>;
}
