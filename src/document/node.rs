use crate::document::tag::TagNode;
use crate::foundation::error::{GlyphFxError, GlyphFxResult};

/// Index of a node inside its [`Document`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Arena slot of this node.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Payload of a document node.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// Container at the top of the tree.
    Root {
        /// Top-level nodes in document order.
        children: Vec<NodeId>,
    },
    /// Literal characters; each `char` is one animated slot.
    TextRun(String),
    /// Rich-text markup kept verbatim in the output; contributes no slots.
    Passthrough(String),
    /// Tag element owning its children.
    Tag(TagNode),
}

/// One arena entry: payload plus a non-owning parent index.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    parent: Option<NodeId>,
    kind: NodeKind,
}

impl Node {
    /// Owning parent, `None` for the root or a node not yet attached.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Node payload.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Root { children } => children,
            NodeKind::Tag(tag) => &tag.children,
            NodeKind::TextRun(_) | NodeKind::Passthrough(_) => &[],
        }
    }
}

/// Arena-backed document tree.
///
/// Nodes are created detached and attached bottom-up with [`Document::add_child`], which is
/// the only mutation: children are never removed or reordered. Parents own their children
/// through index lists and children point back through a plain index, so the tree cannot
/// form reference cycles.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                kind: NodeKind::Root {
                    children: Vec::new(),
                },
            }],
        }
    }

    /// Id of the root container.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes in the arena, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the document holds nothing but the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Create a detached text run.
    pub fn new_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::TextRun(text.into()))
    }

    /// Create a detached passthrough markup node.
    pub fn new_passthrough(&mut self, markup: impl Into<String>) -> NodeId {
        self.push(NodeKind::Passthrough(markup.into()))
    }

    /// Create a detached tag node. Children already listed on `tag` are ignored; attach them
    /// with [`Document::add_child`].
    pub fn new_tag(&mut self, mut tag: TagNode) -> NodeId {
        tag.children.clear();
        self.push(NodeKind::Tag(tag))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(Node { parent: None, kind });
        id
    }

    /// Append `child` to `parent`'s children and point `child` back at `parent`.
    ///
    /// Fails when either id is unknown, `parent` is not a container, `child` is the root or
    /// already attached, or the attach would make `child` its own ancestor.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> GlyphFxResult<()> {
        let child_node = self
            .node(child)
            .ok_or_else(|| GlyphFxError::document(format!("unknown child node {child:?}")))?;
        if child == self.root() {
            return Err(GlyphFxError::document("the root cannot be attached"));
        }
        if child_node.parent.is_some() {
            return Err(GlyphFxError::document(format!(
                "node {child:?} already has a parent"
            )));
        }
        if self.node(parent).is_none() {
            return Err(GlyphFxError::document(format!(
                "unknown parent node {parent:?}"
            )));
        }
        if parent == child || self.ancestors(parent).any(|a| a == child) {
            return Err(GlyphFxError::document(format!(
                "attaching {child:?} under {parent:?} would create a cycle"
            )));
        }

        match &mut self.nodes[parent.index()].kind {
            NodeKind::Root { children } => children.push(child),
            NodeKind::Tag(tag) => tag.children.push(child),
            NodeKind::TextRun(_) | NodeKind::Passthrough(_) => {
                return Err(GlyphFxError::document(format!(
                    "node {parent:?} cannot hold children"
                )));
            }
        }
        self.nodes[child.index()].parent = Some(parent);
        Ok(())
    }

    /// Attach a freshly created, detached node to a container. Builders that only ever attach
    /// new nodes use this to skip the checks in [`Document::add_child`].
    pub(crate) fn adopt(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.nodes[child.index()].parent.is_none());
        match &mut self.nodes[parent.index()].kind {
            NodeKind::Root { children } => children.push(child),
            NodeKind::Tag(tag) => tag.children.push(child),
            NodeKind::TextRun(_) | NodeKind::Passthrough(_) => return,
        }
        self.nodes[child.index()].parent = Some(parent);
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Payload of a node.
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node(id).map(Node::kind)
    }

    /// Tag payload, when `id` is a tag.
    pub fn tag(&self, id: NodeId) -> Option<&TagNode> {
        match self.kind(id)? {
            NodeKind::Tag(tag) => Some(tag),
            _ => None,
        }
    }

    /// Children in document order; empty for leaves and unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(Node::children).unwrap_or(&[])
    }

    /// Owning parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    /// Walk from the parent of `id` up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// Tags enclosing `id`, nearest first.
    pub fn enclosing_tags(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &TagNode)> + '_ {
        self.ancestors(id)
            .filter_map(move |a| self.tag(a).map(|tag| (a, tag)))
    }

    /// Attached nodes in depth-first pre-order, root first.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Number of animated character slots: the total `char` count of attached text runs.
    pub fn character_count(&self) -> usize {
        self.preorder()
            .into_iter()
            .filter_map(|id| match self.kind(id) {
                Some(NodeKind::TextRun(text)) => Some(text.chars().count()),
                _ => None,
            })
            .sum()
    }

    /// Concatenated text runs, passthrough markup excluded.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for id in self.preorder() {
            if let Some(NodeKind::TextRun(text)) = self.kind(id) {
                out.push_str(text);
            }
        }
        out
    }

    /// Check that every node except the root is attached.
    pub fn validate(&self) -> GlyphFxResult<()> {
        for (i, node) in self.nodes.iter().enumerate().skip(1) {
            if node.parent.is_none() {
                return Err(GlyphFxError::document(format!(
                    "node {i} is not attached to the tree"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/node.rs"]
mod tests;
