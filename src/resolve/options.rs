use crate::timeline::builder::RevealPacing;

/// What to do when a tag handler fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerErrorPolicy {
    /// Stop resolving and return the error.
    #[default]
    Abort,
    /// Drop the failing tag's subtree effects, log, and keep going.
    SkipSubtree,
}

/// What to do with a tag no handler is registered for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownTagPolicy {
    /// Contribute no effects but still walk the children.
    #[default]
    Traverse,
    /// Render the tag's own markup as literal characters, then walk the children.
    Literal,
}

/// Knobs for one resolution pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ResolveOptions {
    /// Base reveal pacing handed to the timeline builder.
    pub pacing: RevealPacing,
    /// Handler failure policy.
    pub on_handler_error: HandlerErrorPolicy,
    /// Unknown tag policy.
    pub unknown_tags: UnknownTagPolicy,
}
