use crate::foundation::core::{Affine, Point, Vec2};

/// Inclusive character range whose glyphs transform around one shared pivot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PivotGroup {
    /// First character in the group.
    pub first: usize,
    /// Last character in the group (inclusive).
    pub last: usize,
}

/// Per-character transform written by transform modifiers.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TransformState {
    /// Offset added to the glyph position.
    pub position: Vec2,
    /// Rotation in radians around the pivot.
    pub rotation_rad: f64,
    /// Non-uniform scale around the pivot.
    pub scale: Vec2,
    /// Shared pivot group; `None` rotates and scales each glyph around its own center.
    pub group: Option<PivotGroup>,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation_rad: 0.0,
            scale: Vec2::new(1.0, 1.0),
            group: None,
        }
    }
}

impl TransformState {
    /// Restore the default: zero offset, identity rotation, unit scale, no group.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Group bounds as `(first, last)`, or `(-1, -1)` when ungrouped.
    pub fn group_bounds(&self) -> (i64, i64) {
        match self.group {
            Some(g) => (
                i64::try_from(g.first).unwrap_or(i64::MAX),
                i64::try_from(g.last).unwrap_or(i64::MAX),
            ),
            None => (-1, -1),
        }
    }

    /// Affine for a glyph pivoting around `pivot`.
    pub fn to_affine(&self, pivot: Point) -> Affine {
        let anchor = pivot.to_vec2();
        let t_translate = Affine::translate(self.position);
        let t_anchor = Affine::translate(anchor);
        let t_unanchor = Affine::translate(-anchor);
        let t_rotate = Affine::rotate(self.rotation_rad);
        let t_scale = Affine::scale_non_uniform(self.scale.x, self.scale.y);

        // T(position) * T(pivot) * R * S * T(-pivot)
        t_translate * t_anchor * t_rotate * t_scale * t_unanchor
    }
}
