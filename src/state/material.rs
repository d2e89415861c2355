use std::collections::BTreeMap;

/// Per-character shader property overrides keyed by property id.
///
/// A later write for the same id replaces the earlier one.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct MaterialState {
    properties: BTreeMap<i32, f64>,
}

impl MaterialState {
    /// Drop every override.
    pub fn reset(&mut self) {
        self.properties.clear();
    }

    /// Override `property` with `value`.
    pub fn set(&mut self, property: i32, value: f64) {
        self.properties.insert(property, value);
    }

    /// Current override for `property`.
    pub fn get(&self, property: i32) -> Option<f64> {
        self.properties.get(&property).copied()
    }

    /// Overrides in ascending property-id order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.properties.iter().map(|(&k, &v)| (k, v))
    }

    /// Number of overridden properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// True when nothing is overridden.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
