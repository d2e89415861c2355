pub(crate) mod character;
pub(crate) mod color;
pub(crate) mod material;
pub(crate) mod transform;
