pub(crate) mod character;
pub(crate) mod provider;
