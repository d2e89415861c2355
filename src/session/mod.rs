pub(crate) mod animated_text;
