pub(crate) mod cleanup;
pub(crate) mod commentary;
pub(crate) mod tools;
pub(crate) mod window;
