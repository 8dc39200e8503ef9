pub(crate) mod block;
pub(crate) mod gpt;
pub(crate) mod grid;
pub(crate) mod model;
