pub(crate) mod annotations;
pub(crate) mod state;
