pub(crate) mod camera;
pub(crate) mod config;
pub(crate) mod fingerprint;
pub(crate) mod saved;
pub(crate) mod state;
