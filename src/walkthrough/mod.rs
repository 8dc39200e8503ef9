pub(crate) mod phase;
pub(crate) mod registry;
pub(crate) mod run;
pub(crate) mod scripts;
pub(crate) mod state;
