pub(crate) mod monitor;
pub(crate) mod settings;
pub(crate) mod state;
pub(crate) mod trail;
