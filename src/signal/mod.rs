pub(crate) mod canvas;
pub(crate) mod driver;
pub(crate) mod motion;
pub(crate) mod recording;
pub(crate) mod scheduler;
pub(crate) mod settings;
pub(crate) mod test_pulse;
