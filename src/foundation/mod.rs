pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod lookup;
pub(crate) mod math;
