pub(crate) mod controller;
pub(crate) mod phase;
pub(crate) mod scheduler;
