pub(crate) mod calculator;
pub(crate) mod ripple;
