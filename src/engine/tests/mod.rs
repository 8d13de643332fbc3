mod common;
mod simulated;
