mod args;
mod runner;

pub(crate) use args::{CategoryAction, Cli, Commands};
pub(crate) use runner::run;
