pub mod args;
pub mod commands;
pub mod session;

pub use args::{Cli, Commands};
pub use commands::run;
pub use session::{render_cycle, run_session};
