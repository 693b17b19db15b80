//! Command handlers, one module per subcommand.

pub mod decode;
pub mod in_repo;
pub mod root;
pub mod run;
