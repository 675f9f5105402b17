// Module exports for CLI subcommands
//
// Each module handles a specific CLI subcommand. main.rs parses arguments,
// loads the network once, and dispatches to these handlers.

pub mod locations;
pub mod route;
