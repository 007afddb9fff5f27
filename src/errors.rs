// `error_chain!` creates the Error, ErrorKind, ResultExt and Result types.
// Other modules `use crate::errors::*;` to get access to everything.
use error_chain::error_chain;

error_chain! {

    foreign_links {
        Config(::ron::error::SpannedError);
    }

    errors {
        InvalidConfiguration(reason: String) {
            description("invalid maze configuration")
            display("invalid maze configuration: {}", reason)
        }
        NoPathCells {
            description("maze grid has no walkable cells")
            display("maze grid has no walkable cells to place an exit on")
        }
    }
}
