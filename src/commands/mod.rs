pub type CmdResult<T> = sprout::Result<(T, i32)>;

pub mod new;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run_json($args))
    };
}

pub(crate) fn run_json(command: crate::Commands) -> (sprout::Result<serde_json::Value>, i32) {
    sprout::tty::status("sprout is working...");

    match command {
        crate::Commands::New(args) => dispatch!(args, new),

        // Special case: List uses raw output mode
        crate::Commands::List => {
            let err = sprout::Error::validation_invalid_argument(
                "output_mode",
                "List command uses raw output mode",
                None,
                None,
            );
            crate::output::map_cmd_result_to_json::<serde_json::Value>(Err(err))
        }
    }
}
