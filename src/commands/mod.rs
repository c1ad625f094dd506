pub type CmdResult<T> = kebab_shop::Result<(T, i32)>;

pub mod convert;
pub mod rename;

macro_rules! dispatch {
    ($args:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args))
    };
}

pub(crate) fn run_json(command: crate::Commands) -> (kebab_shop::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::Rename(args) => {
            crate::tty::status("kebab-shop is working...");
            dispatch!(args, rename)
        }
        crate::Commands::Convert(args) => dispatch!(args, convert),
    }
}
