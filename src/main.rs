use clap::{Parser, Subcommand};

mod commands;
mod output;
mod tty;

use commands::{convert, rename};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "kebab-shop")]
#[command(version = VERSION)]
#[command(about = "Rename JS/TS source files to kebab-case and rewrite the imports that point at them")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rename every eligible file under a directory (default command)
    Rename(rename::RenameArgs),
    /// Print the kebab-case form of file names
    Convert(convert::ConvertArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Rename(rename::RenameArgs::default()));

    let (json_result, exit_code) = commands::run_json(command);
    let exit_code = match output::print_json_result(json_result) {
        Ok(()) => exit_code,
        Err(_) => 1,
    };

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
