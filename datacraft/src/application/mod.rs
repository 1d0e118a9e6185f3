pub mod handlers;

use crate::presentation::cli::{Cli, Commands};
use clap::Parser;
use clap::error::ErrorKind;
use std::process::ExitCode;

pub fn run() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayVersion
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    let result = match cli.command {
        Commands::Encode {
            file,
            world,
            start_id,
            max_size,
            check_collisions,
            strict,
            deterministic,
            sequential,
            dry_run,
        } => handlers::handle_encode(
            file,
            world,
            start_id,
            max_size,
            check_collisions,
            strict,
            deterministic,
            sequential,
            dry_run,
        ),
        Commands::Decode {
            world,
            start_id,
            num_maps,
            output,
            strict,
            sequential,
        } => handlers::handle_decode(world, start_id, num_maps, output, strict, sequential),
        Commands::List { world } => handlers::handle_list(world),
        Commands::Verify {
            world,
            start_id,
            strict,
        } => handlers::handle_verify(world, start_id, strict),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
