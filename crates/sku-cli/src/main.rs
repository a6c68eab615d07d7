//! SKU configurator CLI.

use clap::Parser;

use sku_cli::cli::{Cli, Command};
use sku_cli::commands::{
    run_assemble, run_categories, run_category, run_check, run_extra, run_field, run_import,
    run_init, run_matrix, run_option, run_show,
};
use sku_cli::config::resolve_config_path;
use sku_cli::logging::{init_logging, log_config_from_cli};
use sku_cli::summary::{
    print_assemble, print_categories, print_check, print_matrix, print_saved, print_show,
};
use sku_cli::types::SavedResult;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let config_path = resolve_config_path(cli.config.as_deref());
    let outcome = match &cli.command {
        Command::Categories => run_categories(&config_path).map(|result| {
            print_categories(&result);
            0
        }),
        Command::Show(args) => run_show(&config_path, args).map(|result| {
            print_show(&result);
            0
        }),
        Command::Assemble(args) => run_assemble(&config_path, args).map(|result| {
            print_assemble(&result);
            0
        }),
        Command::Check(args) => run_check(&config_path, args).map(|result| {
            print_check(&result);
            i32::from(result.has_errors())
        }),
        Command::Matrix(args) => run_matrix(&config_path, args).map(|result| {
            print_matrix(&result);
            0
        }),
        Command::Init(args) => run_init(&config_path, args).map(|result| saved(&result)),
        Command::Import(args) => run_import(&config_path, args).map(|result| saved(&result)),
        Command::Category(command) => {
            run_category(&config_path, command).map(|result| saved(&result))
        }
        Command::Field(command) => run_field(&config_path, command).map(|result| saved(&result)),
        Command::Options(command) => {
            run_option(&config_path, command).map(|result| saved(&result))
        }
        Command::Extra(command) => run_extra(&config_path, command).map(|result| saved(&result)),
    };
    let exit_code = outcome.unwrap_or_else(|error| {
        eprintln!("error: {error:#}");
        if let Some(hint) = error
            .downcast_ref::<sku_store::StoreError>()
            .and_then(sku_store::StoreError::suggestion)
        {
            eprintln!("hint: {hint}");
        }
        1
    });
    std::process::exit(exit_code);
}

fn saved(result: &SavedResult) -> i32 {
    print_saved(result);
    0
}
