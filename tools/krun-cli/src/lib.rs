mod client;
mod commands;
mod config;
mod dispatch;
mod error;
mod generate;
mod output;
mod params;
mod types;

use std::process;

pub use client::{ClientError, HttpClient, HttpResponse, RestClient};
pub use config::{CONFIG_PATH_ENV, DEFAULT_NAMESPACE, DEFAULT_SERVER};
pub use dispatch::{
    LAST_APPLIED_CONFIG_ANNOTATION, collection_path, dispatch,
    update_apply_annotation,
};
pub use error::RunError;
pub use generate::{
    DispatchOutcome, Factory, create_generated_object, generate_service,
    print_outcome, run_command, service_command,
};
pub use params::{FlagSet, FlagValue, collect, make_params};
pub use types::{
    ConnectionArgs, ContextOperation, GenerateArgs, KrunCli, KrunCommands,
    OutputFormat, RunOperation, ServiceOperation,
};

pub async fn run(cli: KrunCli) {
    let result = match &cli.command {
        KrunCommands::Run { opt, conn } => {
            commands::handle_run_command(opt, conn).await
        }
        KrunCommands::Service { opt, conn } => {
            commands::handle_service_command(opt, conn).await
        }
        KrunCommands::Context { opt } => {
            commands::handle_context_command(opt).await
        }
    };
    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
