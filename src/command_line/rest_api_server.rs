use crate::command_line::model::{load_pool, with_model_args};
use crate::command_line::prelude::*;
use crate::rest_api::openapi_server::{output_spec, run_api_service};

pub const NAME: &str = "rest-api-server";

pub fn command() -> Command {
    let command = Command::new(NAME)
        .about("Serve predictions over HTTP")
        .arg(
            Arg::new("bind")
                .num_args(1)
                .required(false)
                .short('b')
                .long("bind")
                .env("ADMETHYST_BIND")
                .default_value("localhost:3000"),
        )
        .arg(
            Arg::new("server-url")
                .num_args(1)
                .required(false)
                .short('u')
                .long("server-url")
                .env("ADMETHYST_SERVER_URL")
                .default_value("http://localhost:3000"),
        )
        .subcommand(
            Command::new("spec").arg(
                Arg::new("output")
                    .help("Write the OpenAPI JSON document to this path")
                    .required(true)
                    .short('o')
                    .long("output")
                    .num_args(1),
            ),
        );

    with_model_args(command)
}

pub async fn action(matches: &ArgMatches) -> eyre::Result<()> {
    let server_url = matches
        .get_one::<String>("server-url")
        .ok_or(eyre::eyre!("Failed to extract server url"))?;

    match matches.subcommand() {
        None => {
            let bind = matches
                .get_one::<String>("bind")
                .ok_or(eyre::eyre!("Failed to extract bind address"))?;
            let pool = load_pool(matches)?;
            run_api_service(bind, server_url, pool).await
        }
        Some(("spec", args)) => {
            let output = args
                .get_one::<String>("output")
                .ok_or(eyre::eyre!("Failed to extract output path"))?;
            output_spec(server_url, output)?;
            log::info!("OpenAPI document written to {}", output);
            Ok(())
        }
        Some((other, _args)) => Err(eyre::eyre!("can't handle {}", other)),
    }
}
