use std::time::Duration;

use crate::command_line::prelude::*;
use crate::prediction::{AdmetModel, DescriptorModel, ModelPool, RemoteModel};

pub const DESCRIPTORS: &str = "descriptors";
pub const REMOTE: &str = "remote";

/// Adds the options selecting and sizing the prediction model.
pub fn with_model_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("model")
                .help("Which model answers predictions")
                .long("model")
                .short('m')
                .num_args(1)
                .env("ADMETHYST_MODEL")
                .value_parser([DESCRIPTORS, REMOTE])
                .default_value(DESCRIPTORS),
        )
        .arg(
            Arg::new("model-url")
                .help("Prediction endpoint of the remote model server")
                .long("model-url")
                .num_args(1)
                .env("ADMETHYST_MODEL_URL")
                .required_if_eq("model", REMOTE),
        )
        .arg(
            Arg::new("pool-size")
                .help("Number of model instances; each serves one inference call at a time")
                .long("pool-size")
                .num_args(1)
                .env("ADMETHYST_POOL_SIZE")
                .value_parser(clap::value_parser!(usize))
                .default_value("1"),
        )
        .arg(
            Arg::new("model-timeout")
                .help("Seconds to wait for the remote model server")
                .long("model-timeout")
                .num_args(1)
                .env("ADMETHYST_MODEL_TIMEOUT")
                .value_parser(clap::value_parser!(u64))
                .default_value("300"),
        )
}

pub fn load_pool(matches: &ArgMatches) -> eyre::Result<ModelPool> {
    let model = matches
        .get_one::<String>("model")
        .ok_or(eyre::eyre!("Failed to extract model"))?;
    let pool_size = *matches
        .get_one::<usize>("pool-size")
        .ok_or(eyre::eyre!("Failed to extract pool size"))?;

    match model.as_str() {
        DESCRIPTORS => ModelPool::load(pool_size, || {
            Ok(Box::new(DescriptorModel::new()) as Box<dyn AdmetModel>)
        }),
        REMOTE => {
            let url = matches
                .get_one::<String>("model-url")
                .ok_or(eyre::eyre!("--model-url is required for the remote model"))?;
            let timeout = *matches
                .get_one::<u64>("model-timeout")
                .ok_or(eyre::eyre!("Failed to extract model timeout"))?;

            log::info!("using remote model at {}", url);
            ModelPool::load(pool_size, || {
                Ok(Box::new(RemoteModel::new(url, Duration::from_secs(timeout))?)
                    as Box<dyn AdmetModel>)
            })
        }
        other => Err(eyre::eyre!("unknown model {}", other)),
    }
}
