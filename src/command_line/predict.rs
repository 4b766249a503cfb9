use std::io::Write;

use crate::command_line::model::{load_pool, with_model_args};
use crate::command_line::prelude::*;
use crate::formatting::format_batch;
use crate::molecule::ValidationOptions;
use crate::prediction::pipeline::{parse_lines, predict_lines};

pub const NAME: &str = "predict";

pub fn command() -> Command {
    let command = Command::new(NAME)
        .about("Predict every property for a file of SMILES, one per line")
        .arg(
            Arg::new("input")
                .required(true)
                .long("input")
                .short('i')
                .num_args(1),
        )
        .arg(
            Arg::new("output")
                .help("Write JSON here instead of stdout")
                .required(false)
                .long("output")
                .short('o')
                .num_args(1),
        )
        .arg(
            Arg::new("standardize")
                .long("standardize")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("attempt-fix")
                .long("attempt-fix")
                .action(ArgAction::SetTrue),
        );

    with_model_args(command)
}

pub async fn action(matches: &ArgMatches) -> eyre::Result<()> {
    let input = matches
        .get_one::<String>("input")
        .ok_or(eyre::eyre!("Failed to extract input path"))?;
    let output = matches.get_one::<String>("output");
    let options = ValidationOptions {
        standardize: matches.get_flag("standardize"),
        attempt_fix: matches.get_flag("attempt-fix"),
    };

    let text = std::fs::read_to_string(input)?;
    let pool = load_pool(matches)?;
    let outcome = predict_lines(&pool, parse_lines(&text), options).await?;

    log::info!(
        "{}: {} predicted, {} rejected",
        input,
        outcome.predictions.len(),
        outcome.rejected.len()
    );

    let formatted = format_batch(&outcome);
    match output {
        Some(path) => std::fs::write(path, serde_json::to_string_pretty(&formatted)?)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &formatted)?;
            writeln!(stdout)?;
        }
    }

    Ok(())
}
