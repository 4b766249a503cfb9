pub mod list_properties;
pub mod model;
pub mod predict;
pub mod rest_api_server;

pub mod prelude {
    pub use clap::{Arg, ArgAction, ArgMatches, Command};
}

pub fn app() -> prelude::Command {
    prelude::Command::new("admethyst")
        .version(env!("CARGO_PKG_VERSION"))
        .about("ADME/toxicity property prediction for small molecules")
        .subcommand_required(true)
        .subcommand(rest_api_server::command())
        .subcommand(predict::command())
        .subcommand(list_properties::command())
}

pub async fn run(matches: &prelude::ArgMatches) -> eyre::Result<()> {
    match matches.subcommand() {
        Some((rest_api_server::NAME, args)) => rest_api_server::action(args).await,
        Some((predict::NAME, args)) => predict::action(args).await,
        Some((list_properties::NAME, args)) => list_properties::action(args),
        Some((other, _args)) => Err(eyre::eyre!("can't handle {}", other)),
        None => Err(eyre::eyre!("no subcommand given")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_is_well_formed() {
        app().debug_assert();
    }
}
