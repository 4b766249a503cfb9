use std::io::Write;

use crate::catalog::all_properties;
use crate::command_line::prelude::*;

pub const NAME: &str = "list-properties";

pub fn command() -> Command {
    Command::new(NAME).about("List the predicted properties in response order")
}

pub fn action(_matches: &ArgMatches) -> eyre::Result<()> {
    let mut stdout = std::io::stdout().lock();
    for property in all_properties() {
        writeln!(
            stdout,
            "{}\t{}\t{}\t{}",
            property.id,
            property.category.as_str(),
            property.task.as_str(),
            property.name
        )?;
    }

    Ok(())
}
