use clap::{crate_authors, crate_name, crate_version, App, AppSettings};

use cosmis::cli;

fn main() {
    let matches = App::new(crate_name!())
        .author(crate_authors!("\n"))
        .version(crate_version!())
        .max_term_width(120)
        .setting(AppSettings::DeriveDisplayOrder)
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            App::new(cli::transcript::COMMAND)
                .max_term_width(120)
                .setting(AppSettings::DeriveDisplayOrder)
                .about(cli::transcript::ABOUT)
                .args(cli::transcript::args::all()),
        )
        .subcommand(
            App::new(cli::protein::COMMAND)
                .max_term_width(120)
                .setting(AppSettings::DeriveDisplayOrder)
                .about(cli::protein::ABOUT)
                .args(cli::protein::args::all()),
        )
        .get_matches();

    if let Some((command, submatches)) = matches.subcommand() {
        cli::run(command, submatches);
    }
}
