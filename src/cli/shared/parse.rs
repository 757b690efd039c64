use clap::ArgMatches;
use indicatif::ProgressBar;

use crate::core::assemble::ScoreOptions;
use crate::core::error::DatasetError;
use crate::core::io::config::Config;

use super::args;

/// Dataset failures are fatal for the whole run: leave the reason on the
/// progress bar and stop.
pub fn or_exit<T>(pbar: &ProgressBar, result: Result<T, DatasetError>) -> T {
    match result {
        Ok(x) => x,
        Err(x) => {
            pbar.abandon_with_message(x.to_string());
            std::process::exit(1);
        }
    }
}

pub fn config(pbar: ProgressBar, matches: &ArgMatches) -> Config {
    pbar.set_message("Parsing the run configuration...");
    let path = matches.value_of(args::core::CONFIG).unwrap();
    let config = or_exit(&pbar, Config::load(path.as_ref()));
    pbar.finish_with_message(format!("Run configuration: {}", path));
    config
}

pub fn threads(pbar: ProgressBar, matches: &ArgMatches) -> usize {
    pbar.set_message("Parsing number of threads allowed to launch...");
    let result = matches.value_of(args::core::THREADS).and_then(|x| x.parse().ok()).unwrap();
    pbar.finish_with_message(format!(
        "Using thread pool with at most {} threads(+ 1 thread to render progress bar)",
        result
    ));
    result
}

pub fn options(pbar: ProgressBar, matches: &ArgMatches) -> ScoreOptions {
    pbar.set_message("Parsing the null model options...");
    let trials = matches.value_of(args::core::TRIALS).unwrap().parse().unwrap();
    let seed = matches.value_of(args::core::SEED).unwrap().parse().unwrap();
    let cutoff: f64 = matches.value_of(args::core::MAX_FREQUENCY).unwrap().parse().unwrap();
    let frequency_cutoff = if cutoff < 1.0 { Some(cutoff) } else { None };

    let msg = format!("Null model: {} trials per channel, seed {}. ", trials, seed);
    match frequency_cutoff {
        Some(x) => pbar.finish_with_message(format!("{}Variants with AC/AN > {} are excluded.", msg, x)),
        None => pbar.finish_with_message(msg + "Allele frequency filter disabled."),
    }
    ScoreOptions { trials, frequency_cutoff, seed }
}

pub fn radius(pbar: ProgressBar, matches: &ArgMatches) -> f64 {
    pbar.set_message("Parsing the contact radius...");
    let result: f64 = matches.value_of(args::core::RADIUS).unwrap().parse().unwrap();
    pbar.finish_with_message(format!("Contact radius: {} angstrom between representative atoms", result));
    result
}
