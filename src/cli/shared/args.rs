use clap::{Arg, ArgFlags, ArgSettings};

use super::validate;

pub fn reqdefaults() -> ArgFlags {
    ArgSettings::Required | ArgSettings::TakesValue
}

pub fn defaults() -> ArgFlags {
    ArgSettings::TakesValue.into()
}

pub mod core {
    use super::*;
    pub const CONFIG: &str = "config";
    pub const THREADS: &str = "threads";
    pub const TRIALS: &str = "trials";
    pub const SEED: &str = "seed";
    pub const MAX_FREQUENCY: &str = "max-frequency";
    pub const RADIUS: &str = "radius";

    pub const SECTION_NAME: &str = "Core";

    pub fn args<'a>() -> Vec<Arg<'a>> {
        let args = vec![
            Arg::new(CONFIG)
                .short('c')
                .long(CONFIG)
                .setting(reqdefaults())
                .validator(validate::path)
                .long_about("Path to the JSON run configuration naming the input datasets (Ensembl/UniProt sequences, gnomAD variants, structural mappings). Each subcommand requires only the keys it actually uses; see the documentation for the full list."),
            Arg::new(TRIALS)
                .long(TRIALS)
                .setting(defaults())
                .validator(validate::numeric(100usize, 10_000_000usize))
                .default_value("10000")
                .long_about("Number of Monte-Carlo trials behind the null distribution of each contact set. The smallest reportable p-value is 1/trials."),
            Arg::new(SEED)
                .long(SEED)
                .setting(defaults())
                .validator(validate::numeric(0u64, u64::MAX))
                .default_value("0")
                .long_about("Seed of the permutation random number generator. Runs with the same seed, trials and inputs are bit-identical."),
            Arg::new(MAX_FREQUENCY)
                .long(MAX_FREQUENCY)
                .setting(defaults())
                .validator(validate::numeric(0f64, 1f64))
                .default_value("0.001")
                .long_about("Exclude variants with allele frequency (AC/AN) above the threshold: common variants carry little constraint signal. Use 1 to disable the filter."),
            Arg::new(RADIUS)
                .long(RADIUS)
                .setting(defaults())
                .validator(validate::numeric(1f64, 30f64))
                .default_value("8")
                .long_about("Contact radius in angstrom: two residues are in contact when their representative atoms (CB, CA for glycine) lie within this distance."),
            Arg::new(THREADS)
                .short('t')
                .long(THREADS)
                .setting(defaults())
                .validator(validate::numeric(1, usize::MAX))
                .default_value("1")
                .long_about("Maximum number of threads to spawn at once."),
        ];
        args.into_iter().map(|x| x.help_heading(Some(SECTION_NAME))).collect()
    }
}

use clap::ArgMatches;
use indicatif::ProgressBar;

use crate::core::assemble::ScoreOptions;
use crate::core::io::config::Config;

use super::parse;

pub struct CoreArgs {
    pub config: Config,
    pub threads: usize,
    pub options: ScoreOptions,
    pub radius: f64,
}

impl CoreArgs {
    pub fn new(args: &ArgMatches, factory: impl Fn() -> ProgressBar) -> Self {
        Self {
            config: parse::config(factory(), args),
            threads: parse::threads(factory(), args),
            options: parse::options(factory(), args),
            radius: parse::radius(factory(), args),
        }
    }
}
