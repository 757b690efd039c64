pub mod protein;
pub mod resformat;
pub mod shared;
pub mod transcript;

use clap::ArgMatches;
use indicatif::{MultiProgress, ProgressBar};
use rayon::ThreadPoolBuilder;

use shared::args::CoreArgs;

const THREAD_POOL_ERROR: &str = "Failed to initialize the thread pool";
const RENDER_ERROR: &str = "Failed to render progress bars";

/// Parse the shared options, set up the thread pool and hand over to the
/// requested driver. Progress bars render on a dedicated thread via
/// [`MultiProgress::join`], mirroring the worker/render split of the drivers.
pub fn run(command: &str, matches: &ArgMatches) {
    let mbar = MultiProgress::new();
    let style = shared::style::parse::with_progress();
    let factory = || mbar.add(ProgressBar::new_spinner().with_style(style.clone()));

    let core = CoreArgs::new(matches, &factory);
    let threads = core.threads;
    ThreadPoolBuilder::new().num_threads(threads).build_global().expect(THREAD_POOL_ERROR);

    rayon::scope(|s| {
        s.spawn(|_| match command {
            transcript::COMMAND => transcript::run(matches, core, &factory),
            protein::COMMAND => protein::run(matches, core, &factory),
            _ => unreachable!("unknown subcommand {}", command),
        });
        if threads != 1 {
            mbar.join().expect(RENDER_ERROR);
        }
    });
    if threads == 1 {
        mbar.join().expect(RENDER_ERROR);
    }
}
