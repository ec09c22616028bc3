use clap::Parser;
use signalscore::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
