use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use scenegen::batch::jobs;
use scenegen::{run_batch, GeneratorConfig, Selection};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

macro_rules! error(
    ($msg: expr, $cause: expr) => {
        eprintln!("{}: {}. {}", style("Error").bold().red(), $msg, $cause)
    }
);

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Preset to generate, or `all` for every preset.
    #[clap(short, long, default_value = "all")]
    scene: String,
    /// Output directory, created if missing.
    #[clap(short, long, default_value = "tests")]
    dirname: PathBuf,
    /// Generate the scenes one at a time on the main thread.
    #[clap(long)]
    no_parallel: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let selection = match Selection::parse(&args.scene) {
        Ok(selection) => selection,
        Err(e) => {
            error!("Invalid scene", e);
            return ExitCode::FAILURE;
        }
    };
    let config = GeneratorConfig {
        output_dir: args.dirname,
        parallel: !args.no_parallel,
        selection,
    };
    log::debug!("{config:?}");
    let pb = ProgressBar::new(jobs(&config.selection).len() as u64);
    if let Ok(bar) = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")
    {
        pb.set_style(bar.progress_chars("#>-"));
    }
    let start = Instant::now();
    let progress = |name: &str| {
        pb.set_message(name.to_string());
        pb.inc(1);
    };
    let report = match run_batch(&config, &progress) {
        Ok(report) => report,
        Err(e) => {
            pb.abandon();
            log::error!("Cannot prepare {}: {e}", config.output_dir.display());
            return ExitCode::FAILURE;
        }
    };
    pb.finish_and_clear();
    println!(
        "{} {} scenes in {} ({} ms)",
        style("Generated").bold().green(),
        report.succeeded.len(),
        config.output_dir.display(),
        start.elapsed().as_millis()
    );
    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        for (name, e) in &report.failed {
            error!(format!("Failed to generate {name}"), e);
        }
        ExitCode::FAILURE
    }
}
