use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use silentinstall::{Sequence, config, ui::Ui};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "silentinstall",
    about = "Run interactive installers unattended, answering their prompts from a JSON config",
    version
)]
struct Args {
    /// The path of the config file
    #[arg(short = 'f', long = "file")]
    file: PathBuf,

    /// Prints verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let ui = Ui::detect();
    match run(&args, ui).await {
        Ok(()) => {
            ui.success("SilentInstall has finished successfully!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            ui.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args, ui: Ui) -> Result<()> {
    let commands = config::parse_file(&args.file)
        .with_context(|| format!("Failed to load config file: {}", args.file.display()))?;

    ui.say(&format!("Running {} command(s)", commands.len()));
    Sequence::new(commands)
        .verbose(args.verbose)
        .run()
        .await
        .context("Installation failed")?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(default)
        .parse_default_env()
        .init();
}
