use clap::Parser;
use htlm::application::BuildService;
use htlm::cli::{format_summary, logging, Cli};
use htlm::error::HtlmError;
use htlm::infrastructure::{Config, SourceTree};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.log_level());

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), HtlmError> {
    // Defaults, then config file, then flags
    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load_from_dir(&std::env::current_dir()?)?,
    }
    .with_overrides(cli.src_dir, cli.out_dir);

    let tree = SourceTree::from_config(&config)?;
    let service = BuildService::new(tree);
    let report = service.execute()?;

    print!("{}", format_summary(&report, service.tree().out_dir()));

    if report.is_success() {
        Ok(())
    } else {
        Err(HtlmError::BuildFailed(report.failures.len()))
    }
}
