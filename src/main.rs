use anyhow::Result;
use par_navigator::cli;

fn main() -> Result<()> {
    // Process CLI arguments first (before logging init for cleaner output)
    let options = match cli::process_cli() {
        cli::CliResult::Exit(code) => {
            if code == 0 {
                return Ok(());
            }
            std::process::exit(code);
        }
        cli::CliResult::Continue(options) => options,
    };
    // Routes log::info!() etc. to /tmp/par_navigator_debug.log.
    // CLI --log-level takes precedence over RUST_LOG.
    par_navigator::debug::init_log_bridge(options.log_level);

    if let Err(e) = cli::run_command(options.command) {
        eprintln!("par-navigator: error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
