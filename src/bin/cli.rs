use clap::Parser;
use tether::ui::cli::cli_commands;
use tether::utils::logging::init_logging;

fn main() {
    let args = cli_commands::Args::parse();
    init_logging(args.verbose);
    match cli_commands::run_cli(args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("tether: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
