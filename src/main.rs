use clap::Parser;

use fitness_guard::cli::{Cli, Commands};
use fitness_guard::commands::{run_check, run_init, run_rules};
use fitness_guard::logging;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let exit_code = match &cli.command {
        Commands::Check(args) => run_check(args, &cli),
        Commands::Rules(args) => run_rules(args, &cli),
        Commands::Init(args) => run_init(args),
    };

    std::process::exit(exit_code);
}
