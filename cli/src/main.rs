mod commands;
mod terminal;

use commands::{CommandLine, Commands, blocks, countries, expand, filter, run};
use geoscan_common::config::Config;
use terminal::{logging, print};

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let cfg: Config = commands.to_config();

    logging::init();
    print::banner(cfg.no_banner, cfg.quiet);

    match commands.command {
        Commands::Run => {
            print::header("getting ready", cfg.quiet);
            run::run(&cfg)
        }
        Commands::Countries => countries::countries(&cfg),
        Commands::Blocks { country } => blocks::blocks(country, &cfg),
        Commands::Expand { start, end, output } => {
            expand::expand(&start, &end, output.as_deref())
        }
        Commands::Filter { report, output } => {
            filter::filter(&report, output.as_deref(), &cfg)
        }
    }
}
