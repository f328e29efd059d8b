use clap::Parser;
use miette::Result;
use fac::cli::{logging, Cli, Commands};
use fac::core::Config;

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let config = Config::load(cli.global.config.as_deref())?;

    let color = config.color && !cli.global.no_color;
    if !color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
    logging::init(cli.global.verbose, color);

    match cli.command {
        Commands::Compute(args) => fac::cli::commands::compute::run(args, &cli.global, &config),
        Commands::Sweep(args) => fac::cli::commands::sweep::run(args, &cli.global, &config),
        Commands::Bounds(args) => fac::cli::commands::bounds::run(args, &cli.global, &config),
        Commands::Session(args) => fac::cli::commands::session::run(args, &cli.global, &config),
        Commands::Completions(args) => fac::cli::commands::completions::run(args),
    }
}
