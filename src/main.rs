use clap::Parser;
use miette::Result;
use onboard::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
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
    let global = cli.global;
    onboard::core::logging::init(global.verbose, global.quiet);

    match cli.command {
        Commands::New(args) => onboard::cli::commands::new::run(args, &global),
        Commands::Summary(args) => onboard::cli::commands::summary::run(args, &global),
        Commands::Check(args) => onboard::cli::commands::check::run(args, &global),
        Commands::Directory(cmd) => onboard::cli::commands::directory::run(cmd, &global),
        Commands::Completions(args) => onboard::cli::commands::completions::run(args),
    }
}
