use anyhow::{Context, Result};
use clap::Parser;

use dockerup::cli::{self, Action, Cli};
use dockerup::core::config::InstallConfig;
use dockerup::error::InstallerError;
use dockerup::{commands, utils};

fn main() {
    let parsed = Cli::try_parse();
    utils::logging::init(parsed.as_ref().is_ok_and(|cli| cli.verbose));

    let cli = match parsed {
        Ok(cli) => cli,
        Err(e) => match cli::parse_failure(&e) {
            Ok(text) => {
                print!("{text}");
                return;
            }
            Err(usage_error) => exit_with_usage(usage_error),
        },
    };

    let action = match cli.action() {
        Ok(action) => action,
        Err(usage_error) => exit_with_usage(usage_error),
    };

    if let Err(e) = run(&cli, action) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, action: Action) -> Result<()> {
    let config = InstallConfig::new(&cli.docker_version, cli.mirror)
        .context("invalid configuration")?;

    let name = match action {
        Action::Download => "download",
        Action::Install => "install",
    };
    commands::dispatch(action, &config).with_context(|| format!("{name} failed"))
}

fn exit_with_usage(err: InstallerError) -> ! {
    log::error!("{err}");
    eprintln!("{}", cli::usage());
    std::process::exit(1);
}
