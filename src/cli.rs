use crate::core::config::{Mirror, DEFAULT_VERSION};
use crate::error::{InstallerError, Result};
use clap::{CommandFactory, Parser};

#[derive(Parser, Debug)]
#[command(name = "dockerup")]
#[command(about = "Install the static Docker binary distribution as a systemd service")]
#[command(version)]
pub struct Cli {
    /// Download the release archive into the current directory only
    #[arg(short = 'D')]
    pub download: bool,

    /// Download if needed, install binaries, write configuration and start docker
    #[arg(short = 'I')]
    pub install: bool,

    /// Docker release to install
    #[arg(long, env = "DOCKER_VERSION", default_value = DEFAULT_VERSION)]
    pub docker_version: String,

    /// Where to download the release from
    #[arg(long, env = "DOCKER_MIRROR", value_enum, default_value_t = Mirror::Regional)]
    pub mirror: Mirror,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Download,
    Install,
}

impl Cli {
    /// The single action requested; none or both is a usage error.
    pub fn action(&self) -> Result<Action> {
        match (self.download, self.install) {
            (true, false) => Ok(Action::Download),
            (false, true) => Ok(Action::Install),
            (false, false) => Err(InstallerError::usage("no action selected, pass -D or -I")),
            (true, true) => Err(InstallerError::usage("-D and -I cannot be combined")),
        }
    }
}

pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

/// Sorts a clap parse failure: help and version requests come back as text to
/// print on a zero exit, anything else becomes a usage error.
pub fn parse_failure(err: &clap::Error) -> std::result::Result<String, InstallerError> {
    if !err.use_stderr() {
        return Ok(err.render().to_string());
    }

    let rendered = err.render().to_string();
    let message = rendered
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .to_string();
    Err(InstallerError::usage(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("dockerup").chain(args.iter().copied()))
    }

    #[test]
    fn test_single_flags_select_action() {
        assert_eq!(parse(&["-D"]).unwrap().action().unwrap(), Action::Download);
        assert_eq!(parse(&["-I"]).unwrap().action().unwrap(), Action::Install);
    }

    #[test]
    fn test_no_flag_is_usage_error() {
        let err = parse(&[]).unwrap().action().unwrap_err();
        assert!(matches!(err, InstallerError::Usage { .. }));
    }

    #[test]
    fn test_both_flags_are_rejected() {
        let err = parse(&["-D", "-I"]).unwrap().action().unwrap_err();
        assert!(matches!(err, InstallerError::Usage { .. }));
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let err = parse(&["-X"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert!(err.use_stderr());
    }

    #[test]
    fn test_help_is_not_an_error_exit() {
        let err = parse(&["-h"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(!err.use_stderr());
    }

    #[test]
    fn test_version_and_mirror_overrides() {
        let cli = parse(&["-I", "--docker-version", "20.10.0", "--mirror", "default"]).unwrap();
        assert_eq!(cli.docker_version, "20.10.0");
        assert_eq!(cli.mirror, Mirror::Default);
    }

    #[test]
    fn test_unknown_flag_maps_to_usage_error() {
        let err = parse(&["-X"]).unwrap_err();

        match parse_failure(&err).unwrap_err() {
            InstallerError::Usage { message } => {
                assert!(message.contains("'-X'"));
                assert!(!message.starts_with("error:"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_help_maps_to_printable_text() {
        let err = parse(&["--help"]).unwrap_err();
        let text = parse_failure(&err).unwrap();
        assert!(text.contains("-D"));
        assert!(text.contains("-I"));
    }

    #[test]
    fn test_usage_mentions_flags() {
        let text = usage();
        assert!(text.contains("-D"));
        assert!(text.contains("-I"));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
