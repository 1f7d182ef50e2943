//! matmode - inspect and switch material rendering modes.
//!
//! ```bash
//! # Show decoded mode, render state and visible optional fields
//! matmode inspect materials/glass.toml
//!
//! # Switch several materials to Fade in one transaction
//! matmode set-mode fade materials/glass.toml materials/water.toml
//!
//! # Use a custom shader profile
//! matmode --profile shaders/cutout.toml set-mode cutout materials/leaf.toml
//! ```

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use matmode_core::material::RenderingMode;

#[derive(Parser, Debug)]
#[command(name = "matmode", about = "Inspect and switch material rendering modes", version)]
struct Cli {
    /// Shader profile (TOML). Defaults to the built-in four-mode profile.
    #[arg(long, global = true)]
    profile: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the decoded state of a material file
    Inspect {
        file: PathBuf,
    },
    /// Switch materials to a rendering mode; all files are written or none
    SetMode {
        #[arg(value_enum)]
        mode: CliMode,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum CliMode {
    Opaque,
    Cutout,
    Fade,
    Transparent,
}

impl From<CliMode> for RenderingMode {
    fn from(mode: CliMode) -> Self {
        match mode {
            CliMode::Opaque => Self::Opaque,
            CliMode::Cutout => Self::Cutout,
            CliMode::Fade => Self::Fade,
            CliMode::Transparent => Self::Transparent,
        }
    }
}

fn run(cli: Cli) -> Result<(), commands::CliError> {
    let profile = commands::resolve_profile(cli.profile.as_deref())?;
    match cli.command {
        Command::Inspect { file } => {
            print!("{}", commands::inspect(profile, &file)?);
        }
        Command::SetMode { mode, files } => {
            let count = commands::set_mode(profile, mode.into(), &files)?;
            println!("updated {count} material(s)");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_set_mode() {
        let cli = Cli::try_parse_from([
            "matmode",
            "--profile",
            "p.toml",
            "set-mode",
            "fade",
            "a.toml",
            "b.toml",
        ])
        .unwrap();
        assert_eq!(cli.profile, Some(PathBuf::from("p.toml")));
        match cli.command {
            Command::SetMode { mode, files } => {
                assert_eq!(RenderingMode::from(mode), RenderingMode::Fade);
                assert_eq!(files.len(), 2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn set_mode_requires_files() {
        assert!(Cli::try_parse_from(["matmode", "set-mode", "cutout"]).is_err());
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["matmode", "set-mode", "glow", "a.toml"]).is_err());
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
