use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "slidegate")]
#[command(author, version, about)]
#[command(long_about = "A markdown slide viewer with an advisory access gate.\n\n\
    Sensitive slides are replaced by a lock screen until the admin code is\n\
    entered. The gate is a courtesy, not security: everything ships in the deck file.\n\n\
    Examples:\n  \
    slidegate talk.md                 Present (fullscreen)\n  \
    slidegate talk.md --windowed      Present in a window\n  \
    slidegate check talk.md           List deck problems\n  \
    slidegate digest --salt s3        Compute the access digest for a code")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Markdown deck to present
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Start on a specific slide (1-indexed)
    #[arg(long, global = false)]
    pub slide: Option<usize>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a deck for problems (missing images, bad access settings)
    Check {
        /// Markdown deck to check
        file: PathBuf,
    },

    /// Print the access digest for a code, for the deck's `access.digest`
    Digest {
        /// Salt appended to the code before hashing
        #[arg(long, default_value = "")]
        salt: String,

        /// Admin code; prompted for (hidden) when omitted
        code: Option<String>,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (defaults.theme, defaults.start_mode, defaults.windowed)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Check { file }) => crate::commands::check::run(&file, self.quiet),
            Some(Commands::Digest { salt, code }) => crate::commands::digest::run(code, &salt),
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                crate::commands::print_version();
                Ok(())
            }
            None => {
                if let Some(file) = self.file {
                    if !file.exists() {
                        anyhow::bail!("File not found: {}", file.display());
                    }
                    crate::app::run(file, self.windowed, self.slide)
                } else {
                    use clap::CommandFactory;
                    let mut cmd = Self::command();
                    cmd.print_help()?;
                    println!();
                    Ok(())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_present_flags() {
        let cli = Cli::try_parse_from(["slidegate", "talk.md", "--windowed", "--slide", "3", "-vv"])
            .unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("talk.md")));
        assert!(cli.windowed);
        assert_eq!(cli.slide, Some(3));
        assert_eq!(cli.verbose, 2);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_digest_subcommand() {
        let cli =
            Cli::try_parse_from(["slidegate", "digest", "--salt", "pepper", "rosebud"]).unwrap();
        match cli.command {
            Some(Commands::Digest { salt, code }) => {
                assert_eq!(salt, "pepper");
                assert_eq!(code.as_deref(), Some("rosebud"));
            }
            _ => panic!("expected digest subcommand"),
        }
    }
}
