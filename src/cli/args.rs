//! Command-line argument parsing for the credportal binary.

use std::path::PathBuf;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Exchange a one-time authorization code for a session
    Login { code: String },
    /// Print (and optionally open) the auth-server login URL
    AuthorizeUrl { open: bool },
    /// Show the current session
    Session,
    /// Extend the current session
    KeepAlive,
    /// End the current session
    Logout,
    /// Print the SHA-256 of a diploma file
    Hash { path: PathBuf },
    /// Hash a diploma file and verify it against the ledger
    VerifyHash { path: PathBuf },
    /// Arguments that do not form a command
    Invalid(String),
}

pub const USAGE: &str = "\
Usage: credportal <command>

Commands:
  login <code>            exchange an authorization code for a session
  authorize-url [--open]  print the login URL
  session                 show the current session
  keep-alive              extend the current session
  logout                  end the current session
  hash <file>             print the SHA-256 of a diploma file
  verify-hash <file>      verify a diploma file against the ledger

Options:
  -V, --version           print version
  -h, --help              print this help";

/// Parse command-line arguments and return the command to run.
///
/// # Examples
///
/// ```
/// use credportal::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["credportal".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    // Skip the program name
    let mut args = args.skip(1);
    let Some(first) = args.next() else {
        return CliCommand::Help;
    };

    match first.as_str() {
        "--version" | "-V" => CliCommand::Version,
        "--help" | "-h" | "help" => CliCommand::Help,
        "login" => match args.next() {
            Some(code) => CliCommand::Login { code },
            None => CliCommand::Invalid("login needs an authorization code".to_string()),
        },
        "authorize-url" => CliCommand::AuthorizeUrl {
            open: args.any(|a| a == "--open"),
        },
        "session" => CliCommand::Session,
        "keep-alive" => CliCommand::KeepAlive,
        "logout" => CliCommand::Logout,
        "hash" => match args.next() {
            Some(path) => CliCommand::Hash { path: path.into() },
            None => CliCommand::Invalid("hash needs a file".to_string()),
        },
        "verify-hash" => match args.next() {
            Some(path) => CliCommand::VerifyHash { path: path.into() },
            None => CliCommand::Invalid("verify-hash needs a file".to_string()),
        },
        other => CliCommand::Invalid(format!("unknown command: {}", other)),
    }
}
