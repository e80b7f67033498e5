//! Abbreviated subcommand names.
//!
//! `tool st` runs `tool status` when `status` is the only subcommand
//! starting with `st`; when several match, the user gets a usage error
//! listing them.

use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{ArgMatches, Command, CommandFactory, Parser};
use tracing::debug;

use crate::Error;

/// Find the subcommand of `cmd` called, or uniquely abbreviated by, `name`.
///
/// Exact names and aliases win over prefixes.
pub fn resolve<'a>(cmd: &'a Command, name: &str) -> crate::Result<Option<&'a Command>> {
    if let Some(sub) = cmd.find_subcommand(name) {
        return Ok(Some(sub));
    }

    let mut matches: Vec<&Command> = cmd
        .get_subcommands()
        .filter(|sub| sub.get_name().starts_with(name))
        .collect();

    match matches.len() {
        0 => Ok(None),
        1 => Ok(matches.pop()),
        _ => {
            let mut names: Vec<String> = matches
                .iter()
                .map(|sub| sub.get_name().to_string())
                .collect();
            names.sort();
            Err(Error::AmbiguousCommand(names))
        }
    }
}

/// Whether `token` is an option of `cmd` whose value is the next argument.
fn option_takes_value(cmd: &Command, token: &str) -> bool {
    if token.contains('=') {
        return false;
    }
    let arg = if let Some(long) = token.strip_prefix("--") {
        cmd.get_arguments().find(|a| {
            a.get_long() == Some(long)
                || a.get_all_aliases()
                    .is_some_and(|aliases| aliases.contains(&long))
        })
    } else {
        let mut shorts = token.chars().skip(1);
        let (Some(short), None) = (shorts.next(), shorts.next()) else {
            return false;
        };
        cmd.get_arguments().find(|a| a.get_short() == Some(short))
    };
    arg.is_some_and(|a| a.get_action().takes_values())
}

/// A clap command whose subcommands may be abbreviated.
#[derive(Debug, Clone)]
pub struct AliasedGroup {
    cmd: Command,
}

impl AliasedGroup {
    #[must_use]
    pub const fn new(cmd: Command) -> Self {
        Self { cmd }
    }

    #[must_use]
    pub fn from_parser<P: CommandFactory>() -> Self {
        Self::new(P::command())
    }

    #[must_use]
    pub const fn command(&self) -> &Command {
        &self.cmd
    }

    /// The top-level subcommand for `name`, exact or abbreviated.
    pub fn get_command(&self, name: &str) -> crate::Result<Option<&Command>> {
        resolve(&self.cmd, name)
    }

    /// Rewrite abbreviated subcommands in `args` to their full names.
    ///
    /// The first argument is the binary name. Nested subcommands are
    /// expanded level by level; anything unrecognised is left for clap
    /// to report.
    pub fn expand_args<I, T>(&self, args: I) -> crate::Result<Vec<OsString>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let mut cmd = &self.cmd;
        let mut i = 1;

        while i < args.len() {
            let Some(token) = args[i].to_str() else {
                break;
            };
            if token == "--" {
                break;
            }
            if token.starts_with('-') && token != "-" {
                if option_takes_value(cmd, token) {
                    i += 1;
                }
                i += 1;
                continue;
            }
            if !cmd.has_subcommands() {
                break;
            }
            let Some(sub) = resolve(cmd, token)? else {
                break;
            };
            if sub.get_name() != token {
                debug!(from = token, to = sub.get_name(), "expanded subcommand");
                args[i] = sub.get_name().into();
            }
            cmd = sub;
            i += 1;
        }

        Ok(args)
    }

    /// Usage error for `err`, formatted by clap for this command.
    #[must_use]
    pub fn usage_error(&self, err: &Error) -> clap::Error {
        self.cmd.clone().error(ErrorKind::InvalidSubcommand, err)
    }

    pub fn try_get_matches_from<I, T>(&self, args: I) -> Result<ArgMatches, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args = self.expand_args(args).map_err(|e| self.usage_error(&e))?;
        self.cmd.clone().try_get_matches_from(args)
    }

    /// Parse `args` into `P`, expanding abbreviations first.
    pub fn try_parse_from<P, I, T>(args: I) -> Result<P, clap::Error>
    where
        P: Parser,
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let group = Self::from_parser::<P>();
        let args = group.expand_args(args).map_err(|e| group.usage_error(&e))?;
        P::try_parse_from(args)
    }

    /// Parse the process arguments into `P`, exiting on errors like
    /// [`Parser::parse`].
    #[must_use]
    pub fn parse<P: Parser>() -> P {
        Self::try_parse_from(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }
}
