//! Argument tokenizing for [`FlagSet::parse`](crate::FlagSet::parse),
//! delegated to [clap](https://docs.rs/clap).
//!
//! A throwaway clap [`Command`] is built from the flag set's definitions on
//! every parse. clap handles `--flag value` vs `--flag=value`, optional values
//! for boolean flags, unknown-flag errors and non-UTF-8 input. This module
//! hands back every flag token in command-line order for the flag set to
//! apply.

use std::ffi::OsString;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};

use crate::flagset::FlagSet;

/// Id of the catch-all positional argument. Never a valid `--long` name.
const POSITIONAL: &str = "[args]";

/// Tokens pulled out of an argument list.
#[derive(Debug, Default)]
pub(crate) struct Occurrences {
    /// `(flag, token)` pairs across all flags, in command-line order.
    pub flags: Vec<(String, String)>,
    pub positional: Vec<String>,
}

pub(crate) fn tokenize<I, S>(fs: &FlagSet, args: I) -> Result<Occurrences, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    let matches = command(fs).try_get_matches_from(args)?;

    let mut indexed: Vec<(usize, String, String)> = Vec::new();
    for flag in fs.flags() {
        let name = flag.name();
        let (Some(indices), Some(tokens)) =
            (matches.indices_of(name), matches.get_many::<String>(name))
        else {
            continue;
        };
        indexed.extend(
            indices
                .zip(tokens)
                .map(|(index, token)| (index, name.to_string(), token.clone())),
        );
    }
    indexed.sort_by_key(|(index, _, _)| *index);

    let flags = indexed
        .into_iter()
        .map(|(_, name, token)| (name, token))
        .collect();
    let positional = values(&matches, POSITIONAL);
    Ok(Occurrences { flags, positional })
}

fn values(matches: &ArgMatches, id: &str) -> Vec<String> {
    matches
        .get_many::<String>(id)
        .map(|tokens| tokens.cloned().collect())
        .unwrap_or_default()
}

fn command(fs: &FlagSet) -> Command {
    let positional = Arg::new(POSITIONAL)
        .value_parser(value_parser!(String))
        .action(ArgAction::Append)
        .num_args(1..)
        .trailing_var_arg(true);

    fs.flags().fold(
        Command::new(fs.name().to_string())
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .arg(positional),
        |cmd, flag| {
            let arg = Arg::new(flag.name().to_string())
                .long(flag.name().to_string())
                .help(flag.usage().to_string())
                .value_parser(value_parser!(String))
                .action(ArgAction::Append);
            let arg = if flag.value().is_bool_flag() {
                arg.num_args(0..=1)
                    .require_equals(true)
                    .default_missing_value("true")
            } else {
                arg.num_args(1).allow_hyphen_values(true)
            };
            cmd.arg(arg)
        },
    )
}
