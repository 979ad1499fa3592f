use std::num::{ParseIntError, TryFromIntError};

use thiserror::Error;

use crate::duration::DurationError;

/// A token that could not be converted into a flag's value type.
///
/// Integer failures are passed through unchanged so callers see the same
/// message the standard library produces.
#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum ValueError {
    #[error("invalid boolean '{0}'")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(confinator::invalid_bool),
            help("use one of 1, t, T, TRUE, true, True, 0, f, F, FALSE, false, False")
        )
    )]
    InvalidBool(String),

    #[error(transparent)]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(confinator::invalid_int)))]
    InvalidInt(#[from] ParseIntError),

    #[error(transparent)]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(confinator::out_of_range)))]
    OutOfRange(#[from] TryFromIntError),

    #[error(transparent)]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(code(confinator::invalid_duration), help("durations look like 300ms, 1.5h or 2h45m"))
    )]
    InvalidDuration(#[from] DurationError),
}

/// Errors returned while parsing arguments into a [`FlagSet`](crate::FlagSet).
#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum FlagError {
    #[error("invalid value '{token}' for flag --{flag}: {source}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(confinator::invalid_value)))]
    InvalidValue {
        flag: String,
        token: String,
        source: ValueError,
    },

    #[error("no such flag --{0}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(confinator::unknown_flag)))]
    UnknownFlag(String),

    #[error(transparent)]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(confinator::cli)))]
    Cli(#[from] clap::Error),
}
