//! Bind typed configuration variables to command-line flags.
//!
//! Confinator sits between a config struct and a flag set. You hand it a
//! variable, a flag name and a usage line; it finds out how that variable's
//! type is parsed and printed, and defines the flag for you.
//!
//! ```ignore
//! let cf = Confinator::new();
//! let mut fs = FlagSet::new("server");
//!
//! let port = Var::new(8080u64);
//! let peers: Var<Vec<String>> = Var::default();
//! let labels: Var<HashMap<String, String>> = Var::default();
//!
//! cf.bind(&mut fs, &port, "port", "listen port");
//! cf.bind(&mut fs, &peers, "peer", "peer address (repeatable)");
//! cf.bind(&mut fs, &labels, "label", "key:value label (repeatable)");
//!
//! fs.parse(["--port", "9090", "--peer", "a", "--peer", "b", "--label", "zone:eu"])?;
//! println!("{}", HelpTextConf::new(&fs).render());
//! ```
//!
//! # Variables
//!
//! A [`Var<T>`] is a shared, thread-safe cell. The caller keeps one handle,
//! the flag set keeps another, and parsed values land in the shared cell.
//! `Option<Var<T>>` is accepted wherever a `Var<T>` is. `None` counts as a
//! nil pointer.
//!
//! # The type registry
//!
//! [`Confinator`] maps a variable's pointee type to a handler that defines
//! the flag. A fresh registry knows these types:
//!
//! | Type | Flag |
//! |------|------|
//! | `bool` | `--name` or `--name=false` |
//! | `String`, `isize`, `usize`, `i64`, `u64` | `--name value` |
//! | `Duration` | `--name 1h30m` |
//! | `Option<IpAddr>` | `--name 10.0.0.1` |
//! | `Vec<String>`, `Vec<isize>`, `Vec<usize>` | repeated `--name elem` |
//! | `HashMap<String, String>` | repeated `--name key:value` |
//! | `HashMap<String, Vec<String>>`, [`Header`] | repeated `--name key:value` |
//!
//! Add your own with [`Confinator::register`]. Registering a type that is
//! already known replaces its handler.
//!
//! Wiring mistakes are not recoverable errors. Binding a nil pointer, or a
//! type nobody registered, panics right away with the offending type in the
//! message. Configuration is wired once at startup, so such a mistake shows
//! up the first time the program runs.
//!
//! # Token grammar
//!
//! - **Lists** append one element per occurrence, in command-line order.
//! - **Maps** split each token once on `:`. A bare `key` stores an empty
//!   value, and a repeated key overwrites the earlier value.
//! - **Multi-maps** split the same way, but a repeated key collects every
//!   value in order.
//! - **IP addresses** that fail to parse leave the variable unset
//!   (`None`) instead of failing the parse.
//!
//! List and map variables are cleared when their flag is defined. From then
//! on only the flag writes to them.
//!
//! # Help text
//!
//! [`HelpTextConf`] renders a table of every flag with its default and usage.
//! The output is built by five stages: header, table header, row, table
//! footer and footer. Each stage can be swapped for a closure. Stages see the
//! column widths and the text rendered so far.
//!
//! # Error handling
//!
//! [`FlagSet::parse`] returns [`FlagError`]. A bad token names the flag and
//! the token and keeps the conversion error as its source. Tokens accepted
//! before the failure stay applied. Enable the `rich-errors` feature for
//! [`miette`](https://docs.rs/miette) diagnostics.
//!
//! # Logging
//!
//! The registry and the flag set emit [`tracing`](https://docs.rs/tracing)
//! events at `debug` and `trace` level. No subscriber is installed.

pub mod duration;
pub mod error;
pub mod types;
pub mod values;

mod cli;
mod defaults;
mod flagset;
mod help;
mod registry;
mod var;

#[cfg(test)]
mod fixtures;

pub use defaults::default_handlers;
pub use duration::{DurationError, format_duration, parse_duration};
pub use error::{FlagError, ValueError};
pub use flagset::{Flag, FlagSet, Value};
pub use help::{
    HelpTextConf, HelpTextState, RowFn, SectionFn, default_footer, default_header,
    default_table_footer, default_table_header, default_table_row, render_help,
};
pub use registry::{Confinator, Handler};
pub use types::{Header, TypeKey};
pub use var::{Pointer, Var};
