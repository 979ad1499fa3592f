//! The flag engine: named flags backed by [`Value`]s.
//!
//! A [`FlagSet`] stores flag definitions and drives parsing. Typed helpers
//! (`bool_var`, `int_var`, ...) cover the primitive types; anything else
//! plugs in through [`FlagSet::var`] with its own [`Value`] implementation.
//! Flags are kept sorted by name, which is also the enumeration order.

use std::any::Any;
use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::fmt;
use std::time::Duration;

use tracing::debug;

use crate::cli;
use crate::duration::{format_duration, parse_duration};
use crate::error::{FlagError, ValueError};
use crate::var::Var;

/// A flag's settable, printable value.
pub trait Value: Send + Sync + 'static {
    /// Accept one token from the command line.
    fn set(&mut self, token: &str) -> Result<(), ValueError>;

    /// Display form of the current value.
    fn render(&self) -> String;

    fn as_any(&self) -> &dyn Any;

    /// Boolean flags may appear without a value (`--verbose`).
    fn is_bool_flag(&self) -> bool {
        false
    }
}

/// A defined flag.
pub struct Flag {
    name: String,
    usage: String,
    default_value: String,
    value: Box<dyn Value>,
}

impl Flag {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// The value's display form at definition time.
    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    pub fn value(&self) -> &dyn Value {
        self.value.as_ref()
    }
}

impl fmt::Debug for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flag")
            .field("name", &self.name)
            .field("usage", &self.usage)
            .field("default_value", &self.default_value)
            .field("value", &self.value.render())
            .finish()
    }
}

/// A named set of flags.
#[derive(Debug)]
pub struct FlagSet {
    name: String,
    flags: BTreeMap<String, Flag>,
    actual: BTreeSet<String>,
    args: Vec<String>,
    parsed: bool,
}

impl FlagSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: BTreeMap::new(),
            actual: BTreeSet::new(),
            args: Vec::new(),
            parsed: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Define a flag backed by an arbitrary [`Value`].
    ///
    /// # Panics
    ///
    /// Panics if a flag with the same name already exists.
    pub fn var(&mut self, value: impl Value, name: &str, usage: &str) {
        if self.flags.contains_key(name) {
            panic!("flag redefined: {name}");
        }
        let flag = Flag {
            name: name.to_string(),
            usage: usage.to_string(),
            default_value: value.render(),
            value: Box::new(value),
        };
        debug!(flag_set = %self.name, flag = name, "defined flag");
        self.flags.insert(name.to_string(), flag);
    }

    pub fn bool_var(&mut self, p: &Var<bool>, name: &str, value: bool, usage: &str) {
        self.scalar_var(p, name, value, usage);
    }

    pub fn string_var(&mut self, p: &Var<String>, name: &str, value: String, usage: &str) {
        self.scalar_var(p, name, value, usage);
    }

    pub fn int_var(&mut self, p: &Var<isize>, name: &str, value: isize, usage: &str) {
        self.scalar_var(p, name, value, usage);
    }

    pub fn uint_var(&mut self, p: &Var<usize>, name: &str, value: usize, usage: &str) {
        self.scalar_var(p, name, value, usage);
    }

    pub fn int64_var(&mut self, p: &Var<i64>, name: &str, value: i64, usage: &str) {
        self.scalar_var(p, name, value, usage);
    }

    pub fn uint64_var(&mut self, p: &Var<u64>, name: &str, value: u64, usage: &str) {
        self.scalar_var(p, name, value, usage);
    }

    pub fn duration_var(&mut self, p: &Var<Duration>, name: &str, value: Duration, usage: &str) {
        self.scalar_var(p, name, value, usage);
    }

    fn scalar_var<T: Scalar>(&mut self, p: &Var<T>, name: &str, value: T, usage: &str) {
        p.set(value);
        self.var(ScalarValue { var: p.clone() }, name, usage);
    }

    /// Parse command-line arguments (without the program name).
    ///
    /// Flags are spelled `--name value` or `--name=value`; boolean flags
    /// accept `--name` alone. Parsing stops at the first positional
    /// argument, and everything from there on is available via
    /// [`args`](Self::args). Tokens are applied in command-line order and
    /// parsing stops at the first one that fails; earlier tokens stay applied.
    ///
    /// A syntax error from clap leaves the flag set untouched.
    pub fn parse<I, S>(&mut self, args: I) -> Result<(), FlagError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString> + Clone,
    {
        let occurrences = cli::tokenize(self, args)?;
        self.parsed = true;
        self.args = occurrences.positional;
        for (name, token) in occurrences.flags {
            self.apply(&name, token)?;
        }
        debug!(
            flag_set = %self.name,
            set = self.actual.len(),
            positional = self.args.len(),
            "parsed arguments"
        );
        Ok(())
    }

    /// Apply a single token to the named flag, as if it appeared on the
    /// command line.
    pub fn set(&mut self, name: &str, token: &str) -> Result<(), FlagError> {
        self.apply(name, token.to_string())
    }

    fn apply(&mut self, name: &str, token: String) -> Result<(), FlagError> {
        let flag = self
            .flags
            .get_mut(name)
            .ok_or_else(|| FlagError::UnknownFlag(name.to_string()))?;
        flag.value
            .set(&token)
            .map_err(|source| FlagError::InvalidValue {
                flag: name.to_string(),
                token,
                source,
            })?;
        self.actual.insert(name.to_string());
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&Flag> {
        self.flags.get(name)
    }

    /// All flags, sorted by name.
    pub fn flags(&self) -> impl Iterator<Item = &Flag> {
        self.flags.values()
    }

    /// Visit every defined flag in name order.
    pub fn visit_all(&self, mut f: impl FnMut(&Flag)) {
        self.flags.values().for_each(&mut f);
    }

    /// Visit only the flags that have been set, in name order.
    pub fn visit(&self, mut f: impl FnMut(&Flag)) {
        self.actual
            .iter()
            .filter_map(|name| self.flags.get(name))
            .for_each(&mut f);
    }

    pub fn parsed(&self) -> bool {
        self.parsed
    }

    /// Positional arguments left over after parsing.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

/// Primitive types the engine can parse on its own.
trait Scalar: Clone + Send + Sync + 'static {
    const IS_BOOL: bool = false;

    fn parse(token: &str) -> Result<Self, ValueError>;

    fn format(&self) -> String;
}

impl Scalar for bool {
    const IS_BOOL: bool = true;

    fn parse(token: &str) -> Result<Self, ValueError> {
        match token {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            _ => Err(ValueError::InvalidBool(token.to_string())),
        }
    }

    fn format(&self) -> String {
        self.to_string()
    }
}

impl Scalar for String {
    fn parse(token: &str) -> Result<Self, ValueError> {
        Ok(token.to_string())
    }

    fn format(&self) -> String {
        self.clone()
    }
}

macro_rules! integer_scalar {
    ($($ty:ty),*) => {
        $(
            impl Scalar for $ty {
                fn parse(token: &str) -> Result<Self, ValueError> {
                    Ok(token.parse::<$ty>()?)
                }

                fn format(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

integer_scalar!(isize, usize, i64, u64);

impl Scalar for Duration {
    fn parse(token: &str) -> Result<Self, ValueError> {
        Ok(parse_duration(token)?)
    }

    fn format(&self) -> String {
        format_duration(*self)
    }
}

struct ScalarValue<T> {
    var: Var<T>,
}

impl<T: Scalar> Value for ScalarValue<T> {
    fn set(&mut self, token: &str) -> Result<(), ValueError> {
        self.var.set(T::parse(token)?);
        Ok(())
    }

    fn render(&self) -> String {
        self.var.read().format()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn is_bool_flag(&self) -> bool {
        T::IS_BOOL
    }
}
