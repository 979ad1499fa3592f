//! Composite value adapters: lists, maps and IP addresses bound to a
//! [`Var`] and exposed to the flag set as a [`Value`].
//!
//! Token grammar:
//!
//! | Adapter | Token | Effect |
//! |---------|-------|--------|
//! | list | `elem` | append one element |
//! | map | `key:value` or `key` | insert, last write wins |
//! | multi-map | `key:value` or `key` | append under `key` |
//! | IP | `10.0.0.1`, `::1` | replace; unparsable text unsets |
//!
//! List and map adapters take over their variable: it is reset to empty when
//! the adapter is built and only the adapter mutates it afterwards.

use std::any::Any;
use std::collections::HashMap;
use std::net::IpAddr;

use crate::error::ValueError;
use crate::flagset::Value;
use crate::types::Header;
use crate::var::Var;

/// An element type a list flag can hold.
pub trait ListElement: Sized + Send + Sync + 'static {
    fn parse(token: &str) -> Result<Self, ValueError>;

    fn format(&self) -> String;
}

impl ListElement for String {
    fn parse(token: &str) -> Result<Self, ValueError> {
        Ok(token.to_string())
    }

    fn format(&self) -> String {
        self.clone()
    }
}

impl ListElement for isize {
    fn parse(token: &str) -> Result<Self, ValueError> {
        Ok(token.parse()?)
    }

    fn format(&self) -> String {
        self.to_string()
    }
}

impl ListElement for usize {
    /// Parsed at 64-bit width, then narrowed to the platform width.
    fn parse(token: &str) -> Result<Self, ValueError> {
        let wide: u64 = token.parse()?;
        Ok(usize::try_from(wide)?)
    }

    fn format(&self) -> String {
        self.to_string()
    }
}

/// Repeatable flag that appends one element per occurrence.
pub struct ListValue<T> {
    var: Var<Vec<T>>,
}

pub type StringList = ListValue<String>;
pub type IntList = ListValue<isize>;
pub type UintList = ListValue<usize>;

impl<T: ListElement> ListValue<T> {
    pub fn new(var: &Var<Vec<T>>) -> Self {
        var.set(Vec::new());
        Self { var: var.clone() }
    }

    pub fn expose(&self) -> &Var<Vec<T>> {
        &self.var
    }
}

impl<T: ListElement> Value for ListValue<T> {
    fn set(&mut self, token: &str) -> Result<(), ValueError> {
        let element = T::parse(token)?;
        self.var.write().push(element);
        Ok(())
    }

    fn render(&self) -> String {
        self.var
            .read()
            .iter()
            .map(T::format)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Split a `key:value` token once on the first `:`.
/// A token without `:` is a key with an empty value.
fn split_pair(token: &str) -> (&str, &str) {
    token.split_once(':').unwrap_or((token, ""))
}

/// Repeatable `key:value` flag; a repeated key overwrites its value.
pub struct StringMap {
    var: Var<HashMap<String, String>>,
}

impl StringMap {
    pub fn new(var: &Var<HashMap<String, String>>) -> Self {
        var.set(HashMap::new());
        Self { var: var.clone() }
    }

    pub fn expose(&self) -> &Var<HashMap<String, String>> {
        &self.var
    }
}

impl Value for StringMap {
    fn set(&mut self, token: &str) -> Result<(), ValueError> {
        let (key, value) = split_pair(token);
        self.var.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn render(&self) -> String {
        self.var
            .read()
            .iter()
            .map(|(key, value)| {
                if value.is_empty() {
                    key.clone()
                } else {
                    format!("{key}:{value}")
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Map types that hold an ordered list of values per key.
pub trait MultiMap: Default + Send + Sync + 'static {
    fn entries(&self) -> &HashMap<String, Vec<String>>;

    fn entries_mut(&mut self) -> &mut HashMap<String, Vec<String>>;
}

impl MultiMap for HashMap<String, Vec<String>> {
    fn entries(&self) -> &HashMap<String, Vec<String>> {
        self
    }

    fn entries_mut(&mut self) -> &mut HashMap<String, Vec<String>> {
        self
    }
}

impl MultiMap for Header {
    fn entries(&self) -> &HashMap<String, Vec<String>> {
        self
    }

    fn entries_mut(&mut self) -> &mut HashMap<String, Vec<String>> {
        self
    }
}

/// Repeatable `key:value` flag; a repeated key accumulates its values in
/// the order given.
pub struct StringListMap<M = HashMap<String, Vec<String>>> {
    var: Var<M>,
}

pub type HeaderValue = StringListMap<Header>;

impl<M: MultiMap> StringListMap<M> {
    pub fn new(var: &Var<M>) -> Self {
        var.set(M::default());
        Self { var: var.clone() }
    }

    pub fn expose(&self) -> &Var<M> {
        &self.var
    }
}

impl<M: MultiMap> Value for StringListMap<M> {
    fn set(&mut self, token: &str) -> Result<(), ValueError> {
        let (key, value) = split_pair(token);
        self.var
            .write()
            .entries_mut()
            .entry(key.to_string())
            .or_default()
            .push(value.to_string());
        Ok(())
    }

    /// One `key:value` token per stored value. Key order is unspecified.
    fn render(&self) -> String {
        let guard = self.var.read();
        guard
            .entries()
            .iter()
            .flat_map(|(key, values)| values.iter().map(move |value| format!("{key}:{value}")))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// IPv4 or IPv6 address flag. Text that does not parse leaves the variable
/// unset (`None`) instead of failing.
pub struct IpValue {
    var: Var<Option<IpAddr>>,
}

impl IpValue {
    pub fn new(var: &Var<Option<IpAddr>>) -> Self {
        Self { var: var.clone() }
    }

    pub fn expose(&self) -> &Var<Option<IpAddr>> {
        &self.var
    }
}

impl Value for IpValue {
    fn set(&mut self, token: &str) -> Result<(), ValueError> {
        self.var.set(token.parse().ok());
        Ok(())
    }

    fn render(&self) -> String {
        self.var.get().map(|ip| ip.to_string()).unwrap_or_default()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
