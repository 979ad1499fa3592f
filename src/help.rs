//! Help text for a [`FlagSet`], assembled from five replaceable stages.
//!
//! ```text
//! header          "{flag set name}\n"
//! table header    "\t[Flag]    [Default]    [Usage]"
//! table row × N   "\n\t--name    default    usage"
//! table footer    ""
//! footer          ""
//! ```
//!
//! Every stage receives a [`HelpTextState`] with the column widths and the
//! text produced so far, so a custom stage can react to what came before it.
//! Stages only get shared references; rendering never changes the flag set.

use crate::flagset::{Flag, FlagSet};

const FLAG_PREFIX: &str = "--";
const FLAG_LABEL: &str = "[Flag]";
const DEFAULT_LABEL: &str = "[Default]";
const USAGE_LABEL: &str = "[Usage]";
const COLUMN_GAP: usize = 4;

/// Snapshot handed to every formatting stage.
#[derive(Debug, Clone, Copy)]
pub struct HelpTextState<'a> {
    pub flag_set: &'a FlagSet,
    /// Length of the longest flag name, in characters.
    pub longest_name: usize,
    /// Length of the longest default value, in characters.
    pub longest_default: usize,
    /// Everything rendered before this stage.
    pub current: &'a str,
}

pub type SectionFn<'a> = Box<dyn Fn(&HelpTextState<'_>) -> String + 'a>;
pub type RowFn<'a> = Box<dyn Fn(usize, &Flag, &HelpTextState<'_>) -> String + 'a>;

/// Which flag set to document and how. Stages left unset use the
/// `default_*` functions in this module.
pub struct HelpTextConf<'a> {
    flag_set: &'a FlagSet,
    header: Option<SectionFn<'a>>,
    table_header: Option<SectionFn<'a>>,
    table_row: Option<RowFn<'a>>,
    table_footer: Option<SectionFn<'a>>,
    footer: Option<SectionFn<'a>>,
}

impl<'a> HelpTextConf<'a> {
    pub fn new(flag_set: &'a FlagSet) -> Self {
        Self {
            flag_set,
            header: None,
            table_header: None,
            table_row: None,
            table_footer: None,
            footer: None,
        }
    }

    pub fn header(mut self, stage: impl Fn(&HelpTextState<'_>) -> String + 'a) -> Self {
        self.header = Some(Box::new(stage));
        self
    }

    pub fn table_header(mut self, stage: impl Fn(&HelpTextState<'_>) -> String + 'a) -> Self {
        self.table_header = Some(Box::new(stage));
        self
    }

    /// Row stage; receives the zero-based row index and the flag.
    pub fn table_row(
        mut self,
        stage: impl Fn(usize, &Flag, &HelpTextState<'_>) -> String + 'a,
    ) -> Self {
        self.table_row = Some(Box::new(stage));
        self
    }

    pub fn table_footer(mut self, stage: impl Fn(&HelpTextState<'_>) -> String + 'a) -> Self {
        self.table_footer = Some(Box::new(stage));
        self
    }

    pub fn footer(mut self, stage: impl Fn(&HelpTextState<'_>) -> String + 'a) -> Self {
        self.footer = Some(Box::new(stage));
        self
    }

    pub fn render(&self) -> String {
        render_help(self)
    }
}

/// Render help text for `conf.flag_set`.
pub fn render_help(conf: &HelpTextConf<'_>) -> String {
    let fs = conf.flag_set;
    let (longest_name, longest_default) = fs.flags().fold((0, 0), |(name, default), flag| {
        (
            name.max(flag.name().chars().count()),
            default.max(flag.default_value().chars().count()),
        )
    });
    let base = HelpTextState {
        flag_set: fs,
        longest_name,
        longest_default,
        current: "",
    };

    let mut out = section(conf.header.as_ref(), default_header, &base);
    let table_header = section(
        conf.table_header.as_ref(),
        default_table_header,
        &HelpTextState { current: &out, ..base },
    );
    out.push_str(&table_header);

    for (index, flag) in fs.flags().enumerate() {
        let state = HelpTextState { current: &out, ..base };
        let row = match &conf.table_row {
            Some(stage) => stage(index, flag, &state),
            None => default_table_row(index, flag, &state),
        };
        out.push_str(&row);
    }

    let table_footer = section(
        conf.table_footer.as_ref(),
        default_table_footer,
        &HelpTextState { current: &out, ..base },
    );
    out.push_str(&table_footer);
    let footer = section(
        conf.footer.as_ref(),
        default_footer,
        &HelpTextState { current: &out, ..base },
    );
    out.push_str(&footer);
    out
}

fn section(
    stage: Option<&SectionFn<'_>>,
    default: fn(&HelpTextState<'_>) -> String,
    state: &HelpTextState<'_>,
) -> String {
    match stage {
        Some(stage) => stage(state),
        None => default(state),
    }
}

pub fn default_header(state: &HelpTextState<'_>) -> String {
    format!("{}\n", state.flag_set.name())
}

pub fn default_table_header(state: &HelpTextState<'_>) -> String {
    let (name_width, default_width) = column_widths(state);
    format!(
        "\t{FLAG_LABEL}{}{DEFAULT_LABEL}{}{USAGE_LABEL}",
        pad(name_width, FLAG_LABEL.len()),
        pad(default_width, DEFAULT_LABEL.len()),
    )
}

pub fn default_table_row(_index: usize, flag: &Flag, state: &HelpTextState<'_>) -> String {
    let (name_width, default_width) = column_widths(state);
    let default = flag.default_value();
    format!(
        "\n\t{FLAG_PREFIX}{}{}{default}{}{}",
        flag.name(),
        pad(name_width, FLAG_PREFIX.len() + flag.name().chars().count()),
        pad(default_width, default.chars().count()),
        flag.usage(),
    )
}

pub fn default_table_footer(_state: &HelpTextState<'_>) -> String {
    String::new()
}

pub fn default_footer(_state: &HelpTextState<'_>) -> String {
    String::new()
}

/// Widths of the flag and default columns, gap included.
fn column_widths(state: &HelpTextState<'_>) -> (usize, usize) {
    let name = (FLAG_PREFIX.len() + state.longest_name).max(FLAG_LABEL.len()) + COLUMN_GAP;
    let default = state.longest_default.max(DEFAULT_LABEL.len()) + COLUMN_GAP;
    (name, default)
}

/// Spaces that take `used` characters up to `width`.
fn pad(width: usize, used: usize) -> String {
    " ".repeat(width.saturating_sub(used))
}
