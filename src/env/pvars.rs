//! # Format Options
//!
//! The `\pset` namespace: session values that control result display. Each
//! option has a descriptor that decides which values it accepts, what a
//! bare toggle does, and how the status line after a change is rendered.
//!
//! ## Option Table
//!
//! | Option                     | Default   | Accepts                      | Toggle            |
//! |----------------------------|-----------|------------------------------|-------------------|
//! | `border`                   | `1`       | integer 0..=2                | shows value       |
//! | `columns`                  | `0`       | integer >= 0                 | shows value       |
//! | `expanded`                 | `off`     | boolean, `auto`              | on/off            |
//! | `fieldsep`                 | `\|`      | any                          | shows value       |
//! | `fieldsep_zero`            | `off`     | boolean                      | on/off            |
//! | `footer`                   | `on`      | boolean                      | on/off            |
//! | `format`                   | `aligned` | output format names          | aligned/unaligned |
//! | `linestyle`                | `ascii`   | ascii, old-ascii, unicode    | shows value       |
//! | `null`                     | empty     | any                          | shows value       |
//! | `numericlocale`            | `off`     | boolean                      | on/off            |
//! | `pager`                    | `off`     | boolean, `always`            | on/off            |
//! | `pager_min_lines`          | `0`       | integer >= 0                 | shows value       |
//! | `recordsep`                | newline   | any                          | shows value       |
//! | `recordsep_zero`           | `off`     | boolean                      | on/off            |
//! | `tableattr`                | empty     | any                          | unset             |
//! | `title`                    | empty     | any                          | unset             |
//! | `tuples_only`              | `off`     | boolean                      | on/off            |
//! | `unicode_*_linestyle`      | `single`  | single, double               | shows value       |
//!
//! Boolean options accept `on/off/true/false/yes/no/1/0/t/f` in any case and
//! always store `on` or `off`.
//!
//! ## Status Templates
//!
//! After a toggle or set the new value is reported through a per-option
//! template. `{n}` is replaced by the value parsed as an integer, `{}` by
//! the value itself. A template without a placeholder is printed as is.
//! `tableattr` and `title` have an extra template used when the value is
//! empty. `expanded` set to `auto` reports through `expanded_auto`.

use crate::error::{Error, Result};
use hashbrown::HashMap;

#[derive(Debug, Clone, Copy)]
enum Domain {
    Int { min: i64, max: Option<i64> },
    Bool { extra: &'static [&'static str] },
    Choice(&'static [&'static str]),
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Toggle {
    Show,
    Flip,
    Unset,
    Format,
}

#[derive(Debug)]
struct Field {
    name: &'static str,
    default: &'static str,
    domain: Domain,
    toggle: Toggle,
}

const FORMATS: &[&str] = &[
    "aligned",
    "unaligned",
    "wrapped",
    "html",
    "asciidoc",
    "latex",
    "latex-longtable",
    "troff-ms",
    "csv",
    "json",
    "vertical",
];

const LINESTYLES: &[&str] = &["ascii", "old-ascii", "unicode"];
const UNICODE_LINESTYLES: &[&str] = &["single", "double"];
const BOOL: Domain = Domain::Bool { extra: &[] };
const COUNT: Domain = Domain::Int { min: 0, max: None };
const BORDER: Domain = Domain::Int {
    min: 0,
    max: Some(2),
};

const FIELDS: &[Field] = &[
    Field {
        name: "border",
        default: "1",
        domain: BORDER,
        toggle: Toggle::Show,
    },
    Field {
        name: "columns",
        default: "0",
        domain: COUNT,
        toggle: Toggle::Show,
    },
    Field {
        name: "expanded",
        default: "off",
        domain: Domain::Bool { extra: &["auto"] },
        toggle: Toggle::Flip,
    },
    Field {
        name: "fieldsep",
        default: "|",
        domain: Domain::Text,
        toggle: Toggle::Show,
    },
    Field {
        name: "fieldsep_zero",
        default: "off",
        domain: BOOL,
        toggle: Toggle::Flip,
    },
    Field {
        name: "footer",
        default: "on",
        domain: BOOL,
        toggle: Toggle::Flip,
    },
    Field {
        name: "format",
        default: "aligned",
        domain: Domain::Choice(FORMATS),
        toggle: Toggle::Format,
    },
    Field {
        name: "linestyle",
        default: "ascii",
        domain: Domain::Choice(LINESTYLES),
        toggle: Toggle::Show,
    },
    Field {
        name: "null",
        default: "",
        domain: Domain::Text,
        toggle: Toggle::Show,
    },
    Field {
        name: "numericlocale",
        default: "off",
        domain: BOOL,
        toggle: Toggle::Flip,
    },
    Field {
        name: "pager",
        default: "off",
        domain: Domain::Bool { extra: &["always"] },
        toggle: Toggle::Flip,
    },
    Field {
        name: "pager_min_lines",
        default: "0",
        domain: COUNT,
        toggle: Toggle::Show,
    },
    Field {
        name: "recordsep",
        default: "\n",
        domain: Domain::Text,
        toggle: Toggle::Show,
    },
    Field {
        name: "recordsep_zero",
        default: "off",
        domain: BOOL,
        toggle: Toggle::Flip,
    },
    Field {
        name: "tableattr",
        default: "",
        domain: Domain::Text,
        toggle: Toggle::Unset,
    },
    Field {
        name: "title",
        default: "",
        domain: Domain::Text,
        toggle: Toggle::Unset,
    },
    Field {
        name: "tuples_only",
        default: "off",
        domain: BOOL,
        toggle: Toggle::Flip,
    },
    Field {
        name: "unicode_border_linestyle",
        default: "single",
        domain: Domain::Choice(UNICODE_LINESTYLES),
        toggle: Toggle::Show,
    },
    Field {
        name: "unicode_column_linestyle",
        default: "single",
        domain: Domain::Choice(UNICODE_LINESTYLES),
        toggle: Toggle::Show,
    },
    Field {
        name: "unicode_header_linestyle",
        default: "single",
        domain: Domain::Choice(UNICODE_LINESTYLES),
        toggle: Toggle::Show,
    },
];

const TEMPLATES: &[(&str, &str)] = &[
    ("border", "Border style is {n}."),
    ("columns", "Target width is {n}."),
    ("expanded", "Expanded display is {}."),
    ("expanded_auto", "Expanded display is used automatically."),
    ("fieldsep", "Field separator is \"{}\"."),
    ("fieldsep_zero", "Field separator is zero byte."),
    ("footer", "Default footer is {}."),
    ("format", "Output format is {}."),
    ("linestyle", "Line style is {}."),
    ("null", "Null display is \"{}\"."),
    ("numericlocale", "Locale-adjusted numeric output is {}."),
    ("pager", "Pager usage is {}."),
    ("pager_min_lines", "Pager won't be used for less than {n} line(s)."),
    ("recordsep", "Record separator is \"{}\"."),
    ("recordsep_zero", "Record separator is zero byte."),
    ("tableattr", "Table attributes are \"{}\"."),
    ("title", "Title is \"{}\"."),
    ("tuples_only", "Tuples only is {}."),
    ("unicode_border_linestyle", "Unicode border line style is \"{}\"."),
    ("unicode_column_linestyle", "Unicode column line style is \"{}\"."),
    ("unicode_header_linestyle", "Unicode header line style is \"{}\"."),
];

const UNSET_TEMPLATES: &[(&str, &str)] = &[
    ("tableattr", "Table attributes unset."),
    ("title", "Title is unset."),
];

/// Options whose values are always shown ASCII-quoted.
const ALWAYS_QUOTED: &[&str] = &["fieldsep", "recordsep", "null"];

/// Options whose values are ASCII-quoted when non-empty.
const QUOTED_WHEN_SET: &[&str] = &["tableattr", "title"];

#[derive(Debug, Clone)]
pub struct FormatOptions {
    values: HashMap<&'static str, String>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            values: FIELDS
                .iter()
                .map(|f| (f.name, f.default.to_string()))
                .collect(),
        }
    }
}

impl FormatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Result<&str> {
        let field = lookup(name)?;
        Ok(self.values.get(field.name).map_or("", String::as_str))
    }

    /// Flips a toggle-able option and returns its new value.
    ///
    /// `extra` only matters for `format`: toggling with `extra` switches to
    /// that format, or back to `aligned` when it is already active.
    pub fn toggle(&mut self, name: &str, extra: &str) -> Result<String> {
        let field = lookup(name)?;
        let current = self.values.get(field.name).map_or("", String::as_str);

        let next = match field.toggle {
            Toggle::Show => return Ok(current.to_string()),
            Toggle::Flip if current == "on" => "off",
            Toggle::Flip => "on",
            Toggle::Unset => "",
            Toggle::Format if !extra.is_empty() && current != extra => extra,
            Toggle::Format if !extra.is_empty() || current != "aligned" => "aligned",
            Toggle::Format => "unaligned",
        }
        .to_string();

        self.values.insert(field.name, next.clone());
        Ok(next)
    }

    /// Validates `raw` against the option's accepted values, stores the
    /// normalized form and returns it.
    pub fn set(&mut self, name: &str, raw: &str) -> Result<String> {
        let field = lookup(name)?;
        let value = normalize(field, raw)?;
        self.values.insert(field.name, value.clone());
        Ok(value)
    }

    pub fn all(&self) -> HashMap<String, String> {
        self.values
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    /// One `name value` line per option, sorted and aligned on the widest
    /// name.
    pub fn listing(&self) -> Vec<String> {
        let mut names: Vec<&str> = self.values.keys().copied().collect();
        names.sort_unstable();
        let width = names.iter().map(|n| n.len()).max().unwrap_or(0);

        names
            .into_iter()
            .map(|name| {
                let v = &self.values[name];
                let shown = if ALWAYS_QUOTED.contains(&name)
                    || (QUOTED_WHEN_SET.contains(&name) && !v.is_empty())
                {
                    quote_ascii(v)
                } else {
                    v.clone()
                };
                format!("{:<width$} {}", name, shown)
            })
            .collect()
    }
}

/// Status line reported after `name` changed to `value`.
pub fn render(name: &str, value: &str) -> String {
    let key = if name == "expanded" && value == "auto" {
        "expanded_auto"
    } else {
        name
    };

    let template = find(TEMPLATES, key).unwrap_or("{}");
    let unset = find(UNSET_TEMPLATES, key);

    if template.contains("{n}") {
        let n: i64 = value.trim().parse().unwrap_or(0);
        template.replacen("{n}", &n.to_string(), 1)
    } else if let (Some(unset), true) = (unset, value.is_empty()) {
        unset.to_string()
    } else if !template.contains("{}") {
        template.to_string()
    } else if ALWAYS_QUOTED.contains(&key) {
        template.replacen("{}", &escape_ascii(value), 1)
    } else {
        template.replacen("{}", value, 1)
    }
}

/// Quotes `s` using only printable ASCII, escaping quotes, backslashes,
/// control characters and anything outside ASCII.
pub fn quote_ascii(s: &str) -> String {
    format!("\"{}\"", escape_ascii(s))
}

fn escape_ascii(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\x07' => out.push_str("\\a"),
            '\x08' => out.push_str("\\b"),
            '\x0c' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0b' => out.push_str("\\v"),
            ' '..='~' => out.push(c),
            c if (c as u32) < 0x80 => out.push_str(&format!("\\x{:02x}", c as u32)),
            c if (c as u32) <= 0xffff => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push_str(&format!("\\U{:08x}", c as u32)),
        }
    }
    out
}

fn lookup(name: &str) -> Result<&'static Field> {
    FIELDS
        .iter()
        .find(|f| f.name == name)
        .ok_or_else(|| Error::UnknownFormatField(name.to_string()))
}

fn find(table: &[(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

fn normalize(field: &Field, raw: &str) -> Result<String> {
    let invalid = |allowed: String| Error::InvalidFormatValue {
        field: field.name.to_string(),
        allowed,
    };

    match field.domain {
        Domain::Text => Ok(raw.to_string()),
        Domain::Int { min, max } => {
            let allowed = || match max {
                Some(max) => format!("integers from {min} to {max}"),
                None => format!("integers >= {min}"),
            };
            let n: i64 = raw.trim().parse().map_err(|_| invalid(allowed()))?;
            if n < min || max.is_some_and(|max| n > max) {
                return Err(invalid(allowed()));
            }
            Ok(n.to_string())
        }
        Domain::Choice(choices) => {
            let lower = raw.to_ascii_lowercase();
            choices
                .iter()
                .find(|c| **c == lower)
                .map(|c| c.to_string())
                .ok_or_else(|| invalid(choices.join(", ")))
        }
        Domain::Bool { extra } => {
            let lower = raw.to_ascii_lowercase();
            if let Some(v) = parse_bool(&lower) {
                return Ok(if v { "on" } else { "off" }.to_string());
            }
            extra
                .iter()
                .find(|e| **e == lower)
                .map(|e| e.to_string())
                .ok_or_else(|| {
                    let mut allowed = vec!["on", "off"];
                    allowed.extend_from_slice(extra);
                    invalid(allowed.join(", "))
                })
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "on" | "true" | "yes" | "1" | "t" => Some(true),
        "off" | "false" | "no" | "0" | "f" => Some(false),
        _ => None,
    }
}
