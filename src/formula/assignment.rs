use std::{collections::HashMap, fmt::Display, str::FromStr};

use indexmap::IndexMap;
use thiserror::Error;

/// Errors raised when reading a truth assignment from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentError {
    #[error("expected `name=value`, found {0:?}")]
    MalformedEntry(String),

    #[error("invalid truth value {value:?} for variable {name}")]
    InvalidValue { name: String, value: String },

    #[error("variable {0} is assigned more than once")]
    Duplicate(String),
}

/// An assignment of truth values to variable names.
/// Iteration follows insertion order; equality ignores it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    values: IndexMap<String, bool>,
}

impl Assignment {
    /// Create a new assignment that maps no variables
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get the value of a variable, if it is assigned
    pub fn get(&self, name: &str) -> Option<bool> {
        self.values.get(name).copied()
    }

    /// Set the value of a variable and return its previous value
    pub fn set(&mut self, name: impl Into<String>, value: bool) -> Option<bool> {
        self.values.insert(name.into(), value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for Assignment {
    fn from_iter<T: IntoIterator<Item = (S, bool)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl From<HashMap<String, bool>> for Assignment {
    fn from(value: HashMap<String, bool>) -> Self {
        value.into_iter().collect()
    }
}

fn parse_truth_value(name: &str, value: &str) -> Result<bool, AssignmentError> {
    match value {
        "true" | "True" | "TRUE" | "T" | "1" => Ok(true),
        "false" | "False" | "FALSE" | "F" | "0" => Ok(false),
        _ => Err(AssignmentError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Removes whitespace around `=` and `:`, so that `p: true` is a single entry.
fn tighten(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '=' || c == ':' {
            while out.ends_with(char::is_whitespace) {
                out.pop();
            }
            out.push(c);
            while chars.next_if(|c| c.is_whitespace()).is_some() {}
        } else {
            out.push(c);
        }
    }
    out
}

/// Reads `name=value` (or `name: value`) entries separated by commas, e.g. `p=true, q=0`,
/// or by whitespace if there is no comma, e.g. `p=1 q=0`.
/// Surrounding braces are ignored, so the output of [Display] can be read back.
impl FromStr for Assignment {
    type Err = AssignmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s
            .strip_prefix('{')
            .and_then(|r| r.strip_suffix('}'))
            .unwrap_or(s);
        let s = tighten(s);
        let mut assignment = Assignment::empty();
        // entries are separated by commas if there are any, by whitespace otherwise
        let entries: Vec<&str> = if s.contains(',') {
            s.split(',').map(str::trim).collect()
        } else {
            s.split_whitespace().collect()
        };
        for entry in entries.into_iter().filter(|e| !e.is_empty()) {
            let (name, value) = entry
                .split_once(|c| c == '=' || c == ':')
                .ok_or_else(|| AssignmentError::MalformedEntry(entry.to_string()))?;
            let (name, value) = (name.trim(), value.trim());
            if name.is_empty() {
                return Err(AssignmentError::MalformedEntry(entry.to_string()));
            }
            let value = parse_truth_value(name, value)?;
            if assignment.set(name, value).is_some() {
                return Err(AssignmentError::Duplicate(name.to_string()));
            }
        }
        Ok(assignment)
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for (name, value) in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, value)?;
            first = false;
        }
        write!(f, "}}")
    }
}
