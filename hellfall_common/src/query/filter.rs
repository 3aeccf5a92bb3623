//! Tokenizing queries into filters

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Canonical field names and the keys that select them
pub const FIELD_ALIASES: &[(&str, &[&str])] = &[
    ("name", &["name", "n"]),
    ("colors", &["colors", "c", "color"]),
    ("mv", &["mv", "cmc"]),
    ("mana", &["mana", "m"]),
    ("identity", &["identity", "id"]),
    ("type_line", &["type_line", "type", "t"]),
    ("oracle", &["oracle", "o"]),
    ("flavor_text", &["flavor_text", "ft", "flavor", "flavortext"]),
    ("power", &["power", "pow"]),
    ("toughness", &["toughness", "tou", "tough"]),
    ("power_toughness", &["power_toughness", "pt", "powtou"]),
    ("loyalty", &["loyalty", "loy"]),
    ("devotion", &["devotion"]),
    ("produces", &["produces"]),
    ("set", &["set", "s", "edition", "e"]),
    ("tags", &["tags", "tag"]),
    ("creator", &["creator", "author"]),
    ("format", &["format", "f"]),
    ("banned", &["banned", "ban"]),
];

lazy_static! {
    /// key, operator, then a quoted or bare value, ending at whitespace
    static ref FILTER_PATTERN: Regex =
        Regex::new(r#"([A-Za-z0-9_]+)(>=|<=|[:=<>])(?:"([^"]+)"|([^"\s]+))(?:\s|$)"#)
            .expect("filter pattern is valid");

    static ref ALIAS_INDEX: HashMap<&'static str, &'static str> = FIELD_ALIASES
        .iter()
        .flat_map(|(field, aliases)| aliases.iter().map(move |alias| (*alias, *field)))
        .collect();
}

/// Resolve a query key to its canonical field name
pub fn canonical_field(alias: &str) -> Option<&'static str> {
    ALIAS_INDEX.get(alias).copied()
}

/// Comparison operator of a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `:` text match
    Match,
    /// `=`
    Equal,
    /// `>`
    Greater,
    /// `<`
    Less,
    /// `>=`
    GreaterOrEqual,
    /// `<=`
    LessOrEqual,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Match => ":",
            Operator::Equal => "=",
            Operator::Greater => ">",
            Operator::Less => "<",
            Operator::GreaterOrEqual => ">=",
            Operator::LessOrEqual => "<=",
        }
    }

    /// Every operator except `:` compares numbers
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Operator::Match)
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ":" => Ok(Operator::Match),
            "=" => Ok(Operator::Equal),
            ">" => Ok(Operator::Greater),
            "<" => Ok(Operator::Less),
            ">=" => Ok(Operator::GreaterOrEqual),
            "<=" => Ok(Operator::LessOrEqual),
            other => Err(format!("unknown operator '{}'", other)),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `(field, operator, value)` unit of a query
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// Canonical field name
    pub key: String,
    pub operator: Operator,
    /// Raw value, quotes stripped
    pub value: String,
}

impl Filter {
    pub fn new(key: &str, operator: Operator, value: &str) -> Self {
        Self {
            key: key.to_string(),
            operator,
            value: value.to_string(),
        }
    }
}

/// Filters extracted from one query string
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSet {
    pub filters: Vec<Filter>,
    /// True when nothing was recognized and the whole query became a name search
    pub fallback: bool,
    /// Tokens that parsed but named an unknown key
    pub dropped: usize,
}

/// Compile a query string into filters.
///
/// Never fails: unknown keys and malformed tokens are skipped, and a query
/// yielding no filters becomes a single `name:` match on the whole input.
pub fn compile(query: &str) -> FilterSet {
    let mut filters = Vec::new();
    let mut dropped = 0;

    for caps in FILTER_PATTERN.captures_iter(query) {
        let alias = caps[1].trim();
        let Some(key) = canonical_field(alias) else {
            log::debug!("Unknown filter key '{}' in '{}'", alias, &caps[0]);
            dropped += 1;
            continue;
        };

        let operator = match caps[2].parse::<Operator>() {
            Ok(operator) => operator,
            Err(e) => {
                log::debug!("Malformed filter '{}': {}", &caps[0], e);
                dropped += 1;
                continue;
            }
        };

        let value = caps
            .get(3)
            .or_else(|| caps.get(4))
            .map(|m| m.as_str().trim())
            .unwrap_or_default();

        filters.push(Filter::new(key, operator, value));
    }

    let fallback = filters.is_empty();
    if fallback {
        filters.push(Filter::new("name", Operator::Match, query));
    }

    FilterSet {
        filters,
        fallback,
        dropped,
    }
}
