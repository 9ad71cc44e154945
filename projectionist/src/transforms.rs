//! String transforms applied by placeholder pipelines.
//!
//! Each transform maps a string to a derived string. Transforms are looked up
//! by name with [`lookup`]; unknown names are the caller's concern.
//!
//! | Name         | Effect                                                  |
//! |--------------|---------------------------------------------------------|
//! | `dot`        | `/` → `.`                                               |
//! | `underscore` | `/` → `_`                                               |
//! | `backslash`  | `/` → `\`                                               |
//! | `colons`     | `/` → `::`                                              |
//! | `hyphenate`  | `_` → `-`                                               |
//! | `blank`      | `_` and `-` → space                                     |
//! | `uppercase`  | uppercase everything                                    |
//! | `camelcase`  | `foo_bar` → `fooBar`                                    |
//! | `snakecase`  | `fooBar` → `foo_bar`                                    |
//! | `capitalize` | uppercase the first letter and each letter after a `/`  |
//! | `dirname`    | parent directory                                        |
//! | `basename`   | final component                                         |
//! | `singular`   | heuristic English singular                              |
//! | `plural`     | heuristic English plural                                |
//! | `open`       | literal `{`                                             |
//! | `close`      | literal `}`                                             |
//! | `nothing`    | empty string                                            |

use crate::paths;
use once_cell::sync::Lazy;
use regex::Regex;

/// A named string transform.
pub type Transform = fn(&str) -> String;

/// Names of every registered transform.
pub const TRANSFORM_NAMES: &[&str] = &[
    "dot",
    "underscore",
    "backslash",
    "colons",
    "hyphenate",
    "blank",
    "uppercase",
    "camelcase",
    "snakecase",
    "capitalize",
    "dirname",
    "basename",
    "singular",
    "plural",
    "open",
    "close",
    "nothing",
];

/// Look up a transform by name.
pub fn lookup(name: &str) -> Option<Transform> {
    let transform: Transform = match name {
        "dot" => dot,
        "underscore" => underscore,
        "backslash" => backslash,
        "colons" => colons,
        "hyphenate" => hyphenate,
        "blank" => blank,
        "uppercase" => uppercase,
        "camelcase" => camelcase,
        "snakecase" => snakecase,
        "capitalize" => capitalize,
        "dirname" => dirname,
        "basename" => basename,
        "singular" => singular,
        "plural" => plural,
        "open" => open,
        "close" => close,
        "nothing" => nothing,
        _ => return None,
    };
    Some(transform)
}

pub fn dot(s: &str) -> String {
    s.replace('/', ".")
}

pub fn underscore(s: &str) -> String {
    s.replace('/', "_")
}

pub fn backslash(s: &str) -> String {
    s.replace('/', "\\")
}

pub fn colons(s: &str) -> String {
    s.replace('/', "::")
}

pub fn hyphenate(s: &str) -> String {
    s.replace('_', "-")
}

pub fn blank(s: &str) -> String {
    s.replace(['_', '-'], " ")
}

pub fn uppercase(s: &str) -> String {
    s.to_uppercase()
}

/// Drop every `_` and uppercase the character that follows it.
///
/// A trailing `_` is dropped. The character after an `_` is consumed by it,
/// so `a__b` gives `a_b`.
pub fn camelcase(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '_' {
            if let Some(next) = chars.next() {
                out.extend(next.to_uppercase());
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Prefix every uppercase character with `_` and lowercase it.
pub fn snakecase(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 2);
    for c in s.chars() {
        if c.is_uppercase() {
            out.push('_');
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Uppercase the first character and the first character after each `/`.
pub fn capitalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper_next = true;
    for c in s.chars() {
        if upper_next && c != '/' {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
        if c == '/' {
            upper_next = true;
        }
    }
    out
}

pub fn dirname(s: &str) -> String {
    paths::dir(s)
}

pub fn basename(s: &str) -> String {
    paths::base(s)
}

pub fn open(_: &str) -> String {
    "{".to_string()
}

pub fn close(_: &str) -> String {
    "}".to_string()
}

pub fn nothing(_: &str) -> String {
    String::new()
}

/// A conditional suffix rewrite.
///
/// The leftmost occurrence of `trigger` is replaced by `replacement` when
/// whether `lookback` matches the text before the occurrence equals `when`.
struct Rewrite {
    trigger: Regex,
    lookback: Regex,
    replacement: &'static str,
    when: bool,
}

impl Rewrite {
    fn new(lookback: &str, trigger: &str, replacement: &'static str, when: bool) -> Self {
        Self {
            trigger: Regex::new(trigger).expect("Invalid inflection trigger regex"),
            lookback: Regex::new(lookback).expect("Invalid inflection lookback regex"),
            replacement,
            when,
        }
    }

    fn apply(&self, s: String) -> String {
        let Some(found) = self.trigger.find(&s) else {
            return s;
        };
        let before = &s[..found.start()];
        if self.lookback.is_match(before) != self.when {
            return s;
        }
        let mut out = String::with_capacity(before.len() + self.replacement.len());
        out.push_str(before);
        out.push_str(self.replacement);
        out.push_str(&s[found.end()..]);
        out
    }
}

static SINGULAR_RULES: Lazy<Vec<Rewrite>> = Lazy::new(|| {
    vec![
        Rewrite::new("[Mm]ov|[aeio]$", "ies$", "ys", false),
        Rewrite::new("[rl]$", "ves$", "fs", true),
        Rewrite::new("(nd|rt)$", "ices$", "exs", true),
        Rewrite::new("s$", "s$", "", false),
        Rewrite::new("[nrt]ch|tatus|lias|ss$", "e$", "", true),
    ]
});

static PLURAL_RULES: Lazy<Vec<Rewrite>> = Lazy::new(|| {
    vec![
        Rewrite::new("[aeio]$", "y$", "ie", false),
        Rewrite::new("[rl]$", "f$", "ve", true),
        Rewrite::new("nd|rt$", "ex$", "ice", true),
    ]
});

static SIBILANT_END: Lazy<Regex> =
    Lazy::new(|| Regex::new("(?:[osxz]|[cs]h)$").expect("Invalid sibilant regex"));

/// Heuristic English singular. Not a dictionary lookup.
pub fn singular(s: &str) -> String {
    SINGULAR_RULES
        .iter()
        .fold(s.to_string(), |acc, rule| rule.apply(acc))
}

/// Heuristic English plural. Not a dictionary lookup.
pub fn plural(s: &str) -> String {
    let stem = PLURAL_RULES
        .iter()
        .fold(s.to_string(), |acc, rule| rule.apply(acc));
    let mut out = SIBILANT_END.replace(&stem, "${0}e").into_owned();
    out.push('s');
    out
}
