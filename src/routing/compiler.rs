//! Route pattern compiler.
//!
//! # Pipeline (per pattern)
//! ```text
//! raw path ──► optional-name scan ──► `{name?}` rewritten to `{name}`
//!          ──► placeholder scan (name, offset)
//!          ──► validate name ──► tokenize (separator absorption, constraint)
//!          ──► optional run detection (path only)
//!          ──► regex assembly (fold over tokens)
//! ```
//!
//! Host and path patterns go through the same pipeline independently and are
//! merged into one [`CompiledRoute`].

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{PatternError, PatternResult};
use crate::observability::metrics;
use crate::routing::compiled::CompiledRoute;
use crate::routing::escape::{default_constraint, find_next_separator, is_separator, push_quoted, regex_quote};
use crate::routing::pattern::{Constraints, RoutePattern};
use crate::routing::token::Token;

/// Maximum variable name length, in characters.
pub const VARIABLE_MAXIMUM_LENGTH: usize = 32;

static OPTIONAL_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\w+?)\?\}").expect("valid regex"));

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(\w+?)\}").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatternKind {
    Host,
    Path,
}

impl PatternKind {
    fn default_separator(self) -> char {
        match self {
            PatternKind::Host => '.',
            PatternKind::Path => '/',
        }
    }
}

/// Output of compiling a single host or path pattern.
#[derive(Debug, Default)]
struct CompiledPattern {
    tokens: Vec<Token>,
    variables: Vec<String>,
    regex: String,
    first_optional: Option<usize>,
}

impl CompiledPattern {
    fn static_prefix(&self) -> String {
        match self.tokens.first() {
            Some(Token::Text { content }) => content.clone(),
            _ => String::new(),
        }
    }

    fn optional_variables(&self) -> Vec<String> {
        let Some(first) = self.first_optional else {
            return Vec::new();
        };
        self.tokens[first..]
            .iter()
            .filter_map(|t| t.variable_name().map(str::to_owned))
            .collect()
    }
}

/// Compile a route pattern into its matcher artifact.
pub fn compile(route: &RoutePattern) -> PatternResult<CompiledRoute> {
    compile_with(&route.host, &route.path, route)
}

/// Compile host and path patterns using an arbitrary constraint lookup.
///
/// An empty `host` means the route has no host constraint.
pub fn compile_with<C>(host: &str, path: &str, constraints: &C) -> PatternResult<CompiledRoute>
where
    C: Constraints + ?Sized,
{
    let result = compile_parts(host, path, constraints);
    match &result {
        Ok(route) => {
            metrics::record_compilation();
            tracing::debug!(
                host = %host,
                path = %path,
                path_regex = %route.path_regex,
                host_regex = %route.host_regex,
                variables = route.variables.len(),
                "Compiled route pattern"
            );
        }
        Err(e) => {
            metrics::record_compile_error(e.kind());
            tracing::warn!(
                host = %host,
                path = %path,
                variable = e.name(),
                error = %e,
                "Rejected route pattern"
            );
        }
    }
    result
}

fn compile_parts<C>(host: &str, path: &str, constraints: &C) -> PatternResult<CompiledRoute>
where
    C: Constraints + ?Sized,
{
    let host_part = if host.is_empty() {
        CompiledPattern::default()
    } else {
        compile_pattern(host, PatternKind::Host, &HashSet::new(), constraints)?
    };

    let optional: HashSet<&str> = OPTIONAL_PLACEHOLDER
        .captures_iter(path)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();
    let normalized = OPTIONAL_PLACEHOLDER.replace_all(path, "{${1}}");
    let path_part = compile_pattern(&normalized, PatternKind::Path, &optional, constraints)?;

    let mut variables = host_part.variables.clone();
    for name in &path_part.variables {
        if !variables.contains(name) {
            variables.push(name.clone());
        }
    }

    Ok(CompiledRoute {
        static_prefix: path_part.static_prefix(),
        optional_variables: path_part.optional_variables(),
        path_regex: path_part.regex,
        path_tokens: path_part.tokens,
        path_variables: path_part.variables,
        host_regex: host_part.regex,
        host_tokens: host_part.tokens,
        host_variables: host_part.variables,
        variables,
    })
}

fn compile_pattern<C>(
    pattern: &str,
    kind: PatternKind,
    optional: &HashSet<&str>,
    constraints: &C,
) -> PatternResult<CompiledPattern>
where
    C: Constraints + ?Sized,
{
    let mut tokens = Vec::new();
    let mut variables: Vec<String> = Vec::new();
    let mut pos = 0;

    for caps in PLACEHOLDER.captures_iter(pattern) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let name = name.as_str();
        validate_name(pattern, name, &variables)?;

        let preceding_text = &pattern[pos..whole.start()];
        pos = whole.end();

        let separator = preceding_text.chars().next_back().filter(|c| is_separator(*c));
        match separator {
            Some(sep) if preceding_text.len() > sep.len_utf8() => {
                tokens.push(Token::text(&preceding_text[..preceding_text.len() - sep.len_utf8()]));
            }
            Some(_) => {}
            None if !preceding_text.is_empty() => tokens.push(Token::text(preceding_text)),
            None => {}
        }

        let constraint = match constraints.constraint_for(name) {
            Some(c) => c.to_owned(),
            None => default_constraint(kind.default_separator(), find_next_separator(&pattern[pos..])),
        };

        tokens.push(Token::variable(separator, constraint, name));
        variables.push(name.to_owned());
    }

    if pos < pattern.len() {
        tokens.push(Token::text(&pattern[pos..]));
    }

    let first_optional = match kind {
        PatternKind::Path => first_optional_index(&tokens, optional),
        PatternKind::Host => None,
    };
    let regex = assemble_regex(&tokens, first_optional);

    Ok(CompiledPattern {
        tokens,
        variables,
        regex,
        first_optional,
    })
}

fn validate_name(pattern: &str, name: &str, seen: &[String]) -> PatternResult<()> {
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(PatternError::InvalidVariableName {
            pattern: pattern.to_owned(),
            name: name.to_owned(),
        });
    }
    if seen.iter().any(|v| v == name) {
        return Err(PatternError::DuplicateVariableName {
            pattern: pattern.to_owned(),
            name: name.to_owned(),
        });
    }
    if name.chars().count() > VARIABLE_MAXIMUM_LENGTH {
        return Err(PatternError::VariableNameTooLong {
            pattern: pattern.to_owned(),
            name: name.to_owned(),
            max: VARIABLE_MAXIMUM_LENGTH,
        });
    }
    Ok(())
}

/// Index of the first token of the trailing run of optional variables.
fn first_optional_index(tokens: &[Token], optional: &HashSet<&str>) -> Option<usize> {
    tokens
        .iter()
        .enumerate()
        .rev()
        .take_while(|(_, token)| token.variable_name().is_some_and(|n| optional.contains(n)))
        .last()
        .map(|(i, _)| i)
}

/// Build the anchored regex for a token list.
///
/// The fold carries `(regex, open_groups)`. Each optional variable past the
/// start of the run opens a non-capturing group; all groups close together
/// after the last token, so a later optional segment can only be present when
/// every earlier one in the run is. A run starting at index 0 makes the first
/// variable's capture group itself optional instead of opening a group.
fn assemble_regex(tokens: &[Token], first_optional: Option<usize>) -> String {
    let (body, open_groups) =
        tokens
            .iter()
            .enumerate()
            .fold((String::new(), 0usize), |(mut regex, mut open), (i, token)| {
                match token {
                    Token::Text { content } => regex.push_str(&regex_quote(content)),
                    Token::Variable {
                        separator,
                        constraint,
                        name,
                    } => {
                        let optional = first_optional.is_some_and(|first| i >= first);
                        if optional && i == 0 {
                            push_variable(&mut regex, *separator, name, constraint);
                            regex.push('?');
                        } else {
                            if optional {
                                regex.push_str("(?:");
                                open += 1;
                            }
                            push_variable(&mut regex, *separator, name, constraint);
                        }
                    }
                }
                (regex, open)
            });

    let mut regex = String::with_capacity(body.len() + 2 + open_groups * 2);
    regex.push('^');
    regex.push_str(&body);
    regex.push_str(&")?".repeat(open_groups));
    regex.push('$');
    regex
}

fn push_variable(regex: &mut String, separator: Option<char>, name: &str, constraint: &str) {
    if let Some(sep) = separator {
        push_quoted(regex, sep);
    }
    regex.push_str("(?<");
    regex.push_str(name);
    regex.push('>');
    regex.push_str(constraint);
    regex.push(')');
}
