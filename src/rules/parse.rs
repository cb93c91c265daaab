//! Rule text parsing
//!
//! One candidate rule per non-blank line:
//!
//! ```text
//! <condition-name> [ "(" <value> ")" ] "=>" <action-name> "(" <value> ")"
//! ```
//!
//! Values may be single-quoted, double-quoted, or bare. A hand-written line
//! tokenizer (no regex) keeps malformed-input diagnostics precise: each
//! failure reports the line number, the offending text, and what was
//! expected.

use super::action::Action;
use super::condition::Condition;
use super::Rule;
use std::iter::Peekable;
use std::str::Chars;

/// A human-readable report for one malformed rule line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDiagnostic {
    /// 1-based line number in the rule text
    pub line: usize,
    /// The offending line, trimmed
    pub text: String,
    pub message: String,
}

impl std::fmt::Display for RuleDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {} ({:?})", self.line, self.message, self.text)
    }
}

/// Parse one line. `Ok(None)` for blank lines, `Err` with a message for
/// malformed ones.
pub(crate) fn parse_line(line: &str) -> Result<Option<Rule>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let mut parser = LineParser::new(trimmed);

    let condition_name = parser
        .ident()
        .ok_or_else(|| "expected a condition name".to_string())?;
    parser.skip_ws();
    let condition_arg = if parser.peek() == Some('(') {
        Some(parser.parenthesized_value()?)
    } else {
        None
    };
    let condition = build_condition(&condition_name, condition_arg)?;

    parser.skip_ws();
    parser.expect_arrow()?;
    parser.skip_ws();

    let action_name = parser
        .ident()
        .ok_or_else(|| "expected an action name after '=>'".to_string())?;
    parser.skip_ws();
    if parser.peek() != Some('(') {
        return Err(format!(
            "action '{}' requires a parenthesized argument",
            action_name
        ));
    }
    let action_value = parser.parenthesized_value()?;
    let action = build_action(&action_name, action_value)?;

    parser.skip_ws();
    if !parser.at_end() {
        return Err("unexpected trailing input after the action".to_string());
    }

    Ok(Some(Rule { condition, action }))
}

fn build_condition(name: &str, arg: Option<String>) -> Result<Condition, String> {
    let required = |arg: Option<String>| {
        arg.filter(|a| !a.is_empty())
            .ok_or_else(|| format!("condition '{}' requires an argument", name))
    };

    match name.to_ascii_lowercase().as_str() {
        "default" => Ok(Condition::Default),
        "tag" => Ok(Condition::Tag(required(arg)?)),
        "link_to" => Ok(Condition::LinkTo(required(arg)?)),
        "link_from" => Ok(Condition::LinkFrom(arg.filter(|a| !a.is_empty()))),
        "link" => Ok(Condition::Link(required(arg)?)),
        _ => Err(format!("unknown condition '{}'", name)),
    }
}

fn build_action(name: &str, value: String) -> Result<Action, String> {
    match name.to_ascii_lowercase().as_str() {
        "color" => Ok(Action::Color(value)),
        "shape" => Ok(Action::Shape(value)),
        // `texture` is the historical alias for material
        "material" | "texture" => Ok(Action::Material(value)),
        "size" => Ok(Action::Size(value)),
        _ => Err(format!("unknown action '{}'", name)),
    }
}

/// Character-level cursor over one rule line
struct LineParser<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> LineParser<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            chars: line.chars().peekable(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.chars.next();
        }
    }

    /// Consume an identifier: letters, digits, underscores
    fn ident(&mut self) -> Option<String> {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if !(c.is_alphanumeric() || c == '_') {
                break;
            }
            self.chars.next();
            out.push(c);
        }
        (!out.is_empty()).then_some(out)
    }

    fn expect_arrow(&mut self) -> Result<(), String> {
        if self.chars.next() == Some('=') && self.chars.next() == Some('>') {
            Ok(())
        } else {
            Err("expected '=>' between condition and action".to_string())
        }
    }

    /// Consume `"(" value ")"`. The value may be wrapped in single or double
    /// quotes (stripped), or bare up to the closing paren (trimmed).
    fn parenthesized_value(&mut self) -> Result<String, String> {
        self.chars.next(); // consume '('
        self.skip_ws();

        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.chars.next();
                let mut value = String::new();
                loop {
                    match self.chars.next() {
                        Some(c) if c == quote => break,
                        Some(c) => value.push(c),
                        None => return Err("unterminated quoted value".to_string()),
                    }
                }
                self.skip_ws();
                match self.chars.next() {
                    Some(')') => Ok(value),
                    _ => Err("expected ')' after quoted value".to_string()),
                }
            }
            _ => {
                let mut value = String::new();
                loop {
                    match self.chars.next() {
                        Some(')') => break,
                        Some(c) => value.push(c),
                        None => return Err("missing ')'".to_string()),
                    }
                }
                Ok(value.trim().to_string())
            }
        }
    }
}
