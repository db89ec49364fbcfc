//! Interpreter over the lexed token stream.
//!
//! Inside a repeating block every name goes through two substitution
//! phases: the literal `{{index}}` token inside the name is replaced with
//! the iteration number first, and only then is the fully-resolved key
//! looked up in the context. The index is a template variable nested inside
//! another variable's name, so the phases cannot be merged.

use crate::template::lexer::{tokenize, Token};
use crate::template::RenderContext;

const INDEX_TOKEN: &str = "{{index}}";

/// Expands `template` against `context`. Total: every input produces some
/// output, and unresolved names simply vanish.
pub fn render(template: &str, context: &RenderContext) -> String {
    let tokens = tokenize(template);
    let mut output = String::with_capacity(template.len());
    render_tokens(&tokens, context, None, &mut output);
    output
}

/// `index` is `Some` inside a repeating block, `None` at top level.
fn render_tokens(
    tokens: &[Token],
    context: &RenderContext,
    index: Option<usize>,
    output: &mut String,
) {
    let mut at = 0;
    while at < tokens.len() {
        match &tokens[at] {
            Token::Text(text) => {
                output.push_str(text);
                at += 1;
            }
            Token::Placeholder(name) => {
                output.push_str(context.get(&resolve_name(name, index)));
                at += 1;
            }
            Token::EachOpen => match matching_close(&tokens[at + 1..], is_each_open, is_each_close)
            {
                Some(span) => {
                    let body = &tokens[at + 1..at + 1 + span];
                    for i in 0..context.option_count() {
                        render_tokens(body, context, Some(i), output);
                    }
                    at += span + 2;
                }
                None => {
                    // Unbalanced block: emit the delimiter verbatim.
                    output.push_str("{{#each_discount_option}}");
                    at += 1;
                }
            },
            Token::IfOpen(expr) => match matching_close(&tokens[at + 1..], is_if_open, is_if_close)
            {
                Some(span) => {
                    let body = &tokens[at + 1..at + 1 + span];
                    if evaluate_condition(expr, context, index) {
                        render_tokens(body, context, index, output);
                    }
                    at += span + 2;
                }
                None => {
                    output.push_str("{{#if ");
                    output.push_str(expr);
                    output.push_str("}}");
                    at += 1;
                }
            },
            Token::EachClose => {
                output.push_str("{{/each_discount_option}}");
                at += 1;
            }
            Token::IfClose => {
                output.push_str("{{/if}}");
                at += 1;
            }
        }
    }
}

/// Offset of the close token matching the block opened just before
/// `tokens`, honoring nesting of the same block kind.
fn matching_close(
    tokens: &[Token],
    opens: fn(&Token) -> bool,
    closes: fn(&Token) -> bool,
) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, token) in tokens.iter().enumerate() {
        if opens(token) {
            depth += 1;
        } else if closes(token) {
            if depth == 0 {
                return Some(offset);
            }
            depth -= 1;
        }
    }
    None
}

fn is_each_open(token: &Token) -> bool {
    matches!(token, Token::EachOpen)
}

fn is_each_close(token: &Token) -> bool {
    matches!(token, Token::EachClose)
}

fn is_if_open(token: &Token) -> bool {
    matches!(token, Token::IfOpen(_))
}

fn is_if_close(token: &Token) -> bool {
    matches!(token, Token::IfClose)
}

/// Phase one of the two-phase substitution.
fn resolve_name(name: &str, index: Option<usize>) -> String {
    match index {
        Some(i) => name.replace(INDEX_TOKEN, &i.to_string()),
        None => name.to_string(),
    }
}

/// Either a bare truthy test or a single `name == 'literal'` equality; no
/// else branch and no further boolean operators exist in the grammar.
fn evaluate_condition(expr: &str, context: &RenderContext, index: Option<usize>) -> bool {
    if let Some((name, literal)) = split_equality(expr) {
        let value = context.get(&resolve_name(name.trim(), index)).to_string();
        return value == literal;
    }
    let value = context.get(&resolve_name(expr.trim(), index));
    !value.is_empty() && value != "false" && value != "0"
}

/// Splits `name == 'literal'`, returning the name and the unquoted literal.
fn split_equality(expr: &str) -> Option<(&str, &str)> {
    let (name, rhs) = expr.split_once("==")?;
    let rhs = rhs.trim();
    let literal = rhs.strip_prefix('\'')?.strip_suffix('\'')?;
    Some((name, literal))
}
