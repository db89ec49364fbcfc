//! Tokenizer for the block-template grammar.
//!
//! The grammar is deliberately tiny: scalar placeholders, one repeating
//! block, one conditional block. Anything between `{{` and `}}` that is not
//! one of those forms stays in the output verbatim, so stray brace pairs in
//! CSS or inline scripts cannot corrupt a storefront page.

/// One lexed unit of a block template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// Literal HTML/whitespace outside any directive.
    Text(String),
    /// `{{name}}`; the name may itself contain a nested `{{index}}` token.
    Placeholder(String),
    /// `{{#each_discount_option}}`
    EachOpen,
    /// `{{/each_discount_option}}`
    EachClose,
    /// `{{#if <expr>}}` with the raw expression text.
    IfOpen(String),
    /// `{{/if}}`
    IfClose,
}

const EACH_OPEN: &str = "#each_discount_option";
const EACH_CLOSE: &str = "/each_discount_option";
const IF_CLOSE: &str = "/if";
const IF_PREFIX: &str = "#if ";

/// Lexes template text into a flat token stream. Never fails: malformed or
/// unknown directive text is emitted as literal text.
pub fn tokenize(template: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        literal.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];

        match scan_balanced(after_open) {
            Some(end) => {
                let body = &after_open[..end];
                flush_literal(&mut tokens, &mut literal);
                tokens.push(classify(body));
                rest = &after_open[end + 2..];
            }
            None => {
                // Unterminated `{{`: keep it as literal text and move on.
                literal.push_str("{{");
                rest = after_open;
            }
        }
    }

    literal.push_str(rest);
    flush_literal(&mut tokens, &mut literal);
    tokens
}

/// Finds the byte offset of the `}}` closing the current directive,
/// skipping over nested `{{…}}` pairs such as the `{{index}}` token inside
/// `{{option_{{index}}_title}}`.
fn scan_balanced(body: &str) -> Option<usize> {
    let bytes = body.as_bytes();
    let mut depth = 0usize;
    let mut at = 0usize;

    while at + 1 < bytes.len() {
        if bytes[at] == b'{' && bytes[at + 1] == b'{' {
            depth += 1;
            at += 2;
        } else if bytes[at] == b'}' && bytes[at + 1] == b'}' {
            if depth == 0 {
                return Some(at);
            }
            depth -= 1;
            at += 2;
        } else {
            at += 1;
        }
    }
    None
}

fn classify(body: &str) -> Token {
    let trimmed = body.trim();
    if trimmed == EACH_OPEN {
        return Token::EachOpen;
    }
    if trimmed == EACH_CLOSE {
        return Token::EachClose;
    }
    if trimmed == IF_CLOSE {
        return Token::IfClose;
    }
    if let Some(expr) = trimmed.strip_prefix(IF_PREFIX) {
        let expr = expr.trim();
        if !expr.is_empty() {
            return Token::IfOpen(expr.to_string());
        }
    }
    if trimmed.starts_with('#') || trimmed.starts_with('/') || trimmed.is_empty() {
        // Unknown directive form: fail open, reconstruct the raw text.
        return Token::Text(format!("{{{{{body}}}}}"));
    }
    Token::Placeholder(trimmed.to_string())
}

fn flush_literal(tokens: &mut Vec<Token>, literal: &mut String) {
    if !literal.is_empty() {
        tokens.push(Token::Text(std::mem::take(literal)));
    }
}
