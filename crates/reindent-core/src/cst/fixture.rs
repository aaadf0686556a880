//! Plain-text fixture trees
//!
//! A tiny lexer that turns plain text into a trivia-attached tree, for tests,
//! benchmarks and documentation. It is not a parser for any real language:
//!
//! - runs of non-blank characters are `WORD` tokens
//! - `{` and `}` are brace tokens; `{ ... }` is wrapped in a `BLOCK` node
//! - spaces and tabs are whitespace trivia, `\n`, `\r\n` and `\r` are
//!   end-of-line trivia, `//` starts a comment running to the end of the line
//! - a line whose first non-blank character is `#` is a directive: the whole
//!   line, line break included, becomes structured trivia holding a
//!   `DIRECTIVE` node
//!
//! Trailing trivia of a token runs up to and including the first line break.
//! Everything after it is leading trivia of the next token. Trivia left over
//! at the end of the input is attached to an empty `EOF` token.
//!
//! ```rust
//! use reindent_core::cst::fixture;
//!
//! let root = fixture::parse("f {\n  x // note\n}");
//! assert_eq!(root.to_string(), "f {\n  x // note\n}");
//! ```

use super::{GreenNode, TreeBuilder, Trivia};
use rowan::{NodeOrToken, SyntaxKind, TextSize};
use std::fmt;

pub const ROOT: SyntaxKind = SyntaxKind(0);
pub const BLOCK: SyntaxKind = SyntaxKind(1);
pub const DIRECTIVE: SyntaxKind = SyntaxKind(2);
pub const WORD: SyntaxKind = SyntaxKind(10);
pub const L_BRACE: SyntaxKind = SyntaxKind(11);
pub const R_BRACE: SyntaxKind = SyntaxKind(12);
pub const EOF: SyntaxKind = SyntaxKind(13);

/// Build a `ROOT` tree from `text`
pub fn parse(text: &str) -> GreenNode {
    let (tokens, leftover) = lex(text, true);
    build(ROOT, tokens, leftover)
}

/// Render a tree with kinds, ranges and trivia, one item per line
pub fn debug_tree(root: &GreenNode) -> String {
    DebugTree(root).to_string()
}

/// Display name of a fixture kind
pub fn kind_name(kind: SyntaxKind) -> String {
    match kind {
        ROOT => "ROOT".to_string(),
        BLOCK => "BLOCK".to_string(),
        DIRECTIVE => "DIRECTIVE".to_string(),
        WORD => "WORD".to_string(),
        L_BRACE => "L_BRACE".to_string(),
        R_BRACE => "R_BRACE".to_string(),
        EOF => "EOF".to_string(),
        SyntaxKind(raw) => format!("KIND_{raw}"),
    }
}

struct LexedToken {
    kind: SyntaxKind,
    text: String,
    leading: Vec<Trivia>,
    trailing: Vec<Trivia>,
}

fn lex(text: &str, directives: bool) -> (Vec<LexedToken>, Vec<Trivia>) {
    let mut tokens: Vec<LexedToken> = Vec::new();
    let mut pending = Vec::new();
    let mut trailing = false;
    let mut at_line_start = true;
    let mut rest = text;

    while !rest.is_empty() {
        if let Some(line_break) = line_break(rest) {
            push(&mut tokens, &mut pending, trailing, Trivia::end_of_line_with(line_break));
            trailing = false;
            at_line_start = true;
            rest = &rest[line_break.len()..];
            continue;
        }

        let blank = rest.len() - rest.trim_start_matches([' ', '\t']).len();
        if blank > 0 {
            push(&mut tokens, &mut pending, trailing, Trivia::whitespace(&rest[..blank]));
            rest = &rest[blank..];
            continue;
        }

        if rest.starts_with("//") {
            let end = rest.find(['\r', '\n']).unwrap_or(rest.len());
            push(&mut tokens, &mut pending, trailing, Trivia::comment(&rest[..end]));
            at_line_start = false;
            rest = &rest[end..];
            continue;
        }

        if directives && at_line_start && rest.starts_with('#') {
            let end = rest.find('\n').map_or(rest.len(), |i| i + 1);
            let (directive_tokens, leftover) = lex(&rest[..end], false);
            push(
                &mut tokens,
                &mut pending,
                false,
                Trivia::structured(build(DIRECTIVE, directive_tokens, leftover)),
            );
            at_line_start = rest[..end].ends_with('\n');
            rest = &rest[end..];
            continue;
        }

        let (kind, len) = match rest.as_bytes()[0] {
            b'{' => (L_BRACE, 1),
            b'}' => (R_BRACE, 1),
            _ => (WORD, word_len(rest)),
        };
        tokens.push(LexedToken {
            kind,
            text: rest[..len].to_string(),
            leading: std::mem::take(&mut pending),
            trailing: Vec::new(),
        });
        trailing = true;
        at_line_start = false;
        rest = &rest[len..];
    }

    (tokens, pending)
}

fn push(tokens: &mut [LexedToken], pending: &mut Vec<Trivia>, trailing: bool, trivia: Trivia) {
    match tokens.last_mut() {
        Some(last) if trailing => last.trailing.push(trivia),
        _ => pending.push(trivia),
    }
}

fn line_break(text: &str) -> Option<&str> {
    ["\r\n", "\n", "\r"]
        .into_iter()
        .find(|candidate| text.starts_with(candidate))
}

fn word_len(text: &str) -> usize {
    let end = text
        .find([' ', '\t', '\r', '\n', '{', '}'])
        .unwrap_or(text.len());
    match text[..end].find("//") {
        Some(comment) if comment > 0 => comment,
        _ => end,
    }
}

fn build(kind: SyntaxKind, tokens: Vec<LexedToken>, leftover: Vec<Trivia>) -> GreenNode {
    let mut builder = TreeBuilder::new();
    builder.start_node(kind);
    let mut depth = 0usize;

    for token in tokens {
        if token.kind == L_BRACE {
            builder.start_node(BLOCK);
            depth += 1;
        }
        for trivia in token.leading {
            builder.leading_trivia(trivia);
        }
        builder.token(token.kind, token.text);
        for trivia in token.trailing {
            builder.trailing_trivia(trivia);
        }
        if token.kind == R_BRACE && depth > 0 {
            builder.finish_node();
            depth -= 1;
        }
    }
    for _ in 0..depth {
        builder.finish_node();
    }

    if !leftover.is_empty() {
        for trivia in leftover {
            builder.leading_trivia(trivia);
        }
        builder.token(EOF, "");
    }

    builder.finish_node();
    builder.finish()
}

struct DebugTree<'a>(&'a GreenNode);

impl fmt::Display for DebugTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self.0, 0, TextSize::from(0))
    }
}

fn write_node(
    f: &mut fmt::Formatter<'_>,
    node: &GreenNode,
    depth: usize,
    start: TextSize,
) -> fmt::Result {
    writeln!(
        f,
        "{:indent$}{}@{}",
        "",
        kind_name(node.kind()),
        range(start, node.text_len()),
        indent = depth * 2
    )?;
    let mut offset = start;
    for child in node.children() {
        match child {
            NodeOrToken::Node(inner) => {
                write_node(f, inner, depth + 1, offset)?;
                offset += inner.text_len();
            }
            NodeOrToken::Token(token) => {
                writeln!(
                    f,
                    "{:indent$}{}@{} {:?}",
                    "",
                    kind_name(token.kind()),
                    range(offset, token.full_len()),
                    token.text(),
                    indent = (depth + 1) * 2
                )?;
                let leading = token.leading_trivia();
                let trailing = token.trailing_trivia();
                let trailing_start = offset + leading.text_len() + token.text_len();
                write_trivia(f, "leading", leading.as_slice(), depth + 2, offset)?;
                write_trivia(f, "trailing", trailing.as_slice(), depth + 2, trailing_start)?;
                offset += token.full_len();
            }
        }
    }
    Ok(())
}

fn write_trivia(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    trivia: &[Trivia],
    depth: usize,
    start: TextSize,
) -> fmt::Result {
    let mut offset = start;
    for item in trivia {
        write!(f, "{:indent$}{label} ", "", indent = depth * 2)?;
        match item {
            Trivia::Whitespace(text) => writeln!(f, "ws({text:?})")?,
            Trivia::EndOfLine(text) => writeln!(f, "eol({text:?})")?,
            Trivia::Comment(text) => writeln!(f, "comment({text:?})")?,
            Trivia::Other(text) => writeln!(f, "other({text:?})")?,
            Trivia::Structured(node) => {
                writeln!(f, "structured")?;
                write_node(f, node, depth + 1, offset)?;
            }
        }
        offset += item.text_len();
    }
    Ok(())
}

fn range(start: TextSize, len: TextSize) -> String {
    format!("{}..{}", u32::from(start), u32::from(start + len))
}
