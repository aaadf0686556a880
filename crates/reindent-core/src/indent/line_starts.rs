//! Finding the tokens that begin a source line
//!
//! Every end-of-line trivia item below a node announces a new line. A line
//! break in a token's leading trivia means that token starts the next line; a
//! line break in trailing trivia hands the line over to the next token in
//! document order. Tokens inside structured trivia take part in both cases, so
//! the lines of a directive or doc comment are found like any other line.

use crate::cst::{DocumentOrder, GreenNode, SyntaxToken};
use std::collections::BTreeSet;

/// Tokens of `node` that begin a line, in document order
///
/// The first token of `node` is always included, even if no line break
/// precedes it. A run of blank lines resolves to the single token that ends
/// it, and each token appears once.
///
/// A token with a line break in its own leading trivia begins a line even when
/// it has no text, as an end-of-file token holding trailing blank lines does.
/// Zero-width tokens are skipped only when looking for the first token and for
/// the token after a trailing line break.
pub fn line_start_tokens(node: &GreenNode) -> Vec<SyntaxToken> {
    let order = DocumentOrder::new(node);
    let mut starts = BTreeSet::new();

    starts.extend(first_with_text(&order, 0));
    for line_break in order.end_of_line_trivia() {
        let path = line_break.token().path();
        if line_break.is_in_leading_trivia() {
            starts.extend(order.position(path));
            continue;
        }
        let next = order
            .next_after(path)
            .and_then(|next| order.position(next.path()));
        starts.extend(next.and_then(|next| first_with_text(&order, next)));
    }

    tracing::debug!(
        tokens = order.len(),
        line_starts = starts.len(),
        "located line start tokens"
    );

    starts
        .into_iter()
        .filter_map(|position| order.get(position).cloned())
        .collect()
}

fn first_with_text(order: &DocumentOrder, from: usize) -> Option<usize> {
    (from..order.len()).find(|&position| {
        order
            .get(position)
            .is_some_and(|token| !token.text().is_empty())
    })
}
