//! Rewriting many tokens of an immutable tree
//!
//! Every rewrite of a token produces a new tree, so positions taken before the
//! first rewrite cannot be trusted afterwards. The targets are therefore
//! marked with annotations in a single pass, and each one is found again by
//! its mark in the current version of the tree before it is rewritten.

use crate::cst::{GreenNode, GreenToken, TokenPath};

/// Apply `rewrite` to every token in `targets`
///
/// Each target is rewritten once, even if listed more than once. The rewrite
/// sees the token without its mark, and the returned tree carries no marks.
/// Tokens that are not targets keep their identity, as do subtrees containing
/// no target.
///
/// A target that cannot be found any more, because it did not lead to a token
/// or because an earlier rewrite removed it, is skipped with a warning.
pub fn rewrite_tokens<F>(node: &GreenNode, targets: &[TokenPath], mut rewrite: F) -> GreenNode
where
    F: FnMut(&GreenToken) -> GreenToken,
{
    if targets.is_empty() {
        return node.clone();
    }

    let (mut current, marks) = node.annotate_tokens(targets);

    for (target, annotation) in &marks {
        let Some(located) = current.find_annotated_token(annotation) else {
            tracing::warn!(%target, %annotation, "marked token not found, skipping");
            continue;
        };
        tracing::trace!(
            %target,
            path = %located.path(),
            offset = u32::from(located.full_range().start()),
            "rewriting marked token"
        );

        let rewritten = rewrite(&located.green().without_annotation(annotation));
        match current.replace_token(located.path(), rewritten) {
            Some(replaced) => current = replaced,
            None => tracing::warn!(path = %located.path(), "located token could not be replaced"),
        }
    }

    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::fixture::parse;
    use crate::cst::{DocumentOrder, Step, Trivia, TriviaList};

    fn path_of(root: &GreenNode, text: &str) -> TokenPath {
        DocumentOrder::new(root)
            .iter()
            .find(|token| token.text() == text)
            .map(|token| token.path().clone())
            .unwrap()
    }

    fn bang(token: &GreenToken) -> GreenToken {
        token.with_trailing_trivia(token.trailing_trivia().with_pushed(Trivia::other("!")))
    }

    #[test]
    fn test_rewrites_only_targets() {
        let root = parse("a b c");
        let targets = [path_of(&root, "a"), path_of(&root, "c")];

        let rewritten = rewrite_tokens(&root, &targets, bang);

        assert_eq!(rewritten.to_string(), "a !b c!");
        assert!(!rewritten.contains_annotations());
        let untouched = rewritten.child(1).and_then(|c| c.as_token()).unwrap();
        let original = root.child(1).and_then(|c| c.as_token()).unwrap();
        assert!(untouched.ptr_eq(original));
    }

    #[test]
    fn test_no_targets_returns_same_tree() {
        let root = parse("a\nb");
        let rewritten = rewrite_tokens(&root, &[], bang);
        assert!(rewritten.ptr_eq(&root));
    }

    #[test]
    fn test_duplicate_targets_rewrite_once() {
        let root = parse("a b");
        let a = path_of(&root, "a");
        let b = path_of(&root, "b");
        let mut calls = 0;

        let rewritten = rewrite_tokens(&root, &[a.clone(), b, a], |token| {
            calls += 1;
            bang(token)
        });

        assert_eq!(calls, 2);
        assert_eq!(rewritten.to_string(), "a !b!");
    }

    #[test]
    fn test_rewrite_sees_unmarked_token() {
        let root = parse("a b");
        let targets = [path_of(&root, "a"), path_of(&root, "b")];

        rewrite_tokens(&root, &targets, |token| {
            assert!(token.annotations().is_empty());
            token.clone()
        });
    }

    #[test]
    fn test_invalid_target_is_skipped() {
        let root = parse("a b");
        let targets = [TokenPath::new(vec![Step::Child(9)]), path_of(&root, "b")];

        let rewritten = rewrite_tokens(&root, &targets, bang);

        assert_eq!(rewritten.to_string(), "a b!");
        assert!(!rewritten.contains_annotations());
    }

    #[test]
    fn test_targets_inside_structured_trivia() {
        let root = parse("a\n#if X\nb");
        let targets = [path_of(&root, "X"), path_of(&root, "b")];

        let rewritten = rewrite_tokens(&root, &targets, |token| {
            token.with_leading_trivia(Trivia::other(">").into())
        });

        // b loses its directive to the rewrite of b itself
        assert_eq!(rewritten.to_string(), "a\n>b");
        assert!(!rewritten.contains_annotations());
    }

    #[test]
    fn test_target_removed_by_earlier_rewrite() {
        let root = parse("a\n#if X\nb");
        let targets = [path_of(&root, "b"), path_of(&root, "X")];
        let mut seen = Vec::new();

        let rewritten = rewrite_tokens(&root, &targets, |token| {
            seen.push(token.text().to_string());
            token.with_leading_trivia(TriviaList::new())
        });

        assert_eq!(seen, ["b"]);
        assert_eq!(rewritten.to_string(), "a\nb");
        assert!(!rewritten.contains_annotations());
    }
}
