//! Where indentation goes inside a single token

use crate::cst::{GreenToken, Trivia, TriviaList};

/// Insert `indentation` into the leading trivia of `token`
///
/// The unit goes right after the last line boundary in the leading trivia,
/// which is the last end-of-line item or the last structured item (a directive
/// or doc comment ends its own line). With no boundary the unit is prepended.
/// Trailing trivia is left alone.
pub fn indent_token(token: &GreenToken, indentation: &TriviaList) -> GreenToken {
    if indentation.is_empty() {
        return token.clone();
    }

    let leading = token.leading_trivia();
    let split = insertion_point(leading);
    let indented = leading.with_inserted(split, indentation);
    debug_assert_eq!(
        indented.len(),
        leading.len() + indentation.len(),
        "indentation must not drop or duplicate trivia"
    );

    token.with_leading_trivia(indented)
}

/// Index in `leading` at which the indentation unit is inserted
pub(crate) fn insertion_point(leading: &TriviaList) -> usize {
    leading
        .last_position(|trivia: &Trivia| trivia.is_end_of_line() || trivia.has_structure())
        .map_or(0, |boundary| boundary + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::fixture::{self, WORD};

    fn unit() -> TriviaList {
        Trivia::whitespace("  ").into()
    }

    fn word(leading: Vec<Trivia>) -> GreenToken {
        GreenToken::new(WORD, "x").with_leading_trivia(leading.into())
    }

    #[test]
    fn test_prepends_without_boundary() {
        let token = word(vec![Trivia::whitespace(" ")]);
        let indented = indent_token(&token, &unit());

        assert_eq!(
            indented.leading_trivia(),
            &TriviaList::from(vec![Trivia::whitespace("  "), Trivia::whitespace(" ")])
        );
        assert_eq!(indented.to_string(), "   x");
    }

    #[test]
    fn test_inserts_after_last_line_break() {
        let token = word(vec![Trivia::end_of_line(), Trivia::whitespace("  ")]);
        let indented = indent_token(&token, &unit());

        assert_eq!(
            indented.leading_trivia(),
            &TriviaList::from(vec![
                Trivia::end_of_line(),
                Trivia::whitespace("  "),
                Trivia::whitespace("  "),
            ])
        );
        assert_eq!(insertion_point(token.leading_trivia()), 1);
    }

    #[test]
    fn test_empty_leading_trivia() {
        let token = word(Vec::new());
        let indented = indent_token(&token, &unit());
        assert_eq!(indented.leading_trivia(), &unit());
        assert_eq!(indented.to_string(), "  x");
    }

    #[test]
    fn test_last_boundary_wins() {
        let token = word(vec![
            Trivia::end_of_line(),
            Trivia::comment("// first"),
            Trivia::end_of_line(),
            Trivia::whitespace("\t"),
        ]);
        assert_eq!(insertion_point(token.leading_trivia()), 3);
        assert_eq!(indent_token(&token, &unit()).to_string(), "\n// first\n  \tx");
    }

    #[test]
    fn test_structured_trivia_is_a_boundary() {
        let directive = fixture::parse("#pragma once")
            .child(0)
            .and_then(|c| c.as_token())
            .and_then(|t| t.leading_trivia().get(0).cloned())
            .unwrap();
        assert!(directive.has_structure());
        let token = word(vec![Trivia::whitespace(" "), directive.clone()]);

        let indented = indent_token(&token, &unit());

        assert_eq!(
            indented.leading_trivia(),
            &TriviaList::from(vec![Trivia::whitespace(" "), directive, Trivia::whitespace("  ")])
        );
    }

    #[test]
    fn test_trailing_trivia_untouched() {
        let token = GreenToken::new(WORD, "x")
            .with_trailing_trivia(vec![Trivia::whitespace(" "), Trivia::end_of_line()].into());
        let indented = indent_token(&token, &unit());

        assert_eq!(indented.trailing_trivia(), token.trailing_trivia());
        assert_eq!(indented.text(), "x");
        assert_eq!(indented.kind(), WORD);
    }

    #[test]
    fn test_empty_unit_returns_same_token() {
        let token = word(vec![Trivia::end_of_line()]);
        assert!(indent_token(&token, &TriviaList::new()).ptr_eq(&token));
    }

    #[test]
    fn test_multi_item_unit() {
        let token = word(vec![Trivia::end_of_line()]);
        let unit = TriviaList::from(vec![Trivia::whitespace("\t"), Trivia::other("|")]);

        assert_eq!(indent_token(&token, &unit).to_string(), "\n\t|x");
    }
}
