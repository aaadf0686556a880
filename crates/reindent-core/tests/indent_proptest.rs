//! Property-based tests for indentation over generated documents
//!
//! Documents are built line by line from code lines, directive lines, blank
//! lines, whitespace-only lines and comment-only lines, so the expected result
//! of indenting them can be computed from the lines alone.

use proptest::prelude::*;
use reindent_core::cst::fixture::parse;
use reindent_core::cst::{Trivia, TriviaList};
use reindent_core::{indent_node, line_start_tokens};

fn word_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

fn code_line_strategy() -> impl Strategy<Value = String> {
    (
        "[ \t]{0,3}",
        prop::collection::vec(word_strategy(), 1..4),
        prop::option::of("// [a-z]{0,5}"),
    )
        .prop_map(|(indent, words, comment)| match comment {
            Some(comment) => format!("{indent}{} {comment}", words.join(" ")),
            None => format!("{indent}{}", words.join(" ")),
        })
}

fn line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // Code
        4 => code_line_strategy(),
        // Directives
        1 => ("[ ]{0,2}", word_strategy(), word_strategy())
            .prop_map(|(indent, name, arg)| format!("{indent}#{name} {arg}")),
        // Blank and whitespace-only lines
        1 => "[ \t]{0,3}",
        // Comment-only lines
        1 => "[ ]{0,2}// [a-z ]{0,8}",
    ]
}

fn document_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(line_strategy(), 0..16)
}

/// A line holds code when it has anything but whitespace and a comment
fn has_code(line: &str) -> bool {
    let content = line.trim_start();
    !content.is_empty() && !content.starts_with("//")
}

/// Which lines begin with a line start token
///
/// Every code line does. Lines after the last code line live in the leading
/// trivia of the zero-width end-of-file token, which starts the final line
/// once that trivia holds a line break of its own, i.e. when at least two
/// lines follow the last code line.
fn indented_lines(lines: &[String]) -> Vec<bool> {
    let mut indented: Vec<bool> = lines.iter().map(|line| has_code(line)).collect();
    let after_code = match indented.iter().rposition(|&code| code) {
        Some(last) => lines.len() - last - 1,
        None => lines.len(),
    };
    if after_code >= 2 {
        if let Some(last) = indented.last_mut() {
            *last = true;
        }
    }
    indented
}

fn indent_lines(lines: &[String], prefix: &str) -> String {
    lines
        .iter()
        .zip(indented_lines(lines))
        .map(|(line, indented)| {
            if indented {
                format!("{prefix}{line}")
            } else {
                line.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn unit(text: &str) -> TriviaList {
    Trivia::whitespace(text).into()
}

proptest! {
    #[test]
    fn test_parse_is_lossless(lines in document_strategy()) {
        let source = lines.join("\n");
        prop_assert_eq!(parse(&source).to_string(), source);
    }

    #[test]
    fn test_line_starts_get_one_unit(lines in document_strategy()) {
        let source = lines.join("\n");
        let indented = indent_node(&parse(&source), &unit("  "));

        prop_assert_eq!(indented.to_string(), indent_lines(&lines, "  "));
        prop_assert!(!indented.contains_annotations());
    }

    #[test]
    fn test_one_line_start_per_indented_line(lines in document_strategy()) {
        let source = lines.join("\n");
        let starts = line_start_tokens(&parse(&source));
        let expected = indented_lines(&lines).into_iter().filter(|&indented| indented).count();

        prop_assert_eq!(starts.len(), expected);
    }

    #[test]
    fn test_empty_unit_is_identity(lines in document_strategy()) {
        let source = lines.join("\n");
        let root = parse(&source);
        let same = indent_node(&root, &TriviaList::new());

        prop_assert!(same.ptr_eq(&root));
        prop_assert_eq!(same.to_string(), source);
    }

    #[test]
    fn test_line_count_is_preserved(lines in document_strategy(), width in 1usize..5) {
        let source = lines.join("\n");
        let indented = indent_node(&parse(&source), &unit(&" ".repeat(width))).to_string();

        prop_assert_eq!(indented.matches('\n').count(), source.matches('\n').count());
        for (new, old) in indented.split('\n').zip(source.split('\n')) {
            prop_assert!(new.ends_with(old), "{:?} does not end with {:?}", new, old);
        }
    }

    #[test]
    fn test_indentation_accumulates(lines in document_strategy()) {
        let source = lines.join("\n");
        let once = indent_node(&parse(&source), &unit("\t"));
        let twice = indent_node(&once, &unit("\t"));

        prop_assert_eq!(twice.to_string(), indent_lines(&lines, "\t\t"));
    }
}
