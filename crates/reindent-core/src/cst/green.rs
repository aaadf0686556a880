//! Immutable tree storage
//!
//! Green nodes and tokens are position independent and shared through `Arc`.
//! Cloning is cheap, and every "edit" builds a new value that reuses all
//! untouched children by reference.
//!
//! Unlike a plain rowan green tree, trivia is not stored as sibling tokens:
//! each [`GreenToken`] owns its leading and trailing [`TriviaList`], and may
//! carry [`Annotation`]s used to find it again after a rewrite.

use super::{Annotation, TriviaList};
use rowan::{NodeOrToken, SyntaxKind, TextSize};
use std::fmt;
use std::sync::Arc;

/// A child of a green node
pub type GreenElement = NodeOrToken<GreenNode, GreenToken>;

#[derive(Debug, PartialEq, Eq)]
struct GreenTokenData {
    kind: SyntaxKind,
    text: String,
    leading: TriviaList,
    trailing: TriviaList,
    annotations: Vec<Annotation>,
    /// Own annotations or annotations inside structured trivia
    contains_annotations: bool,
}

/// Leaf of the tree: token text plus its attached trivia
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreenToken(Arc<GreenTokenData>);

impl GreenToken {
    /// Create a token without trivia
    pub fn new(kind: SyntaxKind, text: impl Into<String>) -> Self {
        Self::build(
            kind,
            text.into(),
            TriviaList::new(),
            TriviaList::new(),
            Vec::new(),
        )
    }

    fn build(
        kind: SyntaxKind,
        text: String,
        leading: TriviaList,
        trailing: TriviaList,
        annotations: Vec<Annotation>,
    ) -> Self {
        let contains_annotations = !annotations.is_empty()
            || leading.contains_annotations()
            || trailing.contains_annotations();
        Self(Arc::new(GreenTokenData {
            kind,
            text,
            leading,
            trailing,
            annotations,
            contains_annotations,
        }))
    }

    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    /// Text of the token itself, without trivia
    pub fn text(&self) -> &str {
        &self.0.text
    }

    pub fn leading_trivia(&self) -> &TriviaList {
        &self.0.leading
    }

    pub fn trailing_trivia(&self) -> &TriviaList {
        &self.0.trailing
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.0.annotations
    }

    /// Length of the token text, without trivia
    pub fn text_len(&self) -> TextSize {
        TextSize::of(self.0.text.as_str())
    }

    /// Length of the token text including leading and trailing trivia
    pub fn full_len(&self) -> TextSize {
        self.0.leading.text_len() + self.text_len() + self.0.trailing.text_len()
    }

    /// A copy of this token with different leading trivia
    pub fn with_leading_trivia(&self, leading: TriviaList) -> Self {
        Self::build(
            self.0.kind,
            self.0.text.clone(),
            leading,
            self.0.trailing.clone(),
            self.0.annotations.clone(),
        )
    }

    /// A copy of this token with different trailing trivia
    pub fn with_trailing_trivia(&self, trailing: TriviaList) -> Self {
        Self::build(
            self.0.kind,
            self.0.text.clone(),
            self.0.leading.clone(),
            trailing,
            self.0.annotations.clone(),
        )
    }

    /// A copy of this token carrying `annotation`
    pub fn with_annotation(&self, annotation: Annotation) -> Self {
        if self.has_annotation(&annotation) {
            return self.clone();
        }
        let mut annotations = self.0.annotations.clone();
        annotations.push(annotation);
        Self::build(
            self.0.kind,
            self.0.text.clone(),
            self.0.leading.clone(),
            self.0.trailing.clone(),
            annotations,
        )
    }

    /// A copy of this token without `annotation`
    pub fn without_annotation(&self, annotation: &Annotation) -> Self {
        if !self.has_annotation(annotation) {
            return self.clone();
        }
        let annotations = self
            .0
            .annotations
            .iter()
            .filter(|a| *a != annotation)
            .copied()
            .collect();
        Self::build(
            self.0.kind,
            self.0.text.clone(),
            self.0.leading.clone(),
            self.0.trailing.clone(),
            annotations,
        )
    }

    pub fn has_annotation(&self, annotation: &Annotation) -> bool {
        self.0.annotations.contains(annotation)
    }

    /// Whether this token or a token inside its structured trivia is annotated
    pub fn contains_annotations(&self) -> bool {
        self.0.contains_annotations
    }

    /// Whether both handles point at the same allocation
    pub fn ptr_eq(&self, other: &GreenToken) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.leading, f)?;
        f.write_str(&self.0.text)?;
        fmt::Display::fmt(&self.0.trailing, f)
    }
}

#[derive(Debug, PartialEq, Eq)]
struct GreenNodeData {
    kind: SyntaxKind,
    text_len: TextSize,
    children: Vec<GreenElement>,
    contains_annotations: bool,
}

/// Interior node of the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreenNode(Arc<GreenNodeData>);

impl GreenNode {
    /// Create a node from its children
    pub fn new(kind: SyntaxKind, children: Vec<GreenElement>) -> Self {
        let text_len = children.iter().map(element_len).sum();
        let contains_annotations = children.iter().any(|child| match child {
            NodeOrToken::Node(node) => node.contains_annotations(),
            NodeOrToken::Token(token) => token.contains_annotations(),
        });
        Self(Arc::new(GreenNodeData {
            kind,
            text_len,
            children,
            contains_annotations,
        }))
    }

    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    /// Length of the full text covered by this node, trivia included
    pub fn text_len(&self) -> TextSize {
        self.0.text_len
    }

    pub fn children(&self) -> &[GreenElement] {
        &self.0.children
    }

    pub fn child(&self, index: usize) -> Option<&GreenElement> {
        self.0.children.get(index)
    }

    /// A copy of this node with the child at `index` replaced
    ///
    /// All other children are shared with `self`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn replace_child(&self, index: usize, element: impl Into<GreenElement>) -> Self {
        let mut children = self.0.children.clone();
        children[index] = element.into();
        Self::new(self.0.kind, children)
    }

    /// Whether any token below this node carries an annotation
    pub fn contains_annotations(&self) -> bool {
        self.0.contains_annotations
    }

    /// Whether both handles point at the same allocation
    pub fn ptr_eq(&self, other: &GreenNode) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for child in &self.0.children {
            match child {
                NodeOrToken::Node(node) => fmt::Display::fmt(node, f)?,
                NodeOrToken::Token(token) => fmt::Display::fmt(token, f)?,
            }
        }
        Ok(())
    }
}

impl From<GreenNode> for GreenElement {
    fn from(node: GreenNode) -> Self {
        NodeOrToken::Node(node)
    }
}

impl From<GreenToken> for GreenElement {
    fn from(token: GreenToken) -> Self {
        NodeOrToken::Token(token)
    }
}

/// Full printed length of a child element
pub(crate) fn element_len(element: &GreenElement) -> TextSize {
    match element {
        NodeOrToken::Node(node) => node.text_len(),
        NodeOrToken::Token(token) => token.full_len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::Trivia;

    const WORD: SyntaxKind = SyntaxKind(10);
    const ROOT: SyntaxKind = SyntaxKind(0);

    fn word(text: &str) -> GreenToken {
        GreenToken::new(WORD, text)
    }

    #[test]
    fn test_token_text_and_lengths() {
        let token = word("value")
            .with_leading_trivia(vec![Trivia::end_of_line(), Trivia::whitespace("  ")].into())
            .with_trailing_trivia(vec![Trivia::whitespace(" "), Trivia::comment("// x")].into());

        assert_eq!(token.text(), "value");
        assert_eq!(token.to_string(), "\n  value // x");
        assert_eq!(token.text_len(), TextSize::from(5));
        assert_eq!(token.full_len(), TextSize::from(13));
    }

    #[test]
    fn test_node_text_len_sums_children() {
        let inner = GreenNode::new(
            ROOT,
            vec![word("b").with_leading_trivia(Trivia::whitespace(" ").into()).into()],
        );
        let node = GreenNode::new(ROOT, vec![word("a").into(), inner.into()]);

        assert_eq!(node.to_string(), "a b");
        assert_eq!(node.text_len(), TextSize::from(3));
        assert_eq!(node.children().len(), 2);
    }

    #[test]
    fn test_replace_child_shares_siblings() {
        let left = GreenNode::new(ROOT, vec![word("left").into()]);
        let node = GreenNode::new(ROOT, vec![left.clone().into(), word("right").into()]);

        let replaced = node.replace_child(1, word("other"));

        assert_eq!(replaced.to_string(), "leftother");
        assert_eq!(node.to_string(), "leftright");
        let shared = replaced.child(0).and_then(|c| c.as_node()).unwrap();
        assert!(shared.ptr_eq(&left));
    }

    #[test]
    fn test_annotations_propagate_to_ancestors() {
        let mark = Annotation::new();
        let marked = word("a").with_annotation(mark);
        assert!(marked.has_annotation(&mark));
        assert!(marked.contains_annotations());

        let directive = GreenNode::new(ROOT, vec![marked.into()]);
        let owner = word("b").with_leading_trivia(Trivia::structured(directive).into());
        assert!(!owner.has_annotation(&mark));
        assert!(owner.contains_annotations());

        let root = GreenNode::new(ROOT, vec![owner.into(), word("c").into()]);
        assert!(root.contains_annotations());
    }

    #[test]
    fn test_without_annotation() {
        let mark = Annotation::new();
        let other = Annotation::new();
        let token = word("a").with_annotation(mark).with_annotation(other);
        assert_eq!(token.annotations(), &[mark, other]);

        let stripped = token.without_annotation(&mark);
        assert_eq!(stripped.annotations(), &[other]);
        assert!(stripped.without_annotation(&other).annotations().is_empty());
        assert!(!stripped.without_annotation(&other).contains_annotations());

        let untouched = word("b");
        assert!(untouched.without_annotation(&mark).ptr_eq(&untouched));
    }
}
