//! Token-level rewrites of immutable trees
//!
//! Replacing a token produces a new root: only the spine from the root down to
//! the token is rebuilt, every other subtree is shared with the original. The
//! annotation helpers let callers mark many tokens at once and find each of
//! them again in later versions of the tree.

use super::green::element_len;
use super::{
    Annotation, GreenElement, GreenNode, GreenToken, Step, SyntaxToken, TokenPath, Trivia,
    TriviaList,
};
use indexmap::IndexMap;
use rowan::{NodeOrToken, TextSize};

impl GreenNode {
    /// The token at `path`, if the path leads to one
    pub fn token_at(&self, path: &TokenPath) -> Option<GreenToken> {
        token_in_node(self, path.steps())
    }

    /// A new tree with the token at `path` replaced by `replacement`
    ///
    /// Returns `None` if `path` does not lead to a token.
    pub fn replace_token(&self, path: &TokenPath, replacement: GreenToken) -> Option<GreenNode> {
        replace_in_node(self, path.steps(), replacement)
    }

    /// Attach a fresh annotation to each token in `targets`, in one pass
    ///
    /// Returns the annotated tree together with the annotation of every
    /// target, in the order the targets were given. Duplicate targets share one
    /// annotation. Targets that do not lead to a token keep their annotation in
    /// the table but mark nothing.
    pub fn annotate_tokens(
        &self,
        targets: &[TokenPath],
    ) -> (GreenNode, IndexMap<TokenPath, Annotation>) {
        let mut marks: IndexMap<TokenPath, Annotation> = IndexMap::with_capacity(targets.len());
        for target in targets {
            marks.entry(target.clone()).or_insert_with(Annotation::new);
        }

        let mut annotator = Annotator {
            path: Vec::new(),
            marks: &marks,
        };
        let annotated = annotator.node(self);
        (annotated, marks)
    }

    /// Find the token carrying `annotation`
    ///
    /// Subtrees without annotations are skipped.
    pub fn find_annotated_token(&self, annotation: &Annotation) -> Option<SyntaxToken> {
        let mut finder = Finder {
            path: Vec::new(),
            annotation,
        };
        finder.node(self, TextSize::from(0))
    }
}

fn token_in_node(node: &GreenNode, steps: &[Step]) -> Option<GreenToken> {
    let (Step::Child(index), rest) = steps.split_first()? else {
        return None;
    };
    match node.child(*index)? {
        NodeOrToken::Node(inner) => token_in_node(inner, rest),
        NodeOrToken::Token(token) if rest.is_empty() => Some(token.clone()),
        NodeOrToken::Token(token) => {
            let (structure, rest) = structured_step(token, rest)?;
            token_in_node(structure, rest)
        }
    }
}

/// Resolve a `Leading`/`Trailing` step of `token` to the structured sub-tree
fn structured_step<'a>(
    token: &'a GreenToken,
    steps: &'a [Step],
) -> Option<(&'a GreenNode, &'a [Step])> {
    let (step, rest) = steps.split_first()?;
    let trivia = match step {
        Step::Leading(index) => token.leading_trivia().get(*index)?,
        Step::Trailing(index) => token.trailing_trivia().get(*index)?,
        Step::Child(_) => return None,
    };
    Some((trivia.structure()?, rest))
}

fn replace_in_node(node: &GreenNode, steps: &[Step], replacement: GreenToken) -> Option<GreenNode> {
    let (Step::Child(index), rest) = steps.split_first()? else {
        return None;
    };
    let new_child: GreenElement = match node.child(*index)? {
        NodeOrToken::Node(inner) => replace_in_node(inner, rest, replacement)?.into(),
        NodeOrToken::Token(_) if rest.is_empty() => replacement.into(),
        NodeOrToken::Token(token) => replace_in_token(token, rest, replacement)?.into(),
    };
    Some(node.replace_child(*index, new_child))
}

fn replace_in_token(
    token: &GreenToken,
    steps: &[Step],
    replacement: GreenToken,
) -> Option<GreenToken> {
    let (structure, rest) = structured_step(token, steps)?;
    let rewritten = Trivia::Structured(replace_in_node(structure, rest, replacement)?);
    match steps.first()? {
        Step::Leading(index) => {
            let leading = token.leading_trivia().with_replaced(*index, rewritten);
            Some(token.with_leading_trivia(leading))
        }
        Step::Trailing(index) => {
            let trailing = token.trailing_trivia().with_replaced(*index, rewritten);
            Some(token.with_trailing_trivia(trailing))
        }
        Step::Child(_) => None,
    }
}

struct Annotator<'a> {
    path: Vec<Step>,
    marks: &'a IndexMap<TokenPath, Annotation>,
}

impl Annotator<'_> {
    /// Rebuilds `node` only if something below it was annotated
    fn node(&mut self, node: &GreenNode) -> GreenNode {
        let mut rebuilt: Option<Vec<GreenElement>> = None;
        for (index, child) in node.children().iter().enumerate() {
            self.path.push(Step::Child(index));
            let changed: Option<GreenElement> = match child {
                NodeOrToken::Node(inner) => {
                    let annotated = self.node(inner);
                    (!annotated.ptr_eq(inner)).then(|| annotated.into())
                }
                NodeOrToken::Token(token) => {
                    let annotated = self.token(token);
                    (!annotated.ptr_eq(token)).then(|| annotated.into())
                }
            };
            self.path.pop();
            if let Some(changed) = changed {
                rebuilt.get_or_insert_with(|| node.children().to_vec())[index] = changed;
            }
        }
        match rebuilt {
            Some(children) => GreenNode::new(node.kind(), children),
            None => node.clone(),
        }
    }

    fn token(&mut self, token: &GreenToken) -> GreenToken {
        let mut annotated = token.clone();
        if let Some(leading) = self.trivia(token.leading_trivia(), Step::Leading) {
            annotated = annotated.with_leading_trivia(leading);
        }
        if let Some(trailing) = self.trivia(token.trailing_trivia(), Step::Trailing) {
            annotated = annotated.with_trailing_trivia(trailing);
        }
        if let Some(mark) = self.marks.get(self.path.as_slice()) {
            annotated = annotated.with_annotation(*mark);
        }
        annotated
    }

    fn trivia(&mut self, list: &TriviaList, step: fn(usize) -> Step) -> Option<TriviaList> {
        let mut rebuilt: Option<TriviaList> = None;
        for (index, trivia) in list.iter().enumerate() {
            let Some(structure) = trivia.structure() else {
                continue;
            };
            self.path.push(step(index));
            let annotated = self.node(structure);
            self.path.pop();
            if !annotated.ptr_eq(structure) {
                let base = rebuilt.take().unwrap_or_else(|| list.clone());
                rebuilt = Some(base.with_replaced(index, Trivia::Structured(annotated)));
            }
        }
        rebuilt
    }
}

struct Finder<'a> {
    path: Vec<Step>,
    annotation: &'a Annotation,
}

impl Finder<'_> {
    fn node(&mut self, node: &GreenNode, start: TextSize) -> Option<SyntaxToken> {
        if !node.contains_annotations() {
            return None;
        }
        let mut offset = start;
        for (index, child) in node.children().iter().enumerate() {
            self.path.push(Step::Child(index));
            let found = match child {
                NodeOrToken::Node(inner) => self.node(inner, offset),
                NodeOrToken::Token(token) => self.token(token, offset),
            };
            self.path.pop();
            if found.is_some() {
                return found;
            }
            offset += element_len(child);
        }
        None
    }

    fn token(&mut self, token: &GreenToken, start: TextSize) -> Option<SyntaxToken> {
        if !token.contains_annotations() {
            return None;
        }
        if token.has_annotation(self.annotation) {
            return Some(SyntaxToken::new(
                TokenPath::new(self.path.clone()),
                token.clone(),
                start,
            ));
        }
        let trailing_start = start + token.leading_trivia().text_len() + token.text_len();
        self.trivia(token.leading_trivia(), Step::Leading, start)
            .or_else(|| self.trivia(token.trailing_trivia(), Step::Trailing, trailing_start))
    }

    fn trivia(
        &mut self,
        list: &TriviaList,
        step: fn(usize) -> Step,
        start: TextSize,
    ) -> Option<SyntaxToken> {
        let mut offset = start;
        for (index, trivia) in list.iter().enumerate() {
            if let Some(structure) = trivia.structure() {
                self.path.push(step(index));
                let found = self.node(structure, offset);
                self.path.pop();
                if found.is_some() {
                    return found;
                }
            }
            offset += trivia.text_len();
        }
        None
    }
}
