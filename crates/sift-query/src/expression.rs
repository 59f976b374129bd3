//! Parsed query expression tree.
//!
//! All expression nodes of one parse live in a single arena owned by
//! [`QueryTree`]. Nodes refer to their children and their parent by
//! [`ExpressionId`], so the parent back-reference never owns anything.
//! [`QueryExpression`] is a borrowed view of one node.

use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::phrase::{Mode, QueryPhrase};

/// Index of an expression node inside its [`QueryTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExpressionId(usize);

impl ExpressionId {
    /// The root node of every tree.
    pub const ROOT: Self = Self(0);
}

/// Storage for one expression node.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    /// Combinator under which this node was inserted into its parent.
    mode: Mode,
    /// Parent node; `None` only for the root.
    parent: Option<ExpressionId>,
    /// Phrases in document order.
    phrases: Vec<QueryPhrase>,
    /// Child expressions in document order.
    children: Vec<ExpressionId>,
}

impl Node {
    /// Creates an empty node.
    fn new(mode: Mode, parent: Option<ExpressionId>) -> Self {
        Self {
            mode,
            parent,
            phrases: Vec::new(),
            children: Vec::new(),
        }
    }
}

/// The result of parsing one query: an owned tree of expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTree {
    /// The exact string that was parsed.
    original_query: String,
    /// Arena of nodes; index 0 is the root.
    nodes: Vec<Node>,
}

impl QueryTree {
    /// Creates a tree holding only an empty root.
    pub(crate) fn new(original_query: &str) -> Self {
        Self {
            original_query: original_query.to_string(),
            nodes: vec![Node::new(Mode::Default, None)],
        }
    }

    /// Returns the root expression.
    pub fn root(&self) -> QueryExpression<'_> {
        QueryExpression {
            tree: self,
            id: ExpressionId::ROOT,
        }
    }

    /// Returns the string this tree was parsed from.
    pub fn original_query(&self) -> &str {
        &self.original_query
    }

    /// Returns the number of expression nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the query produced no phrases and no groups.
    pub fn is_empty(&self) -> bool {
        self.root().is_empty()
    }

    /// Returns true if the query contains at least one non-excluded phrase.
    pub fn is_valid(&self) -> bool {
        self.root().is_valid()
    }

    /// Collects the words of every non-excluded phrase in the tree.
    pub fn collect_words(&self) -> Vec<String> {
        self.root().collect_words()
    }

    /// Collects the words of every excluded phrase in the tree.
    pub fn collect_excluded_words(&self) -> Vec<String> {
        self.root().collect_excluded_words()
    }

    /// Appends a `Default`-mode phrase to `id`.
    pub(crate) fn add_default_phrase(&mut self, id: ExpressionId, text: &str) {
        self.push_phrase(id, text, Mode::Default);
    }

    /// Appends an `Or`-mode phrase to `id`.
    pub(crate) fn add_or_phrase(&mut self, id: ExpressionId, text: &str) {
        self.push_phrase(id, text, Mode::Or);
    }

    /// Appends an `And`-mode phrase to `id`.
    pub(crate) fn add_and_phrase(&mut self, id: ExpressionId, text: &str) {
        self.push_phrase(id, text, Mode::And);
    }

    /// Appends an `Exclude`-mode phrase to `id`.
    pub(crate) fn add_exclusion_phrase(&mut self, id: ExpressionId, text: &str) {
        self.push_phrase(id, text, Mode::Exclude);
    }

    /// Appends a new empty child expression to `parent` and returns its id.
    pub(crate) fn add_subexpression(&mut self, parent: ExpressionId, mode: Mode) -> ExpressionId {
        let id = ExpressionId(self.nodes.len());
        self.nodes.push(Node::new(mode, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Returns the parent of `id`, or `None` for the root.
    pub(crate) fn parent_of(&self, id: ExpressionId) -> Option<ExpressionId> {
        self.nodes[id.0].parent
    }

    /// Builds and appends a phrase. Phrases that trim to nothing are dropped.
    fn push_phrase(&mut self, id: ExpressionId, text: &str, mode: Mode) {
        let phrase = QueryPhrase::new(text, mode);
        if phrase.text().is_empty() {
            return;
        }
        self.nodes[id.0].phrases.push(phrase);
    }

    /// Returns the node behind `id`.
    fn node(&self, id: ExpressionId) -> &Node {
        &self.nodes[id.0]
    }
}

impl fmt::Display for QueryTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Query({:?})", self.original_query)?;
        self.root().fmt_contents(f, 1)
    }
}

impl Serialize for QueryTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root().serialize(serializer)
    }
}

/// A borrowed view of one expression node.
#[derive(Clone, Copy)]
pub struct QueryExpression<'a> {
    /// Owning tree.
    tree: &'a QueryTree,
    /// Node inside `tree`.
    id: ExpressionId,
}

impl<'a> QueryExpression<'a> {
    /// Returns this node's id.
    pub fn id(&self) -> ExpressionId {
        self.id
    }

    /// Returns the original query string on the root, `None` elsewhere.
    pub fn original_query(&self) -> Option<&'a str> {
        self.is_root().then_some(self.tree.original_query.as_str())
    }

    /// Returns the combinator this node was inserted under.
    ///
    /// Meaningless on the root, which always reports `Default`.
    pub fn mode(&self) -> Mode {
        self.node().mode
    }

    /// Returns the phrases of this node in document order.
    pub fn phrases(&self) -> &'a [QueryPhrase] {
        &self.node().phrases
    }

    /// Returns the child expressions in document order.
    pub fn children(&self) -> impl ExactSizeIterator<Item = Self> + use<'a> {
        let tree = self.tree;
        self.node()
            .children
            .iter()
            .map(move |&id| Self { tree, id })
    }

    /// Returns the enclosing expression, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.node().parent.map(|id| Self {
            tree: self.tree,
            id,
        })
    }

    /// Returns true for the root node.
    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }

    /// Returns true if the node holds no phrases and no children.
    pub fn is_empty(&self) -> bool {
        let node = self.node();
        node.phrases.is_empty() && node.children.is_empty()
    }

    /// Returns the nesting depth; the root is at depth 0.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.node().parent;
        while let Some(id) = current {
            depth += 1;
            current = self.tree.node(id).parent;
        }
        depth
    }

    /// Returns true if this node or any descendant has a non-excluded phrase.
    pub fn is_valid(&self) -> bool {
        self.phrases().iter().any(QueryPhrase::is_included)
            || self.children().any(|child| child.is_valid())
    }

    /// Collects words of non-excluded phrases: this node's phrases first, then
    /// each child's words in order.
    ///
    /// Children are always descended into, whatever their own mode.
    pub fn collect_words(&self) -> Vec<String> {
        let mut words = Vec::new();
        self.collect_into(&mut words, true);
        words
    }

    /// Collects words of excluded phrases, in the same order as
    /// [`collect_words`](Self::collect_words).
    pub fn collect_excluded_words(&self) -> Vec<String> {
        let mut words = Vec::new();
        self.collect_into(&mut words, false);
        words
    }

    /// Appends words of phrases whose inclusion matches `included`.
    fn collect_into(&self, out: &mut Vec<String>, included: bool) {
        for phrase in self.phrases() {
            if phrase.is_included() == included {
                out.extend(phrase.words().into_iter().map(String::from));
            }
        }
        for child in self.children() {
            child.collect_into(out, included);
        }
    }

    /// Returns the node behind this view.
    fn node(&self) -> &'a Node {
        self.tree.node(self.id)
    }

    /// Writes phrases and children, one per line, at `indent`.
    fn fmt_contents(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        for phrase in self.phrases() {
            writeln!(f, "{prefix}Phrase({}, {:?})", phrase.mode(), phrase.text())?;
        }
        for child in self.children() {
            writeln!(f, "{prefix}Group({})", child.mode())?;
            child.fmt_contents(f, indent + 1)?;
        }
        Ok(())
    }
}

/// Structural equality: mode, phrases and children. Ids and the original
/// query string are not compared.
impl PartialEq for QueryExpression<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.mode() == other.mode()
            && self.phrases() == other.phrases()
            && self.children().len() == other.children().len()
            && self.children().zip(other.children()).all(|(a, b)| a == b)
    }
}

impl fmt::Debug for QueryExpression<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let children: Vec<Self> = self.children().collect();
        f.debug_struct("QueryExpression")
            .field("mode", &self.mode())
            .field("phrases", &self.phrases())
            .field("children", &children)
            .finish()
    }
}

impl Serialize for QueryExpression<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let children: Vec<Self> = self.children().collect();
        let original_query = self.original_query();
        let fields = if original_query.is_some() { 4 } else { 3 };

        let mut state = serializer.serialize_struct("QueryExpression", fields)?;
        if let Some(query) = original_query {
            state.serialize_field("original_query", query)?;
        }
        state.serialize_field("mode", &self.mode())?;
        state.serialize_field("phrases", self.phrases())?;
        state.serialize_field("children", &children)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds `a -b (c or d)` by hand.
    fn sample() -> QueryTree {
        let mut tree = QueryTree::new("a -b (c or d)");
        tree.add_default_phrase(ExpressionId::ROOT, "a");
        tree.add_exclusion_phrase(ExpressionId::ROOT, "b");
        let group = tree.add_subexpression(ExpressionId::ROOT, Mode::Default);
        tree.add_default_phrase(group, "c");
        tree.add_or_phrase(group, "d");
        tree
    }

    #[test]
    fn root_carries_original_query() {
        let tree = sample();
        assert_eq!(tree.root().original_query(), Some("a -b (c or d)"));
        assert!(tree.root().is_root());
        let child = tree.root().children().next().unwrap();
        assert_eq!(child.original_query(), None);
        assert!(!child.is_root());
    }

    #[test]
    fn parent_links_point_upward() {
        let tree = sample();
        let child = tree.root().children().next().unwrap();
        assert_eq!(child.parent().unwrap().id(), ExpressionId::ROOT);
        assert!(tree.root().parent().is_none());
        assert_eq!(child.depth(), 1);
        assert_eq!(tree.root().depth(), 0);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let tree = sample();
        let texts: Vec<&str> = tree.root().phrases().iter().map(QueryPhrase::text).collect();
        assert_eq!(texts, vec!["a", "b"]);
        let modes: Vec<Mode> = tree.root().phrases().iter().map(QueryPhrase::mode).collect();
        assert_eq!(modes, vec![Mode::Default, Mode::Exclude]);
    }

    #[test]
    fn collects_words_phrases_then_children() {
        let tree = sample();
        assert_eq!(tree.collect_words(), vec!["a", "c", "d"]);
        assert_eq!(tree.collect_excluded_words(), vec!["b"]);
    }

    #[test]
    fn only_excluded_is_invalid() {
        let mut tree = QueryTree::new("-a (-b)");
        tree.add_exclusion_phrase(ExpressionId::ROOT, "a");
        let group = tree.add_subexpression(ExpressionId::ROOT, Mode::Default);
        tree.add_exclusion_phrase(group, "b");
        assert!(!tree.is_valid());
        assert!(tree.collect_words().is_empty());
    }

    #[test]
    fn valid_through_nested_child() {
        let mut tree = QueryTree::new("-a ((b))");
        tree.add_exclusion_phrase(ExpressionId::ROOT, "a");
        let outer = tree.add_subexpression(ExpressionId::ROOT, Mode::Default);
        let inner = tree.add_subexpression(outer, Mode::Default);
        tree.add_and_phrase(inner, "b");
        assert!(tree.is_valid());
        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn empty_root_is_invalid() {
        let tree = QueryTree::new("");
        assert!(tree.is_empty());
        assert!(!tree.is_valid());
        assert!(tree.collect_words().is_empty());
    }

    #[test]
    fn blank_phrases_are_dropped() {
        let mut tree = QueryTree::new("\"  \"");
        tree.add_default_phrase(ExpressionId::ROOT, "   ");
        assert!(tree.root().phrases().is_empty());
    }

    #[test]
    fn structural_equality_ignores_original_query() {
        let a = sample();
        let mut b = QueryTree::new("something else");
        b.add_default_phrase(ExpressionId::ROOT, "a");
        b.add_exclusion_phrase(ExpressionId::ROOT, "b");
        let group = b.add_subexpression(ExpressionId::ROOT, Mode::Default);
        b.add_default_phrase(group, "c");
        b.add_or_phrase(group, "d");
        assert_eq!(a.root(), b.root());
    }

    #[test]
    fn display_renders_tree() {
        let rendered = sample().to_string();
        assert_eq!(
            rendered,
            "Query(\"a -b (c or d)\")\n  Phrase(default, \"a\")\n  Phrase(exclude, \"b\")\n  \
             Group(default)\n    Phrase(default, \"c\")\n    Phrase(or, \"d\")\n"
        );
    }
}
