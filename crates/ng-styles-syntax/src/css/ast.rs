use crate::Range;
use serde::Serialize;

/// Root of one parsed stylesheet fragment
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Root {
    pub nodes: Vec<Node>,
    pub raws: RootRaws,
    pub source: Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RootRaws {
    /// Text after the last child
    pub after: String,
    /// Whether the last child carried its own `;`
    pub semicolon: bool,
}

/// A child of a [`Root`], [`Rule`] or block [`AtRule`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Rule(Rule),
    AtRule(AtRule),
    Decl(Declaration),
    Comment(Comment),
}

/// `selector { ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    pub selector: String,
    pub nodes: Vec<Node>,
    pub raws: BlockRaws,
    pub source: Range,
}

/// `@name params;` or `@name params { ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtRule {
    pub name: String,
    pub params: String,
    /// `None` for statements without a block
    pub nodes: Option<Vec<Node>>,
    pub raws: AtRuleRaws,
    pub source: Range,
}

/// `prop: value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub prop: String,
    pub value: String,
    pub raws: DeclRaws,
    pub source: Range,
}

/// `/* text */`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub text: String,
    pub raws: CommentRaws,
    pub source: Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BlockRaws {
    pub before: String,
    /// Between the selector and `{`
    pub between: String,
    /// Before `}`
    pub after: String,
    pub semicolon: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtRuleRaws {
    pub before: String,
    pub after_name: String,
    /// Between the params and `{` or `;`
    pub between: String,
    pub after: String,
    pub semicolon: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DeclRaws {
    pub before: String,
    /// Colon and surrounding whitespace
    pub between: String,
    /// Whitespace between the value and its `;`
    pub trailing: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CommentRaws {
    pub before: String,
    pub left: String,
    pub right: String,
}

impl Node {
    #[must_use]
    pub fn source(&self) -> Range {
        match self {
            Node::Rule(rule) => rule.source,
            Node::AtRule(at_rule) => at_rule.source,
            Node::Decl(decl) => decl.source,
            Node::Comment(comment) => comment.source,
        }
    }

    /// Child nodes, if this node is a container
    #[must_use]
    pub fn nodes(&self) -> Option<&[Node]> {
        match self {
            Node::Rule(rule) => Some(&rule.nodes),
            Node::AtRule(at_rule) => at_rule.nodes.as_deref(),
            Node::Decl(_) | Node::Comment(_) => None,
        }
    }

    /// Rebuild this node with every range (its own and its descendants')
    /// passed through `f`.
    #[must_use]
    pub fn map_ranges<F: Fn(Range) -> Range>(self, f: &F) -> Self {
        match self {
            Node::Rule(rule) => Node::Rule(Rule {
                nodes: map_all(rule.nodes, f),
                source: f(rule.source),
                ..rule
            }),
            Node::AtRule(at_rule) => Node::AtRule(AtRule {
                nodes: at_rule.nodes.map(|nodes| map_all(nodes, f)),
                source: f(at_rule.source),
                ..at_rule
            }),
            Node::Decl(decl) => Node::Decl(Declaration {
                source: f(decl.source),
                ..decl
            }),
            Node::Comment(comment) => Node::Comment(Comment {
                source: f(comment.source),
                ..comment
            }),
        }
    }

    fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Node)) {
        visit(self);
        for child in self.nodes().unwrap_or_default() {
            child.walk(visit);
        }
    }
}

fn map_all<F: Fn(Range) -> Range>(nodes: Vec<Node>, f: &F) -> Vec<Node> {
    nodes.into_iter().map(|node| node.map_ranges(f)).collect()
}

impl Root {
    /// Rebuild the tree with every range passed through `f`, the root's own
    /// range last.
    #[must_use]
    pub fn map_ranges<F: Fn(Range) -> Range>(self, f: &F) -> Self {
        let nodes = map_all(self.nodes, f);
        Root {
            nodes,
            source: f(self.source),
            ..self
        }
    }

    /// Visit every descendant depth-first, parents before children
    pub fn walk<'a>(&'a self, mut visit: impl FnMut(&'a Node)) {
        for node in &self.nodes {
            node.walk(&mut visit);
        }
    }

    /// Append a node to the end of this root
    pub fn append(&mut self, node: Node) {
        self.nodes.push(node);
    }
}

impl Rule {
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            nodes: Vec::new(),
            raws: BlockRaws {
                before: "\n".to_string(),
                between: " ".to_string(),
                after: "\n".to_string(),
                semicolon: true,
            },
            source: Range::default(),
        }
    }
}

impl Declaration {
    #[must_use]
    pub fn new(prop: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            prop: prop.into(),
            value: value.into(),
            raws: DeclRaws {
                before: "\n  ".to_string(),
                between: ": ".to_string(),
                trailing: String::new(),
            },
            source: Range::default(),
        }
    }
}
