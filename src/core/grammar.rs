/// Grammar document — node types, wire-format parsing, and the category index.

use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::core::filter::FilterRegistry;
use crate::core::random::{RandomError, RandomSource};

/// Category looked up when no explicit source id is given.
pub const DEFAULT_SOURCE: &str = "section";

#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("malformed grammar: {0}")]
    Malformed(String),
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("category '{0}' does not name a source")]
    UnknownCategory(String),
    #[error("category '{0}' has no children to draw from")]
    EmptyCategory(String),
    #[error("random selection error: {0}")]
    Random(#[from] RandomError),
}

/// A node of the grammar tree.
///
/// Each variant carries only the fields it needs. A `Substitution` holds no
/// children: it is a back-reference into the category index, resolved at
/// expansion time, and an unresolvable id is legal until then.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A literal string contributing directly to output.
    Terminal(String),
    /// A container whose children are all expanded in order.
    Box {
        class: Option<String>,
        chance: Option<i64>,
        children: Vec<Node>,
    },
    /// A named pool of alternative sub-trees that substitutions draw from.
    Category { id: String, children: Vec<Node> },
    /// A reference that resolves to a category and expands one random member.
    Substitution {
        id: String,
        class: Option<String>,
        chance: Option<i64>,
    },
    /// Mutually exclusive alternatives; exactly one child is expanded.
    Choice {
        class: Option<String>,
        chance: Option<i64>,
        children: Vec<Node>,
    },
}

impl Node {
    /// The filter name to apply to this node's expansion, if any.
    pub fn class(&self) -> Option<&str> {
        match self {
            Node::Box { class, .. }
            | Node::Substitution { class, .. }
            | Node::Choice { class, .. } => class.as_deref(),
            _ => None,
        }
    }

    /// The 0–100 suppression gate, if any. Out-of-range values are kept
    /// as-is and bias the gate deterministically.
    pub fn chance(&self) -> Option<i64> {
        match self {
            Node::Box { chance, .. }
            | Node::Substitution { chance, .. }
            | Node::Choice { chance, .. } => *chance,
            _ => None,
        }
    }

    /// The node's children, in order. Terminals and substitutions have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Box { children, .. }
            | Node::Category { children, .. }
            | Node::Choice { children, .. } => children,
            _ => &[],
        }
    }
}

// Wire-format intermediates — the JSON shape produced by the upstream
// document converter differs from the internal enum (string-or-object
// children, string-encoded chance), so deserialization goes through raw
// structs first.

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawNode {
    Terminal(String),
    Element(RawElement),
}

#[derive(Debug, Deserialize)]
struct RawElement {
    #[serde(rename = "type")]
    kind: String,
    id: Option<String>,
    class: Option<String>,
    chance: Option<RawChance>,
    #[serde(default)]
    children: Vec<RawNode>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawChance {
    Number(i64),
    Text(String),
}

impl RawChance {
    fn into_chance(self) -> Result<i64, GrammarError> {
        match self {
            RawChance::Number(n) => Ok(n),
            RawChance::Text(text) => text.trim().parse::<i64>().map_err(|_| {
                GrammarError::Malformed(format!("chance '{}' is not an integer", text))
            }),
        }
    }
}

impl RawNode {
    fn into_node(self) -> Result<Node, GrammarError> {
        match self {
            RawNode::Terminal(text) => Ok(Node::Terminal(text)),
            RawNode::Element(element) => element.into_node(),
        }
    }
}

impl RawElement {
    fn into_node(self) -> Result<Node, GrammarError> {
        let chance = self.chance.map(RawChance::into_chance).transpose()?;
        let children: Vec<Node> = self
            .children
            .into_iter()
            .map(RawNode::into_node)
            .collect::<Result<_, _>>()?;

        match self.kind.as_str() {
            "category" => {
                let id = self
                    .id
                    .ok_or_else(|| GrammarError::Malformed("category node has no id".into()))?;
                Ok(Node::Category { id, children })
            }
            "substitution" => {
                let id = self.id.ok_or_else(|| {
                    GrammarError::Malformed("substitution node has no id".into())
                })?;
                Ok(Node::Substitution {
                    id,
                    class: self.class,
                    chance,
                })
            }
            "choice" => Ok(Node::Choice {
                class: self.class,
                chance,
                children,
            }),
            // "box", the "grammar" root wrapper, and any unrecognized type
            // tag all expand as a plain box, keeping unknown shapes loadable.
            _ => Ok(Node::Box {
                class: self.class,
                chance,
                children,
            }),
        }
    }
}

/// A loaded grammar: the node tree plus the derived category index.
///
/// Immutable after construction, so it can be shared read-only across
/// concurrent expansions; each caller brings its own `RandomSource`.
#[derive(Debug)]
pub struct GrammarDocument {
    root: Node,
    category_index: FxHashMap<String, Vec<Node>>,
}

impl GrammarDocument {
    /// Parse the JSON wire format and build the category index.
    ///
    /// Fails fast: a document that does not fit the expected shapes yields
    /// no partial grammar.
    pub fn parse_json(input: &str) -> Result<GrammarDocument, GrammarError> {
        let raw: RawNode = serde_json::from_str(input)?;
        let root = raw.into_node()?;
        let mut category_index = FxHashMap::default();
        index_categories(&root, &mut category_index);
        Ok(GrammarDocument {
            root,
            category_index,
        })
    }

    /// Load a grammar from a JSON file.
    pub fn load_from_json(path: &Path) -> Result<GrammarDocument, GrammarError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_json(&contents)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The children pool indexed under a category id.
    pub fn category(&self, id: &str) -> Option<&[Node]> {
        self.category_index.get(id).map(Vec::as_slice)
    }

    /// One uniformly random member of the default `"section"` category.
    pub fn source<'a, R: RandomSource>(
        &'a self,
        rng: &mut R,
    ) -> Result<&'a Node, GrammarError> {
        self.source_from(DEFAULT_SOURCE, rng)
    }

    /// One uniformly random member of the category indexed under `id`.
    pub fn source_from<'a, R: RandomSource>(
        &'a self,
        id: &str,
        rng: &mut R,
    ) -> Result<&'a Node, GrammarError> {
        let pool = self
            .category_index
            .get(id)
            .ok_or_else(|| GrammarError::UnknownCategory(id.to_string()))?;
        if pool.is_empty() {
            return Err(GrammarError::EmptyCategory(id.to_string()));
        }
        Ok(rng.pick(pool)?)
    }

    /// Draw a starting node from the default source, expand it, and
    /// concatenate the tokens into final text. Token joining beyond simple
    /// concatenation is the caller's business.
    pub fn generate<R: RandomSource>(
        &self,
        filters: &FilterRegistry,
        rng: &mut R,
    ) -> Result<String, GrammarError> {
        let start = self.source(rng)?;
        Ok(crate::core::expand::expand(start, self, filters, rng)?.concat())
    }
}

/// Pre-order fold recording every category's children under its id.
/// A duplicate id overwrites the earlier entry; later-visited wins.
fn index_categories(node: &Node, index: &mut FxHashMap<String, Vec<Node>>) {
    if let Node::Category { id, children } = node {
        index.insert(id.clone(), children.clone());
    }
    for child in node.children() {
        index_categories(child, index);
    }
}
