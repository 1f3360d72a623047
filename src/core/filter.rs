/// Filters — named post-expansion transforms over token sequences.
///
/// A node's `class` attribute selects a filter by name; the filter runs on
/// the node's flattened expansion before it is returned to the parent.
/// Filters operate on token sequences, never on joined strings.

use rustc_hash::FxHashMap;

/// A pure transform over a flattened token sequence.
pub type Filter = fn(Vec<String>) -> Vec<String>;

/// Registry mapping filter names to transforms.
///
/// Unknown names are deliberately a no-op: a `class` that names no filter
/// leaves the sequence unchanged, so grammars can carry styling classes the
/// engine does not know about.
pub struct FilterRegistry {
    filters: FxHashMap<String, Filter>,
}

impl Default for FilterRegistry {
    fn default() -> Self {
        let mut registry = Self {
            filters: FxHashMap::default(),
        };
        registry.register("sentence", sentence);
        registry.register("paragraph", paragraph);
        registry
    }
}

impl FilterRegistry {
    /// Registry with the built-in `sentence` and `paragraph` filters.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str, filter: Filter) {
        self.filters.insert(name.to_string(), filter);
    }

    /// Apply the named filter, or return `tokens` unchanged if `name` is
    /// not registered.
    pub fn apply(&self, name: &str, tokens: Vec<String>) -> Vec<String> {
        match self.filters.get(name) {
            Some(filter) => filter(tokens),
            None => tokens,
        }
    }
}

/// Capitalize the first character of the first token and append a single
/// space token. Never reorders or removes tokens.
fn sentence(mut tokens: Vec<String>) -> Vec<String> {
    if let Some(first) = tokens.first_mut() {
        let mut chars = first.chars();
        if let Some(head) = chars.next() {
            let mut capitalized: String = head.to_uppercase().collect();
            capitalized.push_str(chars.as_str());
            *first = capitalized;
        }
    }
    tokens.push(" ".to_string());
    tokens
}

/// Append a single newline token.
fn paragraph(mut tokens: Vec<String>) -> Vec<String> {
    tokens.push("\n".to_string());
    tokens
}
