/// The expander — traces a grammar downwards, emitting terminal symbols and
/// expanding non-terminal ones.
///
/// Purely recursive: no state beyond the call stack, no mutation of the
/// grammar, every random draw through the injected `RandomSource`. The
/// result is an ordered token sequence the caller joins into output text.

use crate::core::filter::FilterRegistry;
use crate::core::grammar::{GrammarDocument, GrammarError, Node};
use crate::core::random::RandomSource;

/// Expand `node` against `grammar` into a flat sequence of terminal strings.
///
/// Expansion rules:
/// - a `chance` attribute gates the whole node, filter included;
/// - substitutions resolve their id through the category index and recurse
///   into one random pool member (a dangling id is an error, not silence);
/// - choices recurse into exactly one random child;
/// - boxes and categories recurse into every child in order;
/// - the sub-results are flattened one level, empty contributions dropped;
/// - a `class` attribute runs the named filter over the flattened sequence.
///
/// The chance boundary is asymmetric and preserved deliberately: a node is
/// suppressed iff `chance < rng.chance(100)`, so `chance = 100` always
/// expands, while `chance = 0` still expands when the draw comes up 0.
pub fn expand<R: RandomSource>(
    node: &Node,
    grammar: &GrammarDocument,
    filters: &FilterRegistry,
    rng: &mut R,
) -> Result<Vec<String>, GrammarError> {
    if let Some(chance) = node.chance() {
        let sampled = i64::from(rng.chance(100));
        if chance < sampled {
            // Suppressed: contributes nothing, filter never runs.
            return Ok(Vec::new());
        }
    }

    let expansion = match node {
        Node::Terminal(text) => vec![text.clone()],
        Node::Substitution { id, .. } => {
            let pool = grammar
                .category(id)
                .ok_or_else(|| GrammarError::UnknownCategory(id.clone()))?;
            if pool.is_empty() {
                return Err(GrammarError::EmptyCategory(id.clone()));
            }
            let target = rng.pick(pool)?;
            expand(target, grammar, filters, rng)?
        }
        Node::Choice { children, .. } => {
            let target = rng.pick(children)?;
            expand(target, grammar, filters, rng)?
        }
        // Boxes and categories expand every child in order; empty
        // contributions vanish in the flatten.
        _ => {
            let mut tokens = Vec::new();
            for child in node.children() {
                tokens.extend(expand(child, grammar, filters, rng)?);
            }
            tokens
        }
    };

    match node.class() {
        Some(class) => Ok(filters.apply(class, expansion)),
        None => Ok(expansion),
    }
}
