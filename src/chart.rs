//! Earley chart parser over a feature grammar. Ambiguous derivations are
//! packed into a shared forest (one node per label/features/span, with one
//! children list per way of building it), so chart size stays polynomial
//! even when the number of distinct trees is exponential. Trees are only
//! unfolded from the forest on demand, up to the caller's limit.

use std::collections::{HashMap, HashSet};

use crate::features::{substitute, unify_spec, Bindings, FeatSet};
use crate::grammar::{Grammar, Production, Term};
use crate::tree::ParseTree;

/// Cap on enumerated derivations per sentence. Highly ambiguous grammars can
/// produce derivation counts exponential in sentence length; the cap bounds
/// the unfolding work as well as the result, and callers that only need a
/// grammaticality verdict never look past the first tree anyway.
pub const DEFAULT_PARSE_LIMIT: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Child {
    Constituent(usize),
    Word(String),
}

/// Forest node: a constituent together with every recorded way of building
/// it. Derivations sharing a sub-constituent share its node, which is what
/// keeps the chart small under ambiguity.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Node {
    label: String,
    features: FeatSet,
    start: usize,
    end: usize,
    alternatives: Vec<Vec<Child>>,
}

/// Dotted rule in the chart. Bindings collected so far scope over one
/// application of the rule; children point into the forest, so items do not
/// multiply with the ambiguity of what they already consumed.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Item {
    rule: usize,
    dot: usize,
    start: usize,
    bindings: Bindings,
    children: Vec<Child>,
}

/// Parses `tokens` against the grammar's start symbol and returns up to
/// `limit` derivations, in a deterministic order. Out-of-lexicon tokens and
/// feature clashes are not errors, they just leave the result empty.
pub fn parse(grammar: &Grammar, tokens: &[&str], limit: usize) -> Vec<ParseTree> {
    // flatten productions into ids; name-sorted so enumeration order does
    // not depend on hash map iteration
    let mut rules: Vec<&Production> = Vec::new();
    let mut by_name: HashMap<&str, Vec<usize>> = HashMap::new();
    let mut names: Vec<&str> = grammar.productions.keys().map(String::as_str).collect();
    names.sort_unstable();
    for name in names {
        for production in &grammar.productions[name] {
            by_name.entry(name).or_default().push(rules.len());
            rules.push(production);
        }
    }

    let positions = tokens.len() + 1;
    let mut chart: Vec<Vec<Item>> = vec![Vec::new(); positions];
    let mut predicted: Vec<HashSet<usize>> = vec![HashSet::new(); positions];
    let mut nodes: Vec<Node> = Vec::new();

    for &rule in by_name.get(grammar.start.as_str()).into_iter().flatten() {
        predicted[0].insert(rule);
        chart[0].push(Item {
            rule,
            dot: 0,
            start: 0,
            bindings: Bindings::new(),
            children: Vec::new(),
        });
    }

    for pos in 0..positions {
        // predictions and completions both land in chart[pos], so run the
        // cursor until no new items appear
        let mut cursor = 0;
        while cursor < chart[pos].len() {
            let item = chart[pos][cursor].clone();
            cursor += 1;

            let production = rules[item.rule];
            match production.rhs.get(item.dot) {
                Some(Term::Symbol(symbol)) => {
                    for &rule in by_name.get(symbol.name.as_str()).into_iter().flatten() {
                        if predicted[pos].insert(rule) {
                            chart[pos].push(Item {
                                rule,
                                dot: 0,
                                start: pos,
                                bindings: Bindings::new(),
                                children: Vec::new(),
                            });
                        }
                    }
                }
                Some(Term::Word(_)) => {
                    // advanced by the scan pass below
                }
                None => {
                    let features = substitute(&production.lhs.features, &item.bindings);
                    let existing = nodes.iter().position(|node| {
                        node.label == production.lhs.name
                            && node.features == features
                            && node.start == item.start
                            && node.end == pos
                    });

                    if let Some(id) = existing {
                        // the constituent is already in the forest and every
                        // waiting item was advanced when it first completed;
                        // just record the new way of building it
                        if !nodes[id].alternatives.contains(&item.children) {
                            nodes[id].alternatives.push(item.children);
                        }
                        continue;
                    }

                    let id = nodes.len();
                    nodes.push(Node {
                        label: production.lhs.name.clone(),
                        features,
                        start: item.start,
                        end: pos,
                        alternatives: vec![item.children],
                    });

                    // combine with every item waiting for this constituent;
                    // chart positions behind pos are final by now
                    let waiting: Vec<Item> = chart[nodes[id].start].clone();
                    for waiter in waiting {
                        let Some(Term::Symbol(expected)) = rules[waiter.rule].rhs.get(waiter.dot)
                        else {
                            continue;
                        };
                        if expected.name != nodes[id].label {
                            continue;
                        }

                        let mut bindings = waiter.bindings.clone();
                        if !unify_spec(&expected.features, &nodes[id].features, &mut bindings) {
                            continue;
                        }

                        let mut children = waiter.children.clone();
                        children.push(Child::Constituent(id));
                        let advanced = Item {
                            rule: waiter.rule,
                            dot: waiter.dot + 1,
                            start: waiter.start,
                            bindings,
                            children,
                        };
                        if !chart[pos].contains(&advanced) {
                            chart[pos].push(advanced);
                        }
                    }
                }
            }
        }

        if pos < tokens.len() {
            let current: Vec<Item> = chart[pos].clone();
            for item in current {
                let Some(Term::Word(word)) = rules[item.rule].rhs.get(item.dot) else {
                    continue;
                };
                if word.as_str() != tokens[pos] {
                    continue;
                }

                let mut children = item.children.clone();
                children.push(Child::Word(word.clone()));
                let advanced = Item {
                    rule: item.rule,
                    dot: item.dot + 1,
                    start: item.start,
                    bindings: item.bindings.clone(),
                    children,
                };
                if !chart[pos + 1].contains(&advanced) {
                    chart[pos + 1].push(advanced);
                }
            }
        }
    }

    let roots: Vec<usize> = (0..nodes.len())
        .filter(|&id| {
            nodes[id].label == grammar.start
                && nodes[id].start == 0
                && nodes[id].end == tokens.len()
        })
        .collect();

    let mut trees = Vec::new();
    for id in roots {
        if trees.len() >= limit {
            break;
        }
        trees.extend(unfold(&nodes, id, limit - trees.len()));
    }
    trees
}

/// Unfolds at most `limit` trees for a forest node. The forest is acyclic
/// (unary rule cycles are rejected at validation), so recursion bottoms out
/// at word leaves.
fn unfold(nodes: &[Node], id: usize, limit: usize) -> Vec<ParseTree> {
    let node = &nodes[id];
    let mut trees = Vec::new();

    for alternative in &node.alternatives {
        if trees.len() >= limit {
            break;
        }
        let remaining = limit - trees.len();

        // cartesian product over the children, never holding more than
        // `remaining` partial expansions
        let mut products: Vec<Vec<ParseTree>> = vec![Vec::new()];
        for child in alternative {
            let expansions = match child {
                Child::Word(word) => vec![ParseTree::Leaf(word.clone())],
                Child::Constituent(sub) => unfold(nodes, *sub, remaining),
            };

            let mut extended = Vec::new();
            'cap: for partial in &products {
                for expansion in &expansions {
                    let mut product = partial.clone();
                    product.push(expansion.clone());
                    extended.push(product);
                    if extended.len() >= remaining {
                        break 'cap;
                    }
                }
            }
            products = extended;
        }

        for children in products {
            trees.push(ParseTree::Node {
                label: node.label.clone(),
                features: node.features.clone(),
                children,
            });
            if trees.len() >= limit {
                break;
            }
        }
    }

    trees
}
