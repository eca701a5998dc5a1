use std::collections::{HashMap, HashSet};

use anyhow::anyhow;
use beau_collector::BeauCollector;

use super::{Grammar, Term};

type ValidateResult = Result<(), anyhow::Error>;

pub fn validate_grammar(g: &Grammar) -> ValidateResult {
    let checks = [resolve_names, reject_unary_cycles];

    let _ = checks
        .into_iter()
        .map(|check| check(g))
        .bcollect::<Vec<_>>()?;

    Ok(())
}

fn resolve_names(g: &Grammar) -> ValidateResult {
    let mut missing = HashSet::new();

    for productions in g.productions.values() {
        for production in productions {
            for term in &production.rhs {
                let Term::Symbol(symbol) = term else {
                    continue;
                };

                if !g.productions.contains_key(&symbol.name) {
                    missing.insert(symbol.name.clone());
                }
            }
        }
    }

    let mut missing: Vec<_> = missing.into_iter().collect();
    missing.sort();

    missing
        .into_iter()
        .map(|name| {
            Err::<(), anyhow::Error>(anyhow!(
                "symbol `{name}` is mentioned in grammar but never defined"
            ))
        })
        .bcollect::<Vec<_>>()?;
    Ok(())
}

// Chains of single-symbol productions must not loop back on themselves,
// otherwise exhaustive derivation enumeration would never terminate.
fn reject_unary_cycles(g: &Grammar) -> ValidateResult {
    let mut edges: HashMap<&str, Vec<&str>> = HashMap::new();

    for (name, productions) in &g.productions {
        for production in productions {
            if let [Term::Symbol(symbol)] = production.rhs.as_slice() {
                edges
                    .entry(name.as_str())
                    .or_default()
                    .push(symbol.name.as_str());
            }
        }
    }

    let mut state = HashMap::new();
    let mut names: Vec<&str> = edges.keys().copied().collect();
    names.sort();

    for name in names {
        if let Some(hit) = visit(name, &edges, &mut state) {
            return Err(anyhow!("grammar contains a unary rule cycle through `{hit}`"));
        }
    }

    Ok(())
}

enum Mark {
    InProgress,
    Done,
}

fn visit<'g>(
    node: &'g str,
    edges: &HashMap<&'g str, Vec<&'g str>>,
    state: &mut HashMap<&'g str, Mark>,
) -> Option<&'g str> {
    match state.get(node) {
        Some(Mark::InProgress) => return Some(node),
        Some(Mark::Done) => return None,
        None => {}
    }

    state.insert(node, Mark::InProgress);
    for &next in edges.get(node).into_iter().flatten() {
        if let Some(hit) = visit(next, edges, state) {
            return Some(hit);
        }
    }
    state.insert(node, Mark::Done);

    None
}
