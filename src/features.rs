use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;

/// Value of a single feature in a rule or on a built constituent.
/// Variables (`?n` in the notation) only ever appear on rule symbols;
/// constituents carry ground atoms exclusively.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FeatValue {
    Atom(String),
    Var(String),
}

impl From<&str> for FeatValue {
    fn from(value: &str) -> Self {
        FeatValue::Atom(value.to_string())
    }
}

impl fmt::Display for FeatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatValue::Atom(a) => write!(f, "'{a}'"),
            FeatValue::Var(v) => write!(f, "?{v}"),
        }
    }
}

/// Flat feature structure attached to a grammar symbol, e.g.
/// `[num='sg', tense='past']`. Ordered so that Display output and
/// derivation enumeration stay deterministic between runs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FeatSet {
    inner: BTreeMap<String, FeatValue>,
}

impl FeatSet {
    pub fn new(items: BTreeMap<String, FeatValue>) -> Self {
        FeatSet { inner: items }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn put<T: Into<FeatValue>>(&mut self, key: String, value: T) {
        self.inner.insert(key, value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FeatValue> {
        self.inner.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FeatValue)> {
        self.inner.iter()
    }
}

impl fmt::Display for FeatSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inner.is_empty() {
            return Ok(());
        }
        write!(
            f,
            "[{}]",
            self.inner.iter().map(|(k, v)| format!("{k}={v}")).join(", ")
        )
    }
}

/// Variable bindings accumulated over one rule application.
pub type Bindings = BTreeMap<String, String>;

/// Checks a rule-side feature spec against the ground features of a built
/// constituent, extending `bindings` in place. A key absent from the
/// constituent is unconstrained and unifies with anything. Returns false on
/// the first clash; callers clone `bindings` before attempting a unification
/// they may abandon.
pub fn unify_spec(spec: &FeatSet, ground: &FeatSet, bindings: &mut Bindings) -> bool {
    for (key, value) in spec.iter() {
        let Some(FeatValue::Atom(actual)) = ground.get(key) else {
            continue;
        };

        match value {
            FeatValue::Atom(wanted) => {
                if wanted != actual {
                    return false;
                }
            }
            FeatValue::Var(name) => match bindings.get(name) {
                Some(bound) if bound != actual => return false,
                Some(_) => {}
                None => {
                    bindings.insert(name.clone(), actual.clone());
                }
            },
        }
    }

    true
}

/// Produces the ground features of a completed constituent from its rule's
/// left-hand-side spec. Variables left unbound by the rule application are
/// dropped, leaving the constituent underspecified for that feature.
pub fn substitute(spec: &FeatSet, bindings: &Bindings) -> FeatSet {
    let mut out = BTreeMap::new();

    for (key, value) in spec.iter() {
        match value {
            FeatValue::Atom(a) => {
                out.insert(key.clone(), FeatValue::Atom(a.clone()));
            }
            FeatValue::Var(name) => {
                if let Some(bound) = bindings.get(name) {
                    out.insert(key.clone(), FeatValue::Atom(bound.clone()));
                }
            }
        }
    }

    FeatSet::new(out)
}
