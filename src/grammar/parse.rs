use std::collections::HashMap;

use anyhow::anyhow;

use crate::features::{FeatSet, FeatValue};

/// Grammar symbol with an optional flat feature block, e.g. `NP[num=?n]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub features: FeatSet,
}

/// Single item on the right-hand side of a production: either another
/// symbol or a quoted terminal word matched verbatim against input tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Term {
    Symbol(Symbol),
    Word(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Production {
    pub lhs: Symbol,
    pub rhs: Vec<Term>,
}

/// Parsed grammar: productions grouped by left-hand-side symbol name,
/// preserving file order within each group. The start symbol is the
/// left-hand side of the first production in the file. Immutable once
/// built; one instance serves all sentence checks of a run.
#[derive(Clone, Debug)]
pub struct Grammar {
    pub start: String,
    pub productions: HashMap<String, Vec<Production>>,
}

peg::parser! {

    pub grammar notation() for str {

        rule _() = quiet!{[' ' | '\t']*}

        rule identifier() -> String =
            s:$(['a'..='z'|'A'..='Z'|'_']['a'..='z'|'A'..='Z'|'0'..='9'|'_']* ) {
                s.to_string()
            }

        rule atom() -> String =
            "'" s:$([^'\'']+) "'" {
                s.to_string()
            }

        rule feat_value() -> FeatValue =
            a:atom() {
                FeatValue::Atom(a)
            }
            /
            "?" v:identifier() {
                FeatValue::Var(v)
            }

        rule feature() -> (String, FeatValue) =
            key:identifier() _ "=" _ value:feat_value() {
                (key, value)
            }

        rule features() -> FeatSet =
            "[" _ f:(feature() ** (_ "," _)) _ "]" {
                FeatSet::new(f.into_iter().collect())
            }

        rule symbol() -> Symbol =
            name:identifier() f:features()? {
                Symbol { name, features: f.unwrap_or_default() }
            }

        rule term() -> Term =
            w:atom() {
                Term::Word(w)
            }
            /
            s:symbol() {
                Term::Symbol(s)
            }

        rule alternative() -> Vec<Term> =
            term() ++ (quiet!{[' ' | '\t']+})

        pub rule production() -> Vec<Production> =
            _ lhs:symbol() _ "->" _ alts:(alternative() ++ (_ "|" _)) _ {
                alts.into_iter()
                    .map(|rhs| Production { lhs: lhs.clone(), rhs })
                    .collect()
            }

    }
}

/// Parses the full rule text. The notation is line-oriented: one production
/// per line, `#` starts a comment, blank lines are ignored.
pub(super) fn parse_text(content: &str) -> Result<Grammar, anyhow::Error> {
    let mut start = None;
    let mut productions: HashMap<String, Vec<Production>> = HashMap::new();

    for (lineno, raw) in content.lines().enumerate() {
        let line = match raw.find('#') {
            Some(hash) => &raw[..hash],
            None => raw,
        };
        if line.trim().is_empty() {
            continue;
        }

        let parsed = notation::production(line)
            .map_err(|e| anyhow!("grammar line {}: {e}", lineno + 1))?;

        for production in parsed {
            start.get_or_insert_with(|| production.lhs.name.clone());
            productions
                .entry(production.lhs.name.clone())
                .or_default()
                .push(production);
        }
    }

    let Some(start) = start else {
        return Err(anyhow!("grammar text contains no production"));
    };

    Ok(Grammar {
        start,
        productions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_production() {
        let g = parse_text("S -> NP VP").unwrap();

        assert_eq!(g.start, "S");
        let rules = &g.productions["S"];
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].rhs.len(), 2);
        assert!(matches!(&rules[0].rhs[0], Term::Symbol(s) if s.name == "NP"));
    }

    #[test]
    fn parses_feature_blocks_and_variables() {
        let g = parse_text("VP[num=?n] -> TVerb[num=?n, tense='pres'] NP").unwrap();

        let rule = &g.productions["VP"][0];
        assert_eq!(
            rule.lhs.features.get("num"),
            Some(&FeatValue::Var("n".to_string()))
        );
        let Term::Symbol(verb) = &rule.rhs[0] else {
            panic!("expected symbol");
        };
        assert_eq!(
            verb.features.get("tense"),
            Some(&FeatValue::Atom("pres".to_string()))
        );
    }

    #[test]
    fn splits_alternatives_into_separate_productions() {
        let g = parse_text("Det -> 'the' | 'a' | 'an'").unwrap();

        let rules = &g.productions["Det"];
        assert_eq!(rules.len(), 3);
        assert_eq!(rules[1].rhs, vec![Term::Word("a".to_string())]);
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let text = "
            # toy grammar
            S -> NP VP   # sentence

            NP -> 'Mehdi'
            VP -> 'walked'
        ";
        let g = parse_text(text).unwrap();

        assert_eq!(g.start, "S");
        assert_eq!(g.productions.len(), 3);
    }

    #[test]
    fn rejects_empty_text() {
        assert!(parse_text("# nothing here\n").is_err());
    }

    #[test]
    fn rejects_production_without_rhs() {
        assert!(parse_text("S ->").is_err());
        assert!(parse_text("S -> NP VP\nVP ->\nNP -> 'Mehdi'").is_err());
    }

    #[test]
    fn reports_line_number_on_bad_rule() {
        let err = parse_text("S -> NP VP\nNP -> ->").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
