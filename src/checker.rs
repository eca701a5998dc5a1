use std::io::Write;

use crate::chart::{self, DEFAULT_PARSE_LIMIT};
use crate::grammar::Grammar;
use crate::tree::ParseTree;

/// The sentence list from the exercise: four grammatical, four not.
pub const EXERCISE_SENTENCES: &[&str] = &[
    "Mehdi walked in the garden",
    "Mehdi sees the lunatic on the grass",
    "a dog chased a cat",
    "a lunatic ate an apple",
    "Mehdi see the lunatic in the garden",
    "Mehdi saw the lunatic in the grass",
    "a dog chase a cat",
    "a lunatic ate a apple",
];

/// Classifies sentences as grammatical or not against one fixed grammar.
/// Owns the grammar for the whole run; checks share it read-only.
pub struct Checker {
    grammar: Grammar,
    parse_limit: usize,
}

impl Checker {
    pub fn new(grammar: Grammar) -> Self {
        Self::with_parse_limit(grammar, DEFAULT_PARSE_LIMIT)
    }

    pub fn with_parse_limit(grammar: Grammar, parse_limit: usize) -> Self {
        Checker {
            grammar,
            parse_limit,
        }
    }

    /// Splits the raw sentence on whitespace and enumerates its derivations.
    /// Tokens must match the grammar's terminals exactly, case included.
    pub fn check(&self, raw: &str) -> Verdict {
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        let trees = chart::parse(&self.grammar, &tokens, self.parse_limit);

        Verdict {
            sentence: raw.to_string(),
            trees,
        }
    }
}

pub struct Verdict {
    pub sentence: String,
    pub trees: Vec<ParseTree>,
}

impl Verdict {
    pub fn is_grammatical(&self) -> bool {
        !self.trees.is_empty()
    }

    /// Console report in the shape of the original exercise: a separator,
    /// the sentence, every derivation with a 1-based index, and an explicit
    /// marker when there is none.
    pub fn write_report<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        writeln!(out, "====")?;
        writeln!(out, "{}", self.sentence)?;

        for (index, tree) in self.trees.iter().enumerate() {
            writeln!(out, "{} {tree}", index + 1)?;
            writeln!(out, "----")?;
        }

        if self.trees.is_empty() {
            writeln!(out, "THERE IS NO PARSE TREE!")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{parse_grammar, TOY_ENGLISH};

    fn checker() -> Checker {
        Checker::new(parse_grammar(TOY_ENGLISH).unwrap())
    }

    fn report(verdict: &Verdict) -> String {
        let mut buffer = Vec::new();
        verdict.write_report(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn grammatical_sentence_report_lists_derivations() {
        let verdict = checker().check("Mehdi walked in the garden");

        assert!(verdict.is_grammatical());
        let text = report(&verdict);
        assert!(text.starts_with("====\nMehdi walked in the garden\n1 (S "));
        assert!(text.ends_with("----\n"));
        assert!(!text.contains("THERE IS NO PARSE TREE!"));
    }

    #[test]
    fn ungrammatical_sentence_report_has_no_parse_marker() {
        let verdict = checker().check("a dog chase a cat");

        assert!(!verdict.is_grammatical());
        assert_eq!(
            report(&verdict),
            "====\na dog chase a cat\nTHERE IS NO PARSE TREE!\n"
        );
    }

    #[test]
    fn tokenization_is_case_sensitive() {
        // `mehdi` is not a lexicon entry, `Mehdi` is
        assert!(!checker().check("mehdi walked in the garden").is_grammatical());
    }

    #[test]
    fn extra_whitespace_does_not_change_the_verdict() {
        assert!(checker().check("  Mehdi   walked in the garden ").is_grammatical());
    }
}
