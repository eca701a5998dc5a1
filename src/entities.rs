//! Named-entity pass over the input file. The original coursework leaned on
//! a pretrained binary chunker; here a capitalization-run heuristic builds
//! the same flat chunk-tree shape, and extraction walks it recursively.

use std::path::Path;

use itertools::Itertools;

use crate::pipeline::{is_stop_word, tokenize, PipelineError, Token};

const ENTITY_LABEL: &str = "NE";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChunkTree {
    Node {
        label: String,
        children: Vec<ChunkTree>,
    },
    Leaf(String),
}

/// Splits a line into sentences on terminal punctuation.
pub fn split_sentences(line: &str) -> Vec<&str> {
    line.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .collect()
}

/// Groups maximal runs of capitalized words into `NE` chunks under a flat
/// sentence node. Capitalized stop words (sentence-initial `The` and such)
/// are not treated as entity material.
pub fn chunk(tokens: &[Token]) -> ChunkTree {
    let mut children = Vec::new();
    let mut run: Vec<ChunkTree> = Vec::new();

    for token in tokens {
        if is_entity_word(token) {
            run.push(ChunkTree::Leaf(token.text.clone()));
            continue;
        }

        flush_run(&mut run, &mut children);
        children.push(ChunkTree::Leaf(token.text.clone()));
    }
    flush_run(&mut run, &mut children);

    ChunkTree::Node {
        label: "S".to_string(),
        children,
    }
}

fn is_entity_word(token: &Token) -> bool {
    token.is_word()
        && token.text.chars().next().is_some_and(char::is_uppercase)
        && !is_stop_word(&token.text)
}

fn flush_run(run: &mut Vec<ChunkTree>, children: &mut Vec<ChunkTree>) {
    if run.is_empty() {
        return;
    }

    children.push(ChunkTree::Node {
        label: ENTITY_LABEL.to_string(),
        children: std::mem::take(run),
    });
}

/// Collects the text of every `NE` chunk in the tree, depth first.
pub fn extract_entity_names(tree: &ChunkTree) -> Vec<String> {
    let ChunkTree::Node { label, children } = tree else {
        return Vec::new();
    };

    if label == ENTITY_LABEL {
        let name = children
            .iter()
            .filter_map(|child| match child {
                ChunkTree::Leaf(word) => Some(word.as_str()),
                ChunkTree::Node { .. } => None,
            })
            .join(" ");
        return vec![name];
    }

    children.iter().flat_map(extract_entity_names).collect()
}

/// Runs the entity pass over the file, one entity list per input line.
pub fn run_extraction<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<String>>, PipelineError> {
    let text = std::fs::read_to_string(path)?;

    let mut per_line = Vec::new();
    for line in text.lines() {
        let mut entities = Vec::new();
        for sentence in split_sentences(line) {
            let tree = chunk(&tokenize(sentence));
            entities.extend(extract_entity_names(&tree));
        }
        per_line.push(entities);
    }

    Ok(per_line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(text: &str) -> Vec<String> {
        extract_entity_names(&chunk(&tokenize(text)))
    }

    #[test]
    fn adjacent_capitalized_words_form_one_entity() {
        assert_eq!(entities("the map of Paris France"), vec!["Paris France"]);
    }

    #[test]
    fn separated_entities_stay_separate() {
        assert_eq!(
            entities("from Berlin to Munich by train"),
            vec!["Berlin", "Munich"]
        );
    }

    #[test]
    fn lowercase_text_has_no_entities() {
        assert!(entities("the map of the city centre").is_empty());
    }

    #[test]
    fn capitalized_stop_words_are_not_entities() {
        assert_eq!(entities("The river near Dresden"), vec!["Dresden"]);
    }

    #[test]
    fn sentences_split_on_terminal_punctuation() {
        assert_eq!(
            split_sentences("Where is Paris? Show the map."),
            vec!["Where is Paris", "Show the map"]
        );
    }
}
