use std::fmt;

use itertools::Itertools;

use crate::features::FeatSet;

/// One derivation of a sentence: how its tokens combine via grammar rules
/// up to the start symbol. Inner nodes carry the ground features the rule
/// application settled on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseTree {
    Node {
        label: String,
        features: FeatSet,
        children: Vec<ParseTree>,
    },
    Leaf(String),
}

impl ParseTree {
    pub fn label(&self) -> Option<&str> {
        match self {
            ParseTree::Node { label, .. } => Some(label),
            ParseTree::Leaf(_) => None,
        }
    }

    /// Input tokens covered by this subtree, left to right.
    pub fn leaves(&self) -> Vec<&str> {
        match self {
            ParseTree::Leaf(word) => vec![word.as_str()],
            ParseTree::Node { children, .. } => {
                children.iter().flat_map(ParseTree::leaves).collect()
            }
        }
    }
}

impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseTree::Leaf(word) => write!(f, "{word}"),
            ParseTree::Node {
                label,
                features,
                children,
            } => {
                write!(
                    f,
                    "({label}{features} {})",
                    children.iter().map(ParseTree::to_string).join(" ")
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatSet;

    fn leaf(word: &str) -> ParseTree {
        ParseTree::Leaf(word.to_string())
    }

    fn node(label: &str, features: FeatSet, children: Vec<ParseTree>) -> ParseTree {
        ParseTree::Node {
            label: label.to_string(),
            features,
            children,
        }
    }

    #[test]
    fn display_is_bracketed() {
        let mut num_sg = FeatSet::empty();
        num_sg.put("num".to_string(), "sg");

        let tree = node(
            "NP",
            num_sg.clone(),
            vec![node("PropN", num_sg, vec![leaf("Mehdi")])],
        );

        assert_eq!(tree.to_string(), "(NP[num='sg'] (PropN[num='sg'] Mehdi))");
    }

    #[test]
    fn leaves_come_back_in_order() {
        let tree = node(
            "S",
            FeatSet::empty(),
            vec![
                node("NP", FeatSet::empty(), vec![leaf("a"), leaf("dog")]),
                node("VP", FeatSet::empty(), vec![leaf("chased")]),
            ],
        );

        assert_eq!(tree.leaves(), vec!["a", "dog", "chased"]);
    }
}
