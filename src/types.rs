use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A position in a chromosome: an index into either the terminal or the
/// function alphabet of a `Genome`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Terminal(usize),
    Function(usize),
}

impl Symbol {
    pub fn is_function(&self) -> bool {
        matches!(self, Symbol::Function(_))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }
}

/// Values bound to terminal names while evaluating an expression.
pub type Bindings<V = f64> = HashMap<String, V>;

/// Expression tree decoded from a single gene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AstNode {
    Terminal(String),
    Call {
        function: String,
        args: Vec<AstNode>,
    },
}

impl AstNode {
    pub fn depth(&self) -> usize {
        match self {
            AstNode::Terminal(_) => 1,
            AstNode::Call { args, .. } => 1 + args.iter().map(AstNode::depth).max().unwrap_or(0),
        }
    }

    pub fn size(&self) -> usize {
        match self {
            AstNode::Terminal(_) => 1,
            AstNode::Call { args, .. } => 1 + args.iter().map(AstNode::size).sum::<usize>(),
        }
    }

    /// Infix for binary calls, prefix notation otherwise.
    pub fn to_formula(&self) -> String {
        match self {
            AstNode::Terminal(name) => name.clone(),
            AstNode::Call { function, args } if args.len() == 2 => {
                format!("({} {} {})", args[0].to_formula(), function, args[1].to_formula())
            }
            AstNode::Call { function, args } => {
                let inner: Vec<String> = args.iter().map(AstNode::to_formula).collect();
                format!("{}({})", function, inner.join(", "))
            }
        }
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_formula())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str) -> AstNode {
        AstNode::Terminal(name.to_string())
    }

    #[test]
    fn test_formula_rendering() {
        let ast = AstNode::Call {
            function: "+".to_string(),
            args: vec![
                leaf("a"),
                AstNode::Call {
                    function: "Q".to_string(),
                    args: vec![leaf("b")],
                },
            ],
        };

        assert_eq!(ast.to_formula(), "(a + Q(b))");
        assert_eq!(ast.depth(), 3);
        assert_eq!(ast.size(), 4);
    }

    #[test]
    fn test_symbol_kind() {
        assert!(Symbol::Function(0).is_function());
        assert!(Symbol::Terminal(3).is_terminal());
        assert!(!Symbol::Terminal(3).is_function());
    }
}
