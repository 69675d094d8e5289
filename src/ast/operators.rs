/// Operators of the condition language.
///
/// The set is closed by construction: an operator that is not a variant of
/// this enum cannot be tokenized, priced, or applied. Extending the
/// language means adding a variant here and an arm to the evaluator's
/// `apply`, which the compiler enforces through exhaustive matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    // Arithmetic
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Multiplication (`*`)
    Multiply,
    /// Division (`/`)
    Divide,

    // Equality
    /// Equal (`==`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,

    // Logical
    /// Logical AND (`&&`)
    And,
    /// Logical OR (`||`)
    Or,
    /// Logical negation (`!`), the only unary operator
    Not,

    // Ordering
    /// Greater than (`>`)
    GreaterThan,
    /// Less than (`<`)
    LessThan,

    // Collection
    /// Membership or JSON-predicate match (`contains`)
    Contains,
    /// Exact length check (`hasLength`)
    HasLength,
}

impl Op {
    /// Look up an operator by its surface symbol. This is the allowed-set
    /// check: any piece of input that is not listed here classifies as a
    /// literal or identifier instead.
    pub fn from_symbol(symbol: &str) -> Option<Op> {
        match symbol {
            "+" => Some(Op::Add),
            "-" => Some(Op::Subtract),
            "*" => Some(Op::Multiply),
            "/" => Some(Op::Divide),
            "==" => Some(Op::Equal),
            "!=" => Some(Op::NotEqual),
            "&&" => Some(Op::And),
            "||" => Some(Op::Or),
            "!" => Some(Op::Not),
            ">" => Some(Op::GreaterThan),
            "<" => Some(Op::LessThan),
            "contains" => Some(Op::Contains),
            "hasLength" => Some(Op::HasLength),
            _ => None,
        }
    }

    /// The surface symbol, for diagnostics.
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Subtract => "-",
            Op::Multiply => "*",
            Op::Divide => "/",
            Op::Equal => "==",
            Op::NotEqual => "!=",
            Op::And => "&&",
            Op::Or => "||",
            Op::Not => "!",
            Op::GreaterThan => ">",
            Op::LessThan => "<",
            Op::Contains => "contains",
            Op::HasLength => "hasLength",
        }
    }

    /// Evaluation priority; the higher of two pending operators is applied
    /// first. Parentheses sit above everything at 8 on the operator stack
    /// but act purely as fences, never winning a precedence contest. Class
    /// 6 is an unassigned gap.
    pub fn precedence(self) -> u8 {
        match self {
            Op::Not => 7,
            Op::Multiply | Op::Divide => 5,
            Op::Add | Op::Subtract => 4,
            Op::Contains | Op::HasLength | Op::GreaterThan | Op::LessThan => 3,
            Op::Equal | Op::NotEqual => 2,
            Op::And | Op::Or => 1,
        }
    }

    /// Whether the operator takes a single operand.
    pub fn is_unary(self) -> bool {
        matches!(self, Op::Not)
    }
}
