use std::cmp::Ordering;
use std::collections::HashMap;

use rust_decimal::{Decimal, prelude::FromPrimitive, prelude::ToPrimitive};

use crate::{
    ast::{Op, Token},
    lexer::tokenize,
    stack::Stack,
    value::Value,
};

/// Errors that can occur while evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Parentheses did not pair up; carries the token positions of every
    /// `(` or `)` left without a partner
    UnbalancedParens(Vec<usize>),

    /// An operator ran out of operands to pop
    MissingOperand(&'static str),

    /// The expression reduced to something other than exactly one value
    UnexpectedResult(usize),

    /// Operand kinds the operator has no meaning for
    TypeError(String),
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::UnbalancedParens(positions) => {
                let positions: Vec<String> = positions.iter().map(|p| p.to_string()).collect();
                write!(
                    f,
                    "Syntax error: unbalanced parentheses at token position(s) {}",
                    positions.join(", ")
                )
            }
            EvalError::MissingOperand(op) => {
                write!(f, "Evaluation error: operator `{}` is missing an operand", op)
            }
            EvalError::UnexpectedResult(count) => write!(
                f,
                "Evaluation error: expression reduced to {} values instead of one",
                count
            ),
            EvalError::TypeError(msg) => write!(f, "Type error: {}", msg),
        }
    }
}

impl std::error::Error for EvalError {}

/// Returns a human-readable type name for a Value
fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Undefined => "undefined",
        Value::Boolean(_) => "boolean",
        Value::Integer(_) => "integer",
        Value::Float(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// An entry on the operator stack: a pending operator, or an open
/// parenthesis fencing everything below it. The parenthesis remembers its
/// token position so the balance tracker can clear the exact entry it
/// recorded when the match is found.
#[derive(Debug)]
enum Pending {
    Operator(Op),
    OpenParen(usize),
}

/// The dual-stack expression engine.
///
/// Consumes tokens left to right, keeping operands on one stack and
/// pending operators on the other, and folds both into a single result
/// without building a syntax tree. Each instance is built fresh for one
/// evaluation and carries no state across calls; the borrowed document is
/// never written to.
pub struct Evaluator<'a> {
    context: &'a Value,
    values: Stack<Value>,
    ops: Stack<Pending>,
    unbalanced: Vec<usize>,
}

impl<'a> Evaluator<'a> {
    pub fn new(context: &'a Value) -> Self {
        Evaluator {
            context,
            values: Stack::new(),
            ops: Stack::new(),
            unbalanced: Vec::new(),
        }
    }

    /// Evaluates an expression against the borrowed document.
    ///
    /// # Examples
    ///
    /// ```
    /// use sift_lang::{Evaluator, Value};
    ///
    /// let doc = Value::from(serde_json::json!({"a": {"b": 5}}));
    /// let result = Evaluator::new(&doc).evaluate("a.b > 3").unwrap();
    /// assert_eq!(result, Value::Boolean(true));
    /// ```
    pub fn evaluate(mut self, expression: &str) -> Result<Value, EvalError> {
        for (position, token) in tokenize(expression).into_iter().enumerate() {
            match token {
                Token::OpenParen => {
                    self.ops.push(Pending::OpenParen(position));
                    self.unbalanced.push(position);
                }
                Token::CloseParen => self.close_paren(position)?,
                Token::Operator(op) => {
                    while self.top_outranks(op) {
                        self.apply_top()?;
                    }
                    self.ops.push(Pending::Operator(op));
                }
                literal => {
                    let value = self.resolve(literal);
                    self.values.push(value);
                }
            }
        }

        if !self.unbalanced.is_empty() {
            self.unbalanced.sort_unstable();
            return Err(EvalError::UnbalancedParens(self.unbalanced));
        }

        while !self.ops.is_empty() {
            self.apply_top()?;
        }

        match self.values.pop() {
            Some(result) if self.values.is_empty() => Ok(result),
            Some(_) => Err(EvalError::UnexpectedResult(self.values.len() + 1)),
            None => Err(EvalError::UnexpectedResult(0)),
        }
    }

    /// Unwind pending operators until the matching `(`. The innermost
    /// unmatched open is necessarily the one found: any later open would
    /// still be sitting on the stack, blocking this loop first.
    fn close_paren(&mut self, position: usize) -> Result<(), EvalError> {
        loop {
            match self.ops.peek() {
                None => {
                    // Extra close with nothing to match
                    self.unbalanced.push(position);
                    return Ok(());
                }
                Some(Pending::OpenParen(_)) => {
                    if let Some(Pending::OpenParen(open)) = self.ops.pop() {
                        self.unbalanced.retain(|&recorded| recorded != open);
                    }
                    return Ok(());
                }
                Some(Pending::Operator(_)) => self.apply_top()?,
            }
        }
    }

    /// Whether the stack top should be applied before `incoming` goes on.
    /// A parenthesis never outranks anything; it only fences.
    fn top_outranks(&self, incoming: Op) -> bool {
        match self.ops.peek() {
            Some(Pending::Operator(top)) => top.precedence() >= incoming.precedence(),
            _ => false,
        }
    }

    /// Pop one operator and apply it to the operand stack. The first pop
    /// is the right-hand operand; the second is the left.
    fn apply_top(&mut self) -> Result<(), EvalError> {
        let op = match self.ops.pop() {
            Some(Pending::Operator(op)) => op,
            _ => unreachable!("parenthesis on the operator stack survived the balance check"),
        };

        if op.is_unary() {
            let operand = self
                .values
                .pop()
                .ok_or(EvalError::MissingOperand(op.symbol()))?;
            self.values.push(apply_unary(op, operand));
        } else {
            let b = self
                .values
                .pop()
                .ok_or(EvalError::MissingOperand(op.symbol()))?;
            let a = self
                .values
                .pop()
                .ok_or(EvalError::MissingOperand(op.symbol()))?;
            let result = apply_binary(op, a, b)?;
            self.values.push(result);
        }
        Ok(())
    }

    fn resolve(&self, token: Token) -> Value {
        match token {
            Token::Integer(n) => Value::Integer(n),
            Token::String(s) => Value::String(s),
            Token::Boolean(b) => Value::Boolean(b),
            Token::Null => Value::Null,
            Token::Undefined => Value::Undefined,
            Token::Identifier(path) => self.lookup(&path),
            Token::Operator(_) | Token::OpenParen | Token::CloseParen => {
                unreachable!("structural tokens are handled before resolution")
            }
        }
    }

    /// Walk a dotted path through the document. Objects are entered by
    /// key, arrays by all-digit segments; any miss yields `Undefined`
    /// rather than an error.
    fn lookup(&self, path: &str) -> Value {
        let mut current = self.context;
        for segment in path.split('.') {
            current = match current {
                Value::Object(map) => match map.get(segment) {
                    Some(child) => child,
                    None => return Value::Undefined,
                },
                Value::Array(items) => {
                    match segment.parse::<usize>().ok().and_then(|i| items.get(i)) {
                        Some(child) => child,
                        None => return Value::Undefined,
                    }
                }
                _ => return Value::Undefined,
            };
        }
        current.clone()
    }
}

/// Evaluates a condition expression against a JSON document.
///
/// # Examples
///
/// ```
/// use sift_lang::{evaluate, Value};
///
/// let doc = Value::from(serde_json::json!({"a": {"b": 5}, "c": {"d": "x"}}));
/// let result = evaluate("a.b > 3 && c.d == 'x'", &doc).unwrap();
/// assert_eq!(result, Value::Boolean(true));
/// ```
pub fn evaluate(expression: &str, context: &Value) -> Result<Value, EvalError> {
    Evaluator::new(context).evaluate(expression)
}

fn apply_unary(op: Op, operand: Value) -> Value {
    match op {
        Op::Not => Value::Boolean(!operand.is_truthy()),
        _ => unreachable!("`{}` is not a unary operator", op.symbol()),
    }
}

fn apply_binary(op: Op, a: Value, b: Value) -> Result<Value, EvalError> {
    match op {
        Op::Add => match (a, b) {
            (Value::String(x), Value::String(y)) => Ok(Value::String(format!("{}{}", x, y))),
            (a, b) => arithmetic(Op::Add, a, b),
        },
        Op::Subtract | Op::Multiply => arithmetic(op, a, b),
        Op::Divide => divide(a, b),
        Op::Equal => Ok(Value::Boolean(a.equals(&b))),
        Op::NotEqual => Ok(Value::Boolean(!a.equals(&b))),
        // Both operands are already computed by the time either logical
        // operator applies; the dual-stack scheme has no short circuit.
        // The result is the operand whose truthiness decided.
        Op::And => Ok(if a.is_truthy() { b } else { a }),
        Op::Or => Ok(if a.is_truthy() { a } else { b }),
        Op::GreaterThan => Ok(Value::Boolean(compare(&a, &b) == Some(Ordering::Greater))),
        Op::LessThan => Ok(Value::Boolean(compare(&a, &b) == Some(Ordering::Less))),
        Op::Contains => Ok(Value::Boolean(contains(&a, &b))),
        Op::HasLength => Ok(Value::Boolean(has_length(&a, &b))),
        Op::Not => unreachable!("unary operator dispatched through apply_unary"),
    }
}

/// `+`, `-`, and `*` on numbers. Mixed integer/float operands go through
/// decimal arithmetic so a mathematically whole result stays an integer
/// instead of picking up floating-point noise.
fn arithmetic(op: Op, a: Value, b: Value) -> Result<Value, EvalError> {
    match (a, b) {
        (Value::Integer(x), Value::Integer(y)) => Ok(Value::Integer(match op {
            Op::Add => x + y,
            Op::Subtract => x - y,
            Op::Multiply => x * y,
            _ => unreachable!(),
        })),
        (Value::Float(x), Value::Float(y)) => Ok(Value::Float(match op {
            Op::Add => x + y,
            Op::Subtract => x - y,
            Op::Multiply => x * y,
            _ => unreachable!(),
        })),
        (a, b) => {
            let (Some(x), Some(y)) = (a.as_float(), b.as_float()) else {
                return Err(EvalError::TypeError(format!(
                    "cannot apply `{}` to {} and {}",
                    op.symbol(),
                    type_name(&a),
                    type_name(&b)
                )));
            };

            if let (Some(xd), Some(yd)) = (Decimal::from_f64(x), Decimal::from_f64(y)) {
                let rd = match op {
                    Op::Add => xd + yd,
                    Op::Subtract => xd - yd,
                    Op::Multiply => xd * yd,
                    _ => unreachable!(),
                };
                if rd.is_integer()
                    && let Some(r) = rd.to_i64()
                {
                    return Ok(Value::Integer(r));
                } else if let Some(r) = rd.to_f64() {
                    return Ok(Value::Float(r));
                }
            }

            Ok(Value::Float(match op {
                Op::Add => x + y,
                Op::Subtract => x - y,
                Op::Multiply => x * y,
                _ => unreachable!(),
            }))
        }
    }
}

/// Division is float-like: a zero divisor follows IEEE-754 and yields an
/// infinity or NaN rather than an error. An exact whole quotient with a
/// nonzero divisor stays an integer.
fn divide(a: Value, b: Value) -> Result<Value, EvalError> {
    match (&a, &b) {
        (Value::Integer(x), Value::Integer(y)) if *y != 0 && x % y == 0 => {
            Ok(Value::Integer(x / y))
        }
        _ => {
            let (Some(x), Some(y)) = (a.as_float(), b.as_float()) else {
                return Err(EvalError::TypeError(format!(
                    "cannot apply `/` to {} and {}",
                    type_name(&a),
                    type_name(&b)
                )));
            };
            Ok(Value::Float(x / y))
        }
    }
}

/// Ordering for `>` and `<`: numeric for number pairs, lexicographic for
/// string pairs. Every other pairing is incomparable and the comparison
/// answers false, so a missing field never blows up a condition.
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => match (a.as_float(), b.as_float()) {
            (Some(x), Some(y)) => x.partial_cmp(&y),
            _ => None,
        },
    }
}

/// `contains`: membership with a JSON-predicate upgrade.
///
/// The left side is treated as a collection; anything that is not an array
/// (including null and a missing field) counts as empty. A string right
/// side is first tried as JSON: an object becomes a predicate that some
/// element must deep-match key by key, any other parsed value is looked up
/// by membership. A right side that is not parseable JSON falls back to
/// plain membership of the literal itself.
fn contains(collection: &Value, needle: &Value) -> bool {
    let elements: &[Value] = match collection {
        Value::Array(items) => items,
        _ => &[],
    };

    if let Value::String(raw) = needle {
        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(serde_json::Value::Object(fields)) => {
                let predicate: HashMap<String, Value> = fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect();
                return elements
                    .iter()
                    .any(|element| matches_predicate(element, &predicate));
            }
            Ok(parsed) => {
                let parsed = Value::from(parsed);
                return elements.iter().any(|element| element.equals(&parsed));
            }
            Err(_) => {} // not JSON; fall through to literal membership
        }
    }

    elements.iter().any(|element| element.equals(needle))
}

fn matches_predicate(element: &Value, predicate: &HashMap<String, Value>) -> bool {
    let Value::Object(fields) = element else {
        return false;
    };
    predicate
        .iter()
        .all(|(key, expected)| fields.get(key).is_some_and(|actual| actual.equals(expected)))
}

/// `hasLength`: the length of the left side strictly equals the right
/// side. Null and missing collections have length 0; kinds with no length
/// never match.
fn has_length(collection: &Value, expected: &Value) -> bool {
    let length = match collection {
        Value::Array(items) => items.len() as i64,
        Value::String(s) => s.chars().count() as i64,
        Value::Null | Value::Undefined => 0,
        _ => return false,
    };
    expected.as_int() == Some(length)
}
