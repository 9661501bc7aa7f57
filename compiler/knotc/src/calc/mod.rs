//! Arithmetic expressions.
//!
//! ```text
//! expression := sum
//! sum        := product (('+' | '-') product)*
//! product    := unary (('*' | '/') unary)*
//! unary      := '-' unary | atom
//! atom       := number | '(' expression ')'
//! number     := digit+ ('.' digit+)?
//! ```
//!
//! Whitespace is allowed between any two tokens. The parse builds an
//! [`Expr`] tree; evaluation is a separate step so that division by zero can
//! be reported as an error instead of producing an infinity.

use knot_parse::{
    alt, chars, discard, label, literal, map, map_last, one_of, one_or_more, optional,
    parse_complete_with, range, replace, seq, zero_or_more, FromTokens, GrammarError, ParseConfig,
    ParseError, Parser, Recursive,
};
use thiserror::Error;
use tracing::trace;

/// Binary arithmetic operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// A parsed arithmetic expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),
    Neg(Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
}

/// Values on the result stack while parsing an expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Matched source text, before it is interpreted.
    Text(String),
    Op(BinOp),
    Expr(Expr),
}

impl Node {
    fn text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl FromTokens<char> for Node {
    fn from_token(token: &char) -> Self {
        Node::Text(token.to_string())
    }

    fn from_run(tokens: &[char]) -> Self {
        Node::Text(tokens.iter().collect())
    }
}

/// An expression that parsed but cannot be evaluated.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,
}

impl Expr {
    /// Evaluate the expression. Only an exact zero divisor is an error; a
    /// tiny divisor yields a large (possibly infinite) quotient.
    #[allow(clippy::float_cmp, reason = "only an exact zero divisor is rejected")]
    pub fn eval(&self) -> Result<f64, EvalError> {
        match self {
            Expr::Number(value) => Ok(*value),
            Expr::Neg(inner) => Ok(-inner.eval()?),
            Expr::Binary(op, lhs, rhs) => {
                let lhs = lhs.eval()?;
                let rhs = rhs.eval()?;
                match op {
                    BinOp::Add => Ok(lhs + rhs),
                    BinOp::Sub => Ok(lhs - rhs),
                    BinOp::Mul => Ok(lhs * rhs),
                    BinOp::Div if rhs == 0.0 => Err(EvalError::DivisionByZero),
                    BinOp::Div => Ok(lhs / rhs),
                }
            }
        }
    }
}

/// Interpret the digits and point of a number literal.
fn number_node(values: Vec<Node>) -> Node {
    let text: String = values.iter().filter_map(Node::text).collect();
    match text.parse() {
        Ok(value) => Node::Expr(Expr::Number(value)),
        Err(_) => Node::Text(text),
    }
}

fn negate(node: Node) -> Node {
    match node {
        Node::Expr(expr) => Node::Expr(Expr::Neg(Box::new(expr))),
        other => other,
    }
}

/// Fold `operand (op operand)*` left-associatively.
fn fold_binary(values: Vec<Node>) -> Node {
    let mut acc: Option<Expr> = None;
    let mut pending: Option<BinOp> = None;
    for node in values {
        match node {
            Node::Op(op) => pending = Some(op),
            Node::Expr(rhs) => {
                acc = Some(match (acc, pending.take()) {
                    (Some(lhs), Some(op)) => Expr::Binary(op, Box::new(lhs), Box::new(rhs)),
                    _ => rhs,
                });
            }
            Node::Text(_) => {}
        }
    }
    acc.map_or_else(|| Node::Text(String::new()), Node::Expr)
}

/// Build the expression grammar.
///
/// Matches one expression with optional surrounding whitespace and pushes
/// a single [`Node::Expr`].
pub fn grammar() -> Result<impl Parser<char, Node>, GrammarError> {
    let ws = || discard(zero_or_more(one_of([' ', '\t', '\r', '\n'])));
    let digits = || range('0', '9').map(one_or_more);
    let op = |token: char, kind: BinOp| replace(literal(token), Node::Op(kind));

    let expression = Recursive::declare("expression");
    let unary = Recursive::declare("unary");
    let product = Recursive::declare("product");

    let number = label(
        map(
            seq((digits()?, optional(seq((literal('.'), digits()?))))),
            number_node,
        ),
        "number",
    );
    let group = seq((
        discard(literal('(')),
        ws(),
        expression.handle(),
        ws(),
        discard(literal(')')),
    ));
    let atom = alt((number, group));

    unary.define(alt((
        map_last(seq((discard(literal('-')), ws(), unary.handle())), negate),
        atom,
    )))?;

    product.define(map(
        seq((
            unary.clone(),
            zero_or_more(seq((
                ws(),
                alt((op('*', BinOp::Mul), op('/', BinOp::Div))),
                ws(),
                unary.clone(),
            ))),
        )),
        fold_binary,
    ))?;

    expression.define(map(
        seq((
            product.clone(),
            zero_or_more(seq((
                ws(),
                alt((op('+', BinOp::Add), op('-', BinOp::Sub))),
                ws(),
                product.clone(),
            ))),
        )),
        fold_binary,
    ))?;

    trace!("calc grammar built");
    Ok(seq((ws(), expression, ws())))
}

/// Why an expression could not be evaluated.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CalcError {
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error("expression produced no value")]
    NoValue,
}

/// Parse `source` into an expression tree.
pub fn parse(source: &str, config: ParseConfig) -> Result<Expr, CalcError> {
    let grammar = grammar()?;
    let mut values = parse_complete_with(&grammar, &chars(source), config)?;
    match values.pop() {
        Some(Node::Expr(expr)) if values.is_empty() => Ok(expr),
        _ => Err(CalcError::NoValue),
    }
}

/// Parse and evaluate `source`.
pub fn evaluate(source: &str, config: ParseConfig) -> Result<f64, CalcError> {
    let expr = parse(source, config)?;
    Ok(expr.eval()?)
}
