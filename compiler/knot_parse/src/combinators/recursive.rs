//! Forward-declared rules for recursive grammars.
//!
//! A rule that refers to itself (directly or through other rules) cannot be
//! built bottom-up in one expression. Declare it first, use handles to it
//! while building its body, then define it:
//!
//! ```text
//! let expr = Recursive::declare("expr");
//! let atom = alt((number, seq((open, expr.handle(), close))));
//! expr.define(seq((atom, zero_or_more(seq((plus, expr.handle()))))))?;
//! ```
//!
//! [`Recursive`] owns the rule body. [`RuleRef`] only refers to it, so a
//! body that holds `RuleRef`s to its own rule does not keep itself alive.
//! Cloning a `Recursive` into its own body also works but the grammar is
//! then never freed.

use std::borrow::Cow;
use std::cell::OnceCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::context::ParseContext;
use crate::error::{EngineError, GrammarError};
use crate::parser::{BoxedParser, Parser};

struct Rule<'a, T, V> {
    name: Cow<'static, str>,
    body: OnceCell<BoxedParser<'a, T, V>>,
}

/// A named rule whose body is supplied after construction.
pub struct Recursive<'a, T, V> {
    rule: Rc<Rule<'a, T, V>>,
}

/// A non-owning handle to a [`Recursive`] rule.
pub struct RuleRef<'a, T, V> {
    rule: Weak<Rule<'a, T, V>>,
    name: Cow<'static, str>,
}

impl<'a, T, V> Recursive<'a, T, V> {
    /// Declare a rule with no body yet.
    pub fn declare(name: impl Into<Cow<'static, str>>) -> Self {
        Recursive {
            rule: Rc::new(Rule {
                name: name.into(),
                body: OnceCell::new(),
            }),
        }
    }

    /// Supply the rule's body. A rule can be defined only once.
    pub fn define<P>(&self, body: P) -> Result<(), GrammarError>
    where
        P: Parser<T, V> + 'a,
    {
        self.rule
            .body
            .set(Box::new(body))
            .map_err(|_| GrammarError::RuleRedefined {
                name: self.rule.name.to_string(),
            })
    }

    pub fn name(&self) -> &str {
        &self.rule.name
    }

    pub fn is_defined(&self) -> bool {
        self.rule.body.get().is_some()
    }

    /// A handle for use inside this rule's own body.
    pub fn handle(&self) -> RuleRef<'a, T, V> {
        RuleRef {
            rule: Rc::downgrade(&self.rule),
            name: self.rule.name.clone(),
        }
    }
}

impl<T, V> Clone for Recursive<'_, T, V> {
    fn clone(&self) -> Self {
        Recursive {
            rule: Rc::clone(&self.rule),
        }
    }
}

impl<T, V> Clone for RuleRef<'_, T, V> {
    fn clone(&self) -> Self {
        RuleRef {
            rule: Weak::clone(&self.rule),
            name: self.name.clone(),
        }
    }
}

impl<T, V> fmt::Debug for Recursive<'_, T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recursive")
            .field("name", &self.rule.name)
            .field("defined", &self.is_defined())
            .finish()
    }
}

impl<T, V> fmt::Debug for RuleRef<'_, T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRef").field("name", &self.name).finish()
    }
}

/// Enter `rule`, run its body on a sufficiently large stack, leave.
fn enter<T, V>(rule: &Rule<'_, T, V>, ctx: &mut ParseContext<'_, T, V>) -> bool {
    let Some(body) = rule.body.get() else {
        ctx.halt(EngineError::UndefinedRule {
            name: rule.name.to_string(),
        });
        return false;
    };
    if !ctx.enter_rule() {
        return false;
    }
    trace!(
        rule = %rule.name,
        depth = ctx.depth(),
        position = ctx.position(),
        stack = ?knot_stack::remaining_stack(),
        "enter rule"
    );
    let matched = knot_stack::ensure_sufficient_stack(|| body.parse(ctx));
    ctx.exit_rule();
    matched
}

impl<T, V> Parser<T, V> for Recursive<'_, T, V> {
    fn parse(&self, ctx: &mut ParseContext<'_, T, V>) -> bool {
        enter(&self.rule, ctx)
    }
}

impl<T, V> Parser<T, V> for RuleRef<'_, T, V> {
    fn parse(&self, ctx: &mut ParseContext<'_, T, V>) -> bool {
        match self.rule.upgrade() {
            Some(rule) => enter(&rule, ctx),
            None => {
                ctx.halt(EngineError::UndefinedRule {
                    name: self.name.to_string(),
                });
                false
            }
        }
    }
}
