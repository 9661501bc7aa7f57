#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]

use super::*;
use crate::chars;
use crate::config::ParseConfig;
use crate::error::{EngineError, GrammarError, ParseFailure};
use crate::primitives::{any, literal, predicate, string};
use pretty_assertions::assert_eq;

type Ctx<'a> = ParseContext<'a, char, String>;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_string()).collect()
}

/// Violates the rollback contract: advances and pushes, then fails.
fn leaky(ctx: &mut Ctx<'_>) -> bool {
    if !ctx.done() {
        ctx.advance(1);
    }
    ctx.push("junk".into());
    false
}

/// Matches without consuming anything.
fn empty(ctx: &mut Ctx<'_>) -> bool {
    ctx.push("ε".into());
    true
}

// === Ordered choice ===

#[test]
fn test_alt_picks_first_matching_alternative() {
    let input = chars("ab");
    let mut ctx = Ctx::new(&input);

    assert!(alt((literal('x'), literal('a'))).parse(&mut ctx));
    assert_eq!(ctx.position(), 1);
    assert_eq!(ctx.results(), strings(&["a"]).as_slice());
}

#[test]
fn test_alt_is_first_match_not_longest_match() {
    let input = chars("abc");
    let mut ctx = Ctx::new(&input);

    let grammar = alt((string("a").unwrap(), string("abc").unwrap()));
    assert!(grammar.parse(&mut ctx));
    assert_eq!(ctx.position(), 1);
    assert_eq!(ctx.results(), strings(&["a"]).as_slice());
}

#[test]
fn test_alt_all_fail_leaves_context_unchanged() {
    let input = chars("q");
    let mut ctx = Ctx::new(&input);

    assert!(!alt((literal('x'), literal('y'), literal('z'))).parse(&mut ctx));
    assert_eq!(ctx.position(), 0);
    assert!(ctx.results().is_empty());
    assert_eq!(ctx.error(), Some(&ParseFailure::expected(0, "'z'")));
}

#[test]
fn test_alt_fails_fast_when_done() {
    let input: Vec<char> = Vec::new();
    let mut ctx = Ctx::new(&input);

    // `empty` would succeed, but alt must not try any child
    assert!(!alt((empty,)).parse(&mut ctx));
    assert!(ctx.results().is_empty());
}

#[test]
fn test_alt_discards_residue_of_contract_breaking_child() {
    let input = chars("ab");
    let mut ctx = Ctx::new(&input);

    assert!(alt((leaky, literal('a'))).parse(&mut ctx));
    assert_eq!(ctx.position(), 1);
    assert_eq!(ctx.results(), strings(&["a"]).as_slice());

    let mut ctx = Ctx::new(&input);
    assert!(!alt((leaky, literal('z'))).parse(&mut ctx));
    assert_eq!(ctx.position(), 0);
    assert!(ctx.results().is_empty());
}

#[test]
fn test_alt_list_runtime_alternatives() {
    let keywords: Vec<BoxedParser<'_, char, String>> = ["if", "in", "i"]
        .iter()
        .map(|kw| string(kw).unwrap().boxed())
        .collect();
    let grammar = alt_list(keywords).unwrap();

    let input = chars("in");
    let mut ctx = Ctx::new(&input);
    assert!(grammar.parse(&mut ctx));
    assert_eq!(ctx.results(), strings(&["in"]).as_slice());
}

#[test]
fn test_empty_lists_are_grammar_errors() {
    let none: Vec<BoxedParser<'_, char, String>> = Vec::new();
    assert_eq!(alt_list(none).err(), Some(GrammarError::EmptyAlternatives));

    let none: Vec<BoxedParser<'_, char, String>> = Vec::new();
    assert_eq!(seq_list(none).err(), Some(GrammarError::EmptySequence));
}

#[test]
fn test_alt_discard_drops_values() {
    let input = chars("b");
    let mut ctx = Ctx::new(&input);

    assert!(alt_discard((literal('a'), literal('b'))).parse(&mut ctx));
    assert_eq!(ctx.position(), 1);
    assert!(ctx.results().is_empty());
}

// === Sequence ===

#[test]
fn test_seq_collects_values_in_order() {
    let input = chars("abc");
    let mut ctx = Ctx::new(&input);

    assert!(seq((literal('a'), literal('b'), literal('c'))).parse(&mut ctx));
    assert_eq!(ctx.position(), 3);
    assert_eq!(ctx.results(), strings(&["a", "b", "c"]).as_slice());
}

#[test]
fn test_seq_failure_rolls_back_everything() {
    let input = chars("ab");
    let mut ctx = Ctx::new(&input);

    assert!(!seq((literal('a'), literal('c'))).parse(&mut ctx));
    assert_eq!(ctx.position(), 0);
    assert!(ctx.results().is_empty());
}

#[test]
fn test_seq_third_child_failure_is_atomic() {
    let input = chars("abx");
    let mut ctx = Ctx::new(&input);
    ctx.push("before".into());

    assert!(!seq((literal('a'), literal('b'), literal('c'))).parse(&mut ctx));
    assert_eq!(ctx.position(), 0);
    assert_eq!(ctx.results(), strings(&["before"]).as_slice());
    assert_eq!(ctx.error(), Some(&ParseFailure::expected(2, "'c'")));
}

#[test]
fn test_seq_runs_out_of_input() {
    let input = chars("a");
    let mut ctx = Ctx::new(&input);

    assert!(!seq((literal('a'), literal('b'))).parse(&mut ctx));
    assert_eq!(ctx.position(), 0);
    assert_eq!(ctx.error(), Some(&ParseFailure::exhausted(1)));
}

#[test]
fn test_seq_list_and_seq_discard() {
    let parts: Vec<BoxedParser<'_, char, String>> =
        vec![literal('(').boxed(), any().boxed(), literal(')').boxed()];
    let grammar = seq_list(parts).unwrap();

    let input = chars("(x)");
    let mut ctx = Ctx::new(&input);
    assert!(grammar.parse(&mut ctx));
    assert_eq!(ctx.results(), strings(&["(", "x", ")"]).as_slice());

    let mut ctx = Ctx::new(&input);
    assert!(seq_discard((literal('('), any(), literal(')'))).parse(&mut ctx));
    assert_eq!(ctx.position(), 3);
    assert!(ctx.results().is_empty());
}

// === Repetition ===

#[test]
fn test_zero_or_more_never_fails() {
    let input = chars("bbb");
    let mut ctx = Ctx::new(&input);

    assert!(zero_or_more(literal('a')).parse(&mut ctx));
    assert_eq!(ctx.position(), 0);
    assert!(ctx.results().is_empty());
}

#[test]
fn test_zero_or_more_at_end_of_input_succeeds() {
    let input: Vec<char> = Vec::new();
    let mut ctx = Ctx::new(&input);
    assert!(zero_or_more(literal('a')).parse(&mut ctx));
    assert!(!one_or_more(literal('a')).parse(&mut ctx));
}

#[test]
fn test_zero_or_more_consumes_greedily() {
    let input = chars("aaab");
    let mut ctx = Ctx::new(&input);

    assert!(zero_or_more(literal('a')).parse(&mut ctx));
    assert_eq!(ctx.position(), 3);
    assert_eq!(ctx.results(), strings(&["a", "a", "a"]).as_slice());
}

#[test]
fn test_one_or_more_requires_a_match() {
    let input = chars("b");
    let mut ctx = Ctx::new(&input);
    assert!(!one_or_more(literal('a')).parse(&mut ctx));
    assert_eq!(ctx.position(), 0);
}

#[test]
fn test_repetition_drops_failed_partial_iteration() {
    // The third iteration matches 'a' then fails on 'b'
    let input = chars("ababa!");
    let mut ctx = Ctx::new(&input);

    assert!(one_or_more(seq((literal('a'), literal('b')))).parse(&mut ctx));
    assert_eq!(ctx.position(), 4);
    assert_eq!(ctx.results(), strings(&["a", "b", "a", "b"]).as_slice());
}

#[test]
fn test_repeat_bounds() {
    let input = chars("aaaa");

    let mut ctx = Ctx::new(&input);
    assert!(repeat(literal('a'), 2, 3).unwrap().parse(&mut ctx));
    assert_eq!(ctx.position(), 3);

    let mut ctx = Ctx::new(&input);
    assert!(!repeat(literal('a'), 5, 6).unwrap().parse(&mut ctx));
    assert_eq!(ctx.position(), 0);
    assert!(ctx.results().is_empty());

    let mut ctx = Ctx::new(&input);
    assert!(repeat(literal('a'), 0, 0).unwrap().parse(&mut ctx));
    assert_eq!(ctx.position(), 0);

    assert_eq!(
        repeat(literal('a'), 3, 1).err().map(|e| e.to_string()),
        Some("repetition minimum 3 exceeds maximum 1".to_string())
    );
}

#[test]
fn test_zero_width_repetition_terminates() {
    let input = chars("xyz");
    let mut ctx = Ctx::new(&input);

    assert!(zero_or_more(empty).parse(&mut ctx));
    assert_eq!(ctx.position(), 0);
    assert!(ctx.results().is_empty());

    // An empty-matching child satisfies any minimum
    assert!(at_least(empty, 3).parse(&mut ctx));
    assert!(ctx.results().is_empty());
}

#[test]
fn test_nullable_child_satisfies_minimum_at_end_of_input() {
    let rejected = chars("a");
    let mut ctx = Ctx::new(&rejected);
    assert!(one_or_more(optional(literal('x'))).parse(&mut ctx));
    assert_eq!(ctx.position(), 0);

    let empty: Vec<char> = Vec::new();
    let mut ctx = Ctx::new(&empty);
    assert!(one_or_more(optional(literal('x'))).parse(&mut ctx));
    assert!(separated(optional(literal('x')), literal(','), 1).parse(&mut ctx));
    assert!(ctx.results().is_empty());

    // A child that cannot match empty still fails, and says why
    assert!(!one_or_more(literal('x')).parse(&mut ctx));
    assert_eq!(ctx.error(), Some(&ParseFailure::exhausted(0)));
}

#[test]
fn test_repetition_limit_allows_exactly_limit_matches() {
    let input = chars("aaaa");
    let config = ParseConfig::default().with_max_repetitions(4);
    let mut ctx = Ctx::with_config(&input, config);

    assert!(zero_or_more(literal('a')).parse(&mut ctx));
    assert!(ctx.halted().is_none());
}

#[test]
fn test_repetition_limit_halts() {
    let input = chars("aaaaaa");
    let config = ParseConfig::default().with_max_repetitions(4);
    let mut ctx = Ctx::with_config(&input, config);

    assert!(!zero_or_more(literal('a')).parse(&mut ctx));
    assert_eq!(ctx.position(), 0);
    assert!(ctx.results().is_empty());
    assert_eq!(
        ctx.halted(),
        Some(&EngineError::RepetitionLimit {
            limit: 4,
            position: 5
        })
    );
}

#[test]
fn test_separated_list() {
    let input = chars("a,a,a,");
    let mut ctx = Ctx::new(&input);

    let list = separated(literal('a'), discard(literal(',')), 1);
    assert!(list.parse(&mut ctx));
    // Trailing separator is left for the caller
    assert_eq!(ctx.position(), 5);
    assert_eq!(ctx.results(), strings(&["a", "a", "a"]).as_slice());
}

#[test]
fn test_separated_minimum() {
    let input = chars("a;b");
    let mut ctx = Ctx::new(&input);

    assert!(!separated(literal('a'), literal(','), 2).parse(&mut ctx));
    assert_eq!(ctx.position(), 0);
    assert!(separated(literal('x'), literal(','), 0).parse(&mut ctx));
    assert_eq!(ctx.position(), 0);
}

// === Optional ===

#[test]
fn test_optional_is_noop_on_failure() {
    let input = chars("b");
    let mut ctx = Ctx::new(&input);

    assert!(optional(literal('a')).parse(&mut ctx));
    assert_eq!(ctx.position(), 0);
    assert!(ctx.results().is_empty());

    assert!(optional(literal('b')).parse(&mut ctx));
    assert_eq!(ctx.position(), 1);
    assert_eq!(ctx.results(), strings(&["b"]).as_slice());

    // Still succeeds at end of input
    assert!(optional(literal('c')).parse(&mut ctx));
}

// === Discard ===

#[test]
fn test_discard_keeps_outcome_and_advance() {
    let input = chars("  x");
    let ws = || zero_or_more(literal(' '));

    let mut plain = Ctx::new(&input);
    let mut wrapped = Ctx::new(&input);
    assert_eq!(ws().parse(&mut plain), discard(ws()).parse(&mut wrapped));
    assert_eq!(plain.position(), wrapped.position());
    assert_eq!(plain.results().len(), 2);
    assert!(wrapped.results().is_empty());

    assert!(!discard(literal('y')).parse(&mut wrapped));
    assert_eq!(wrapped.position(), 2);
}

#[test]
fn test_discard_keeps_earlier_values() {
    let input = chars("a b");
    let mut ctx = Ctx::new(&input);

    let grammar = seq((literal('a'), discard(literal(' ')), literal('b')));
    assert!(grammar.parse(&mut ctx));
    assert_eq!(ctx.results(), strings(&["a", "b"]).as_slice());
}

// === Lookahead ===

#[test]
fn test_peek_does_not_consume() {
    let input = chars("ab");
    let mut ctx = Ctx::new(&input);

    assert!(peek(seq((literal('a'), literal('b')))).parse(&mut ctx));
    assert_eq!(ctx.position(), 0);
    assert!(ctx.results().is_empty());
    assert!(!peek(literal('b')).parse(&mut ctx));
}

#[test]
fn test_not_inverts_without_consuming() {
    let input = chars("a");
    let mut ctx = Ctx::new(&input);

    assert!(not(literal('b')).parse(&mut ctx));
    assert!(!not(literal('a')).parse(&mut ctx));
    assert_eq!(ctx.position(), 0);
    assert!(ctx.results().is_empty());

    ctx.advance(1);
    // End of input
    assert!(not(any()).parse(&mut ctx));
}

#[test]
fn test_keyword_boundary_with_not() {
    let ident_char = predicate(|c: &char| c.is_ascii_alphanumeric());
    let keyword = seq((string("if").unwrap(), not(ident_char)));

    let input = chars("iffy");
    let mut ctx = Ctx::new(&input);
    assert!(!keyword.parse(&mut ctx));

    let input = chars("if x");
    let mut ctx = Ctx::new(&input);
    assert!(keyword.parse(&mut ctx));
    assert_eq!(ctx.position(), 2);
}

// === Label ===

#[test]
fn test_label_names_failure() {
    let input = chars("?");
    let mut ctx = Ctx::new(&input);

    let digit = label(predicate(|c: &char| c.is_ascii_digit()), "digit");
    assert!(!digit.parse(&mut ctx));
    assert_eq!(ctx.error(), Some(&ParseFailure::expected(0, "digit")));
}

#[test]
fn test_label_keeps_deeper_failure() {
    let input = chars("(1");
    let mut ctx = Ctx::new(&input);

    let group = label(seq((literal('('), literal('1'), literal(')'))), "group");
    assert!(!group.parse(&mut ctx));
    assert_eq!(ctx.error(), Some(&ParseFailure::exhausted(2)));
}

// === Recursion ===

/// balanced := '(' balanced* ')'
fn balanced() -> Recursive<'static, char, String> {
    let rule = Recursive::declare("balanced");
    rule.define(seq((literal('('), zero_or_more(rule.handle()), literal(')'))))
        .unwrap();
    rule
}

#[test]
fn test_recursive_rule() {
    let grammar = balanced();

    let input = chars("(()(()))");
    let mut ctx = Ctx::new(&input);
    assert!(grammar.parse(&mut ctx));
    assert!(ctx.done());

    let input = chars("(()");
    let mut ctx = Ctx::new(&input);
    assert!(!grammar.parse(&mut ctx));
    assert_eq!(ctx.position(), 0);
    assert_eq!(ctx.depth(), 0);
}

#[test]
fn test_deep_nesting_grows_stack() {
    let grammar = balanced();
    let depth = 2_000;
    let text = format!("{}{}", "(".repeat(depth), ")".repeat(depth));
    let input = chars(&text);
    let mut ctx = Ctx::new(&input);

    assert!(grammar.parse(&mut ctx));
    assert!(ctx.done());
}

#[test]
fn test_left_recursion_hits_depth_limit() {
    // expr := expr '+' 'a' | 'a'
    let expr: Recursive<'_, char, String> = Recursive::declare("expr");
    expr.define(alt((
        seq((expr.handle(), literal('+'), literal('a'))),
        literal('a'),
    )))
    .unwrap();

    let input = chars("a+a");
    let mut ctx = Ctx::with_config(&input, ParseConfig::default().with_max_depth(64));
    assert!(!expr.parse(&mut ctx));
    assert_eq!(ctx.position(), 0);
    assert_eq!(
        ctx.halted(),
        Some(&EngineError::RecursionLimit {
            limit: 64,
            position: 0
        })
    );
}

#[test]
fn test_undefined_rule_halts() {
    let rule: Recursive<'_, char, String> = Recursive::declare("later");
    let input = chars("a");
    let mut ctx = Ctx::new(&input);

    assert!(!rule.is_defined());
    assert!(!optional(rule.clone()).parse(&mut ctx));
    assert_eq!(
        ctx.halted(),
        Some(&EngineError::UndefinedRule {
            name: "later".into()
        })
    );
}

#[test]
fn test_dropped_rule_reference_halts() {
    let handle = {
        let rule: Recursive<'_, char, String> = Recursive::declare("gone");
        rule.define(literal('a')).unwrap();
        rule.handle()
    };
    let input = chars("a");
    let mut ctx = Ctx::new(&input);
    assert!(!handle.parse(&mut ctx));
    assert!(ctx.halted().is_some());
}

#[test]
fn test_rule_defined_twice_is_error() {
    let rule: Recursive<'_, char, String> = Recursive::declare("twice");
    rule.define(literal('a')).unwrap();
    assert_eq!(
        rule.define(literal('b')),
        Err(GrammarError::RuleRedefined {
            name: "twice".into()
        })
    );
    assert_eq!(rule.name(), "twice");
}

// === Halting ===

#[test]
fn test_halt_propagates_through_wrappers() {
    let input = chars("a");
    let mut ctx = Ctx::new(&input);
    ctx.halt(EngineError::UndefinedRule { name: "x".into() });

    assert!(!optional(literal('a')).parse(&mut ctx));
    assert!(!zero_or_more(literal('a')).parse(&mut ctx));
    assert!(!not(literal('b')).parse(&mut ctx));
    assert!(!alt((empty,)).parse(&mut ctx));
    assert!(!seq((empty,)).parse(&mut ctx));
    assert!(ctx.results().is_empty());
}
