// tests/grammar_graph_tests.rs
//
// Structural behavior of parser graphs: forward references, generic tree
// walking, and the single sanctioned mutation (child replacement).

use weft::primitives::{char_of, failure, letter};
use weft::{choice_of, Context, Value};

// ---
// Setable forward references
// ---

#[test]
fn test_setable_enables_recursive_grammar() {
    // expr := 'x' | '(' expr ')'
    let expr = failure("expression expected").setable();
    let parens = expr.between(&char_of('('), &char_of(')'));
    expr.set(&char_of('x').or(&[parens]));

    let grammar = expr.end();
    assert!(grammar.parse_text("x").is_success());
    assert!(grammar.parse_text("(x)").is_success());
    assert!(grammar.parse_text("(((x)))").is_success());
    assert!(grammar.parse_text("((x)").is_failure());
    assert!(grammar.parse_text("()").is_failure());
}

#[test]
fn test_setable_supports_mutual_recursion() {
    // a := '0' | '1' b      b := '2' a
    let a = failure("a expected").setable();
    let b = failure("b expected").setable();
    a.set(&char_of('0').or(&[char_of('1').seq(&[b.clone()])]));
    b.set(&char_of('2').seq(&[a.clone()]));

    let grammar = a.end();
    assert!(grammar.parse_text("0").is_success());
    assert!(grammar.parse_text("120").is_success());
    assert!(grammar.parse_text("12120").is_success());
    assert!(grammar.parse_text("12").is_failure());
}

#[test]
fn test_setable_identity_is_stable_across_set() {
    let cell = failure("unset").setable();
    let before = cell.clone();
    cell.set(&char_of('a'));
    assert!(cell.identical(&before));
    assert!(cell.parse_text("a").is_success());
}

#[test]
fn test_set_is_a_no_op_on_other_variants() {
    let plain = char_of('a');
    plain.set(&char_of('b'));
    assert!(plain.parse_text("a").is_success());
    assert!(plain.parse_text("b").is_failure());
}

// ---
// Children and replace
// ---

#[test]
fn test_leaf_has_no_children() {
    assert!(char_of('a').children().is_empty());
}

#[test]
fn test_children_expose_direct_structure() {
    let a = char_of('a');
    let b = char_of('b');
    let seq = a.seq(&[b.clone()]);
    let children = seq.children();
    assert_eq!(children.len(), 2);
    assert!(children[0].identical(&a));
    assert!(children[1].identical(&b));
}

#[test]
fn test_wrapped_is_identity_and_rewrite_anchor() {
    let a = char_of('a');
    let anchor = a.wrapped();
    assert_eq!(anchor.parse_text("a"), a.parse_text("a"));

    let b = char_of('b');
    anchor.replace(&a, &b);
    assert!(anchor.parse_text("b").is_success());
    assert!(anchor.parse_text("a").is_failure());
}

#[test]
fn test_replace_rewrites_exactly_one_reference() {
    let a = char_of('a');
    let b = char_of('b');
    // Both slots reference the same node.
    let twice = a.seq(&[a.clone()]);
    twice.replace(&a, &b);

    // Only the first slot was rewritten.
    assert!(twice.parse_text("ba").is_success());
    assert!(twice.parse_text("bb").is_failure());
    assert!(twice.parse_text("aa").is_failure());
}

#[test]
fn test_replace_is_a_no_op_for_non_children() {
    let a = char_of('a');
    let b = char_of('b');
    let seq = a.seq(&[b]);
    let stranger = char_of('z');
    seq.replace(&stranger, &char_of('q'));
    assert!(seq.parse_text("ab").is_success());
}

#[test]
fn test_replace_on_choice_branch() {
    let a = char_of('a');
    let b = char_of('b');
    let either = choice_of(vec![a.clone(), b]);
    either.replace(&a, &char_of('c'));
    assert!(either.parse_text("c").is_success());
    assert!(either.parse_text("a").is_failure());
}

// ---
// Purity and reuse
// ---

#[test]
fn test_kind_is_uniform_across_leaves() {
    // Generic grammar analysis sees one leaf variant; the matcher name is
    // exposed separately.
    let a = char_of('a');
    let any = weft::primitives::any();
    assert_eq!(a.kind(), "leaf");
    assert_eq!(any.kind(), "leaf");
    assert_eq!(a.leaf_name(), Some("char"));
    assert_eq!(any.leaf_name(), Some("any"));

    let seq = a.seq(&[any]);
    assert_eq!(seq.kind(), "sequence");
    assert_eq!(seq.leaf_name(), None);
}

#[test]
fn test_parsing_is_deterministic() {
    let grammar = letter().plus().flatten().end();
    let first = grammar.parse_text("abc");
    let second = grammar.parse_text("abc");
    assert_eq!(first, second);
}

#[test]
fn test_graph_is_reusable_across_inputs() {
    let grammar = letter().separated_by(&char_of(','));
    assert!(grammar.parse_text("a,b").is_success());
    assert!(grammar.parse_text("1").is_failure());
    assert!(grammar.parse_text("x,y,z").is_success());
}

#[test]
fn test_parse_from_offset_context() {
    let grammar = letter().plus().flatten();
    let context = Context::new("12ab").at(2);
    let result = grammar.parse(context);
    assert_eq!(result.ok(), Some(&Value::Text("ab".into())));
    assert_eq!(result.position(), 4);
}

#[test]
fn test_external_leaf_matcher_conforms_to_the_contract() {
    // Anything implementing parse(context) -> result can join a graph.
    let shout = weft::Parser::leaf("shout", |context| {
        let rest = context.rest();
        let upper: String = rest
            .chars()
            .take_while(|c| c.is_ascii_uppercase())
            .collect();
        if upper.is_empty() {
            context.failure("uppercase expected")
        } else {
            let stop = context.position() + upper.len();
            context.success_at(Value::Text(upper), stop)
        }
    });

    let grammar = shout.seq(&[char_of('!')]);
    assert!(grammar.parse_text("HEY!").is_success());
    assert!(grammar.parse_text("hey!").is_failure());
}
