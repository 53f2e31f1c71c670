//! The parser abstraction and its evaluation core.
//!
//! A [`Parser`] is a cheap-to-clone handle onto a node of an immutable
//! composite graph. The node set is a closed tagged enum; `parse` is the
//! single polymorphic operation over it. Two handles are the same parser
//! exactly when they point at the same node, which is what `replace` and
//! setable forward references key on.
//!
//! Graphs are built once by composing the factories in
//! [`combinators`](crate::combinators) and never mutate afterwards, with
//! one exception: a setable's target slot may be redirected during grammar
//! assembly (via [`Parser::set`] or [`Parser::replace`]). Callers must not
//! mutate a graph while a parse over it is in flight.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::context::{Context, ParseResult};
use crate::token::{Span, Token};
use crate::value::Value;

/// A leaf matcher: the external collaborator seam. Anything conforming to
/// `parse(context) -> result` can participate in a graph.
pub(crate) type LeafFn = dyn for<'s> Fn(Context<'s>) -> ParseResult;

/// A semantic action applied to a successful parse's value.
pub(crate) type ActionFn = dyn Fn(Value) -> Value;

/// One node of a parser graph.
pub(crate) enum Node {
    Leaf {
        name: &'static str,
        matcher: Rc<LeafFn>,
    },
    Sequence {
        children: Vec<Parser>,
    },
    Choice {
        children: Vec<Parser>,
    },
    Repeating {
        inner: Parser,
        min: usize,
        max: usize,
    },
    Optional {
        inner: Parser,
        default: Value,
    },
    And {
        inner: Parser,
    },
    Not {
        inner: Parser,
        message: String,
    },
    Action {
        inner: Parser,
        action: Rc<ActionFn>,
    },
    Token {
        inner: Parser,
    },
    Flatten {
        inner: Parser,
    },
    Trimming {
        inner: Parser,
        trimmer: Parser,
    },
    Delegate {
        inner: Parser,
    },
    Setable {
        target: Parser,
    },
    EndOfInput {
        inner: Parser,
        message: String,
    },
}

/// A handle onto a node of a parser graph.
#[derive(Clone)]
pub struct Parser {
    node: Rc<RefCell<Node>>,
}

impl Parser {
    pub(crate) fn from_node(node: Node) -> Self {
        Self {
            node: Rc::new(RefCell::new(node)),
        }
    }

    /// Wraps an external leaf matcher into a parser. The `name` is only
    /// used for debug output.
    pub fn leaf<F>(name: &'static str, matcher: F) -> Self
    where
        F: for<'s> Fn(Context<'s>) -> ParseResult + 'static,
    {
        Self::from_node(Node::Leaf {
            name,
            matcher: Rc::new(matcher),
        })
    }

    /// Applies the parser to the given context. Pure: the outcome is a
    /// function of the graph and the context alone.
    pub fn parse(&self, context: Context<'_>) -> ParseResult {
        match &*self.node.borrow() {
            Node::Leaf { matcher, .. } => matcher(context),
            Node::Sequence { children } => parse_sequence(children, context),
            Node::Choice { children } => parse_choice(children, context),
            Node::Repeating { inner, min, max } => parse_repeating(inner, *min, *max, context),
            Node::Optional { inner, default } => match inner.parse(context) {
                success @ ParseResult::Success { .. } => success,
                ParseResult::Failure { .. } => context.success(default.clone()),
            },
            Node::And { inner } => match inner.parse(context) {
                ParseResult::Success { value, .. } => context.success(value),
                ParseResult::Failure { message, .. } => context.failure(message),
            },
            Node::Not { inner, message } => match inner.parse(context) {
                ParseResult::Success { .. } => context.failure(message.clone()),
                ParseResult::Failure { .. } => context.success(Value::Nil),
            },
            Node::Action { inner, action } => match inner.parse(context) {
                ParseResult::Success { value, position } => {
                    context.success_at(action(value), position)
                }
                failure => failure,
            },
            Node::Token { inner } => match inner.parse(context) {
                ParseResult::Success { value, position } => {
                    let token = Token::new(Span::new(context.position(), position), value);
                    context.success_at(token.into(), position)
                }
                failure => failure,
            },
            Node::Flatten { inner } => match inner.parse(context) {
                ParseResult::Success { position, .. } => {
                    let text = &context.input()[context.position()..position];
                    context.success_at(Value::Text(text.to_string()), position)
                }
                failure => failure,
            },
            Node::Trimming { inner, trimmer } => parse_trimming(inner, trimmer, context),
            Node::Delegate { inner } | Node::Setable { target: inner } => inner.parse(context),
            Node::EndOfInput { inner, message } => match inner.parse(context) {
                ParseResult::Success { value, position } => {
                    if position >= context.input().len() {
                        context.success_at(value, position)
                    } else {
                        context.failure_at(message.clone(), position)
                    }
                }
                failure => failure,
            },
        }
    }

    /// Applies the parser to `input` from position 0.
    pub fn parse_text(&self, input: &str) -> ParseResult {
        self.parse(Context::new(input))
    }

    /// Returns handles onto the direct structural children of this parser.
    /// Leaves have none.
    pub fn children(&self) -> Vec<Parser> {
        match &*self.node.borrow() {
            Node::Leaf { .. } => Vec::new(),
            Node::Sequence { children } | Node::Choice { children } => children.clone(),
            Node::Repeating { inner, .. }
            | Node::Optional { inner, .. }
            | Node::And { inner }
            | Node::Not { inner, .. }
            | Node::Action { inner, .. }
            | Node::Token { inner }
            | Node::Flatten { inner }
            | Node::Delegate { inner }
            | Node::EndOfInput { inner, .. } => vec![inner.clone()],
            Node::Trimming { inner, trimmer } => vec![inner.clone(), trimmer.clone()],
            Node::Setable { target } => vec![target.clone()],
        }
    }

    /// Rewrites exactly one direct child reference from `source` to
    /// `target`. No-op if `source` is not a direct child. This and
    /// [`Parser::set`] are the only sanctioned mutations of a graph.
    pub fn replace(&self, source: &Parser, target: &Parser) {
        let mut node = self.node.borrow_mut();
        for slot in child_slots(&mut node) {
            if slot.identical(source) {
                *slot = target.clone();
                return;
            }
        }
    }

    /// Redirects a setable's target. No-op on any other variant. The
    /// setable's own identity is unaffected, so references to it held
    /// elsewhere in the graph stay valid.
    pub fn set(&self, target: &Parser) {
        if let Node::Setable { target: slot } = &mut *self.node.borrow_mut() {
            *slot = target.clone();
        }
    }

    /// True when both handles point at the same graph node.
    pub fn identical(&self, other: &Parser) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }

    /// The variant name of this node, for debugging and grammar analysis.
    /// Every leaf reports "leaf"; its matcher name is available through
    /// [`Parser::leaf_name`].
    pub fn kind(&self) -> &'static str {
        match &*self.node.borrow() {
            Node::Leaf { .. } => "leaf",
            Node::Sequence { .. } => "sequence",
            Node::Choice { .. } => "choice",
            Node::Repeating { .. } => "repeating",
            Node::Optional { .. } => "optional",
            Node::And { .. } => "and",
            Node::Not { .. } => "not",
            Node::Action { .. } => "action",
            Node::Token { .. } => "token",
            Node::Flatten { .. } => "flatten",
            Node::Trimming { .. } => "trimming",
            Node::Delegate { .. } => "delegate",
            Node::Setable { .. } => "setable",
            Node::EndOfInput { .. } => "end-of-input",
        }
    }

    /// The matcher name a leaf was constructed with; `None` for composite
    /// nodes.
    pub fn leaf_name(&self) -> Option<&'static str> {
        match &*self.node.borrow() {
            Node::Leaf { name, .. } => Some(*name),
            _ => None,
        }
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Shallow on purpose: setable graphs may be cyclic.
        match self.leaf_name() {
            Some(name) => write!(f, "Parser({})", name),
            None => write!(f, "Parser({})", self.kind()),
        }
    }
}

/// Mutable references to every direct child slot of a node.
fn child_slots(node: &mut Node) -> Vec<&mut Parser> {
    match node {
        Node::Leaf { .. } => Vec::new(),
        Node::Sequence { children } | Node::Choice { children } => children.iter_mut().collect(),
        Node::Repeating { inner, .. }
        | Node::Optional { inner, .. }
        | Node::And { inner }
        | Node::Not { inner, .. }
        | Node::Action { inner, .. }
        | Node::Token { inner }
        | Node::Flatten { inner }
        | Node::Delegate { inner }
        | Node::EndOfInput { inner, .. } => vec![inner],
        Node::Trimming { inner, trimmer } => vec![inner, trimmer],
        Node::Setable { target } => vec![target],
    }
}

// ============================================================================
// STATE MACHINES
// ============================================================================

/// Children in fixed order, each threaded the position the previous one
/// returned. The first failure aborts; later children are never attempted.
fn parse_sequence(children: &[Parser], context: Context<'_>) -> ParseResult {
    let mut current = context;
    let mut values = Vec::with_capacity(children.len());
    for child in children {
        match child.parse(current) {
            ParseResult::Success { value, position } => {
                values.push(value);
                current = context.at(position);
            }
            failure => return failure,
        }
    }
    context.success_at(Value::List(values), current.position())
}

/// Children in fixed order, each attempted from the original position. The
/// first success wins. When every branch fails, the failure at the deepest
/// position wins; ties keep the earliest-attempted branch.
fn parse_choice(children: &[Parser], context: Context<'_>) -> ParseResult {
    let mut best: Option<ParseResult> = None;
    for child in children {
        let result = child.parse(context);
        if result.is_success() {
            return result;
        }
        let deeper = match &best {
            Some(failure) => result.position() > failure.position(),
            None => true,
        };
        if deeper {
            best = Some(result);
        }
    }
    best.unwrap_or_else(|| context.failure("empty choice"))
}

/// Greedy bounded repetition. Each accepted repetition must strictly
/// advance the position; a successful zero-width match terminates the loop
/// so that unbounded repetition of nullable parsers cannot hang. Falling
/// short of `min` fails at the start of the failed attempt.
fn parse_repeating(inner: &Parser, min: usize, max: usize, context: Context<'_>) -> ParseResult {
    let mut current = context;
    let mut values = Vec::new();
    while values.len() < max {
        match inner.parse(current) {
            ParseResult::Success { value, position } => {
                if position == current.position() {
                    if values.len() < min {
                        return current.failure("repetition did not advance");
                    }
                    break;
                }
                values.push(value);
                current = context.at(position);
            }
            ParseResult::Failure { message, .. } => {
                if values.len() < min {
                    return current.failure(message);
                }
                break;
            }
        }
    }
    context.success_at(Value::List(values), current.position())
}

/// Consumes and discards trimmer matches before and after the inner parser.
fn parse_trimming(inner: &Parser, trimmer: &Parser, context: Context<'_>) -> ParseResult {
    let before = skip_trimmer(trimmer, context);
    match inner.parse(before) {
        ParseResult::Success { value, position } => {
            let after = skip_trimmer(trimmer, context.at(position));
            context.success_at(value, after.position())
        }
        failure => failure,
    }
}

fn skip_trimmer<'s>(trimmer: &Parser, context: Context<'s>) -> Context<'s> {
    let mut current = context;
    loop {
        match trimmer.parse(current) {
            ParseResult::Success { position, .. } if position > current.position() => {
                current = current.at(position);
            }
            _ => return current,
        }
    }
}
