//! Sequential evaluation of binding chains
//!
//! A chain is an ordered list of `(name, thunk)` pairs. Each thunk sees the
//! names bound before it. Evaluation stops at the first failed value; thunks
//! after it never run.

use std::borrow::Cow;

use failwise_common::{on_binding, on_short_circuit};

use crate::bridge::attempt_call;
use crate::classify::{failure_message, is_failed};
use crate::handler::{invoke_else, ElseBranch};
use crate::scope::Scope;
use crate::value::Value;

type Thunk<'a> = Box<dyn FnOnce(&Scope) -> Value + 'a>;

struct Binding<'a> {
    name: Cow<'static, str>,
    expr: Thunk<'a>,
}

/// An ordered binding chain with its evaluation settings
///
/// ```
/// use failwise::{fail, Chain, ElseBranch};
///
/// let out = Chain::new()
///     .bind("user", |_| "ada")
///     .bind("id", |_| fail((), "no such user"))
///     .or_else(ElseBranch::fallback("anonymous"))
///     .evaluate(|s| s.value("user").cloned());
///
/// assert_eq!(out.get::<String>().map(String::as_str), Some("anonymous"));
/// ```
pub struct Chain<'a> {
    bindings: Vec<Binding<'a>>,
    trap_panics: bool,
    or_else: Option<ElseBranch<'a>>,
    label: Cow<'static, str>,
}

impl Default for Chain<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Chain<'a> {
    /// An empty chain that lets panics propagate
    #[must_use]
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
            trap_panics: false,
            or_else: None,
            label: Cow::Borrowed("attempt_all"),
        }
    }

    /// Append a binding
    ///
    /// `expr` runs at most once, and only if every earlier binding was ok.
    #[must_use]
    pub fn bind<N, F, V>(mut self, name: N, expr: F) -> Self
    where
        N: Into<Cow<'static, str>>,
        F: FnOnce(&Scope) -> V + 'a,
        V: Into<Value>,
    {
        self.bindings.push(Binding {
            name: name.into(),
            expr: Box::new(move |scope: &Scope| -> Value { expr(scope).into() }),
        });
        self
    }

    /// Run every binding through [`attempt_call`] so panics become failures
    ///
    /// The body is not covered.
    #[must_use]
    pub fn trap_panics(mut self) -> Self {
        self.trap_panics = true;
        self
    }

    /// Failure branch applied when the overall result is failed
    #[must_use]
    pub fn or_else(mut self, branch: impl Into<ElseBranch<'a>>) -> Self {
        self.or_else = Some(branch.into());
        self
    }

    /// Name reported in tracing events
    #[must_use]
    pub fn label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = label.into();
        self
    }

    /// Number of bindings
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the chain has no bindings
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Evaluate the bindings, then `body` with every name in scope
    ///
    /// The body's value is returned as is, except that a failed result (from
    /// a binding or from the body) goes through the failure branch when one
    /// is set.
    pub fn evaluate<F, V>(self, body: F) -> Value
    where
        F: FnOnce(&Scope) -> V,
        V: Into<Value>,
    {
        let Self {
            bindings,
            trap_panics,
            or_else,
            label,
        } = self;

        let result = match bind_all(bindings, trap_panics, &label) {
            Ok(scope) => body(&scope).into(),
            Err(failed) => failed,
        };

        match or_else {
            Some(branch) if is_failed(&result) => invoke_else(branch, result),
            _ => result,
        }
    }
}

fn bind_all(bindings: Vec<Binding<'_>>, trap_panics: bool, label: &str) -> Result<Scope, Value> {
    let mut scope = Scope::new();
    for (index, Binding { name, expr }) in bindings.into_iter().enumerate() {
        on_binding(label, &name, index);
        let value = if trap_panics {
            attempt_call(|| expr(&scope))
        } else {
            expr(&scope)
        };
        if is_failed(&value) {
            on_short_circuit(label, &name, index, &failure_message(&value));
            return Err(value);
        }
        scope.insert(name, value);
    }
    Ok(scope)
}

/// Evaluate a binding chain, short-circuiting on the first failure
///
/// Panics raised by bindings propagate. `or_else` overrides any branch set
/// on the chain.
///
/// ```
/// use failwise::{attempt_all, Chain, Result};
///
/// let chain = Chain::new().bind("x", |_| "a").bind("y", |_| "b");
/// let out = attempt_all(
///     chain,
///     |s| -> Result<String> { Ok(format!("{}{}", s.require::<String>("x")?, s.require::<String>("y")?)) },
///     None,
/// );
/// assert_eq!(out.get::<String>().map(String::as_str), Some("ab"));
/// ```
pub fn attempt_all<'a, F, V>(chain: Chain<'a>, body: F, or_else: Option<ElseBranch<'a>>) -> Value
where
    F: FnOnce(&Scope) -> V,
    V: Into<Value>,
{
    match or_else {
        Some(branch) => chain.or_else(branch).evaluate(body),
        None => chain.evaluate(body),
    }
}

/// [`attempt_all`] with every binding run through the exception bridge
pub fn try_all<'a, F, V>(chain: Chain<'a>, body: F, or_else: Option<ElseBranch<'a>>) -> Value
where
    F: FnOnce(&Scope) -> V,
    V: Into<Value>,
{
    let chain = if chain.label == "attempt_all" {
        chain.label("try_all")
    } else {
        chain
    };
    attempt_all(chain.trap_panics(), body, or_else)
}
