//! Threading combinators
//!
//! Thread a value through a sequence of steps, stopping as soon as the
//! threaded value is a failure.

use std::borrow::Cow;

use failwise_common::{on_binding, on_short_circuit};

use crate::chain::Chain;
use crate::classify::{failure_message, is_failed};
use crate::scope::Scope;
use crate::value::Value;

type Call<'a> = Box<dyn FnOnce(Vec<Value>) -> Value + 'a>;

/// Where the threaded value goes in a step's argument list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Leading,
    Trailing,
}

/// One step of a threading combinator
///
/// A step is a call with some arguments already supplied. The threaded value
/// is added as the first argument by [`ok_thread`] and as the last by
/// [`ok_thread_last`]. A unary step behaves the same under both.
pub struct Step<'a> {
    call: Call<'a>,
    args: Vec<Value>,
    name: Cow<'static, str>,
}

impl<'a> Step<'a> {
    /// A step taking only the threaded value
    pub fn new<F, V>(f: F) -> Self
    where
        F: FnOnce(Value) -> V + 'a,
        V: Into<Value>,
    {
        Self {
            call: Box::new(move |args: Vec<Value>| -> Value {
                f(args.into_iter().next().unwrap_or_default()).into()
            }),
            args: Vec::new(),
            name: Cow::Borrowed("step"),
        }
    }

    /// A call with `args` already supplied
    ///
    /// ```
    /// use failwise::{ok_thread, ok_thread_last, Step, Value};
    ///
    /// fn minus(args: Vec<Value>) -> Option<i64> {
    ///     Some(args[0].get::<i64>()? - args[1].get::<i64>()?)
    /// }
    ///
    /// let leading = ok_thread(10_i64, [Step::partial(minus, [3_i64])]);
    /// let trailing = ok_thread_last(10_i64, [Step::partial(minus, [3_i64])]);
    /// assert_eq!(leading.get::<i64>(), Some(&7));
    /// assert_eq!(trailing.get::<i64>(), Some(&-7));
    /// ```
    pub fn partial<F, V, A>(f: F, args: impl IntoIterator<Item = A>) -> Self
    where
        F: FnOnce(Vec<Value>) -> V + 'a,
        V: Into<Value>,
        A: Into<Value>,
    {
        Self {
            call: Box::new(move |args: Vec<Value>| -> Value { f(args).into() }),
            args: args.into_iter().map(Into::into).collect(),
            name: Cow::Borrowed("step"),
        }
    }

    /// Name reported in tracing events
    #[must_use]
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    fn apply(self, threaded: Value, placement: Placement) -> Value {
        let mut args = self.args;
        match placement {
            Placement::Leading => args.insert(0, threaded),
            Placement::Trailing => args.push(threaded),
        }
        (self.call)(args)
    }
}

fn thread<'a>(
    seed: Value,
    steps: impl IntoIterator<Item = Step<'a>>,
    placement: Placement,
    label: &str,
) -> Value {
    let mut current = seed;
    let mut produced_by = Cow::Borrowed("seed");
    for (index, step) in steps.into_iter().enumerate() {
        if is_failed(&current) {
            on_short_circuit(label, &produced_by, index, &failure_message(&current));
            return current;
        }
        on_binding(label, &step.name, index);
        produced_by = step.name.clone();
        current = step.apply(current, placement);
    }
    current
}

/// Thread `seed` through `steps` as the leading argument
///
/// Before each step the current value is classified; a failure is returned
/// at once and the remaining steps never run. With no steps the seed is
/// returned unchanged.
pub fn ok_thread<'a>(seed: impl Into<Value>, steps: impl IntoIterator<Item = Step<'a>>) -> Value {
    thread(seed.into(), steps, Placement::Leading, "ok_thread")
}

/// Thread `seed` through `steps` as the trailing argument
pub fn ok_thread_last<'a>(
    seed: impl Into<Value>,
    steps: impl IntoIterator<Item = Step<'a>>,
) -> Value {
    thread(seed.into(), steps, Placement::Trailing, "ok_thread_last")
}

/// Leading-argument threading without failure awareness in its name
#[deprecated(since = "0.1.0", note = "use `ok_thread`")]
pub fn attempt_thread<'a>(
    seed: impl Into<Value>,
    steps: impl IntoIterator<Item = Step<'a>>,
) -> Value {
    thread(seed.into(), steps, Placement::Leading, "attempt_thread")
}

/// Trailing-argument threading without failure awareness in its name
#[deprecated(since = "0.1.0", note = "use `ok_thread_last`")]
pub fn attempt_thread_last<'a>(
    seed: impl Into<Value>,
    steps: impl IntoIterator<Item = Step<'a>>,
) -> Value {
    thread(seed.into(), steps, Placement::Trailing, "attempt_thread_last")
}

/// A step of [`as_ok_thread`], run with the threaded name in scope
pub struct Scoped<'a>(Box<dyn FnOnce(&Scope) -> Value + 'a>);

impl<'a> Scoped<'a> {
    /// Wrap a function of the scope
    pub fn new<F, V>(f: F) -> Self
    where
        F: FnOnce(&Scope) -> V + 'a,
        V: Into<Value>,
    {
        Self(Box::new(move |scope: &Scope| -> Value { f(scope).into() }))
    }
}

/// Rebind `name` to `seed`, then to each step's result
///
/// Equivalent to a binding chain binding the same name over and over, so it
/// short-circuits on the first failure, the seed included. With no steps the
/// seed is returned unchanged.
///
/// ```
/// use failwise::{as_ok_thread, Scoped};
///
/// let out = as_ok_thread(5, "v", [
///     Scoped::new(|s| s.get::<i32>("v").map(|v| v * 10)),
///     Scoped::new(|s| s.get::<i32>("v").map(|v| v + 1)),
/// ]);
/// assert_eq!(out.get::<i32>(), Some(&51));
/// ```
pub fn as_ok_thread<'a>(
    seed: impl Into<Value>,
    name: impl Into<Cow<'static, str>>,
    steps: impl IntoIterator<Item = Scoped<'a>>,
) -> Value {
    let seed = seed.into();
    let mut steps = steps.into_iter().peekable();
    if steps.peek().is_none() {
        return seed;
    }

    let name = name.into();
    let mut chain = Chain::new()
        .label("as_ok_thread")
        .bind(name.clone(), move |_: &Scope| seed);
    for Scoped(step) in steps {
        chain = chain.bind(name.clone(), step);
    }
    chain.evaluate(move |scope: &Scope| scope.value(&name).cloned())
}
