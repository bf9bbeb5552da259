//! Names bound by a chain

use std::any::{type_name, Any};
use std::borrow::Cow;

use failwise_common::{Error, Result};

use crate::value::Value;

/// Bound-name context threaded through a binding chain
///
/// Names keep the position of their first binding; binding a name again
/// replaces its value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    bindings: Vec<(Cow<'static, str>, Value)>,
}

impl Scope {
    /// An empty scope
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a name, shadowing any earlier value
    pub fn insert(&mut self, name: impl Into<Cow<'static, str>>, value: Value) {
        let name = name.into();
        match self.bindings.iter_mut().find(|(bound, _)| *bound == name) {
            Some((_, slot)) => *slot = value,
            None => self.bindings.push((name, value)),
        }
    }

    /// The value bound to `name`
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.bindings
            .iter()
            .find(|(bound, _)| bound == name)
            .map(|(_, value)| value)
    }

    /// The datum bound to `name`, if it has type `T`
    #[must_use]
    pub fn get<T: Any>(&self, name: &str) -> Option<&T> {
        self.value(name)?.get::<T>()
    }

    /// The datum bound to `name` as `T`, or an error saying why not
    ///
    /// Errors convert into failed values, so a body can use `?` and still
    /// return something classifiable.
    pub fn require<T: Any>(&self, name: &str) -> Result<&T> {
        let value = self
            .value(name)
            .ok_or_else(|| Error::unbound_name(name))?;
        value
            .get::<T>()
            .ok_or_else(|| Error::type_mismatch(name, type_name::<T>(), value.type_name()))
    }

    /// Whether `name` is bound
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.value(name).is_some()
    }

    /// Bound names in binding order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|(name, _)| name.as_ref())
    }

    /// Number of bound names
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether nothing is bound
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use failwise_common::ErrorKind;

    #[test]
    fn rebinding_keeps_position_and_replaces_value() {
        let mut scope = Scope::new();
        scope.insert("a", Value::from(1));
        scope.insert("b", Value::from(2));
        scope.insert("a", Value::from(3));

        assert_eq!(scope.names().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(scope.get::<i32>("a"), Some(&3));
    }

    #[test]
    fn require_reports_unbound_and_mismatched_names() {
        let mut scope = Scope::new();
        scope.insert("n", Value::from(1_u8));

        let unbound = scope.require::<u8>("m").unwrap_err();
        assert_eq!(unbound.kind(), &ErrorKind::UnboundName("m".into()));

        let mismatch = scope.require::<String>("n").unwrap_err();
        assert!(matches!(
            mismatch.kind(),
            ErrorKind::TypeMismatch { found: "u8", .. }
        ));
    }
}
