//! Dynamic values
//!
//! Every value a chain produces is a [`Value`]: either nil or a shared,
//! immutable [`Datum`]. Classification works on this universe, so any type
//! that implements `Datum` can flow through the evaluators.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::exception::Exception;

/// A type that can live inside a [`Value`]
///
/// The blanket requirements keep values shareable across threads and
/// comparable structurally. [`render`](Datum::render) is the string
/// conversion used as the message of an ok value.
pub trait Datum: Any + Send + Sync + fmt::Debug + PartialEq {
    /// String conversion of the value
    fn render(&self) -> String {
        format!("{self:?}")
    }
}

/// Implement [`Datum`] for types whose `Display` output is their string form
///
/// ```
/// use failwise::{datum_display, Value};
///
/// #[derive(Debug, PartialEq)]
/// struct Celsius(f64);
///
/// impl std::fmt::Display for Celsius {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "{}C", self.0)
///     }
/// }
///
/// datum_display!(Celsius);
///
/// assert_eq!(Value::new(Celsius(21.5)).to_string(), "21.5C");
/// ```
#[macro_export]
macro_rules! datum_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::Datum for $ty {
                fn render(&self) -> ::std::string::String {
                    ::std::string::ToString::to_string(self)
                }
            }
        )*
    };
}

macro_rules! numeric {
    ($($ty:ty),* $(,)?) => {
        datum_display!($($ty),*);

        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::new(value)
                }
            }
        )*

        fn is_numeric(id: TypeId) -> bool {
            [$(TypeId::of::<$ty>()),*].contains(&id)
        }
    };
}

numeric!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

datum_display!(bool, char, String);

impl Datum for Vec<Value> {
    fn render(&self) -> String {
        let items: Vec<String> = self.iter().map(Value::render).collect();
        format!("[{}]", items.join(" "))
    }
}

trait Erased: Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn render(&self) -> String;
    fn debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
    fn same(&self, other: &dyn Erased) -> bool;
    fn type_name(&self) -> &'static str;
}

struct Held<T>(T);

impl<T: Datum> Erased for Held<T> {
    fn as_any(&self) -> &dyn Any {
        &self.0
    }

    fn render(&self) -> String {
        self.0.render()
    }

    fn debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }

    fn same(&self, other: &dyn Erased) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self.0 == *other)
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Nil or a shared immutable datum
///
/// Cloning is cheap: the datum sits behind an `Arc`.
#[derive(Clone, Default)]
pub struct Value(Option<Arc<dyn Erased>>);

impl Value {
    /// The nil value
    #[must_use]
    pub const fn nil() -> Self {
        Self(None)
    }

    /// Wrap a datum
    pub fn new<T: Datum>(datum: T) -> Self {
        Self(Some(Arc::new(Held(datum))))
    }

    /// Whether this is nil
    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_none()
    }

    /// Borrow the datum as `T` if that is its runtime type
    #[must_use]
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.as_any()?.downcast_ref::<T>()
    }

    /// Whether the datum's runtime type is `T`
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.get::<T>().is_some()
    }

    /// Runtime type identity of the datum, `None` for nil
    #[must_use]
    pub fn datum_type_id(&self) -> Option<TypeId> {
        self.as_any().map(|any| any.type_id())
    }

    /// Name of the datum's runtime type, `"nil"` for nil
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.0.as_ref().map_or("nil", |held| held.type_name())
    }

    /// String conversion; nil renders as `"nil"`
    #[must_use]
    pub fn render(&self) -> String {
        self.0.as_ref().map_or_else(|| "nil".to_string(), |held| held.render())
    }

    /// Whether the datum is one of the primitive integer or float types
    #[must_use]
    pub fn is_number(&self) -> bool {
        self.datum_type_id().is_some_and(is_numeric)
    }

    /// Length of a string or list datum
    ///
    /// Nil has length zero. Other datums have no length.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        if self.is_nil() {
            return Some(0);
        }
        if let Some(s) = self.get::<String>() {
            return Some(s.chars().count());
        }
        self.get::<Vec<Value>>().map(Vec::len)
    }

    pub(crate) fn as_any(&self) -> Option<&dyn Any> {
        self.0.as_ref().map(|held| held.as_any())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(held) => held.debug(f),
            None => f.write_str("nil"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (None, None) => true,
            (Some(a), Some(b)) => a.same(b.as_ref()),
            _ => false,
        }
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::nil()
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::new(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Self::new(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::new(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Self::nil, Into::into)
    }
}

/// `Err` becomes a failed [`Exception`] value.
///
/// The error bound admits `std::error::Error` types and `anyhow::Error`
/// alike, so `anyhow::Result` converts too.
impl<T, E> From<Result<T, E>> for Value
where
    T: Into<Value>,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    fn from(value: Result<T, E>) -> Self {
        match value {
            Ok(ok) => ok.into(),
            Err(e) => Exception::from_boxed(e).into(),
        }
    }
}

impl From<anyhow::Error> for Value {
    fn from(value: anyhow::Error) -> Self {
        Exception::from(value).into()
    }
}
