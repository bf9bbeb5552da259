//! Macros for error creation and handling

/// Create an error with automatic file/line context
///
/// The first argument is an [`Error`](crate::Error) constructor call.
///
/// ```
/// use failwise_common::{err, ErrorKind};
///
/// let e = err!(unbound_name("user"), "body read {}", "user");
/// assert_eq!(e.kind(), &ErrorKind::UnboundName("user".into()));
/// ```
#[macro_export]
macro_rules! err {
    ($kind:ident ( $($ctor:expr),* $(,)? )) => {
        $crate::error::Error::$kind($($ctor),*).context(format!("at {}:{}", file!(), line!()))
    };
    ($kind:ident ( $($ctor:expr),* $(,)? ), $msg:expr) => {
        $crate::error::Error::$kind($($ctor),*)
            .context(format!("{} at {}:{}", $msg, file!(), line!()))
    };
    ($kind:ident ( $($ctor:expr),* $(,)? ), $fmt:expr, $($arg:tt)*) => {
        $crate::error::Error::$kind($($ctor),*)
            .context(format!(concat!($fmt, " at {}:{}"), $($arg)*, file!(), line!()))
    };
}

/// Return early with an error built by [`err!`]
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::err!($($arg)*))
    };
}

/// Bail unless a condition holds
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($arg:tt)*) => {
        if !$cond {
            $crate::bail!($($arg)*);
        }
    };
}
