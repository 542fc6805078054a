//! Activation predicates for pipeline entries.
//!
//! Every strategy in a [`Pipeline`](crate::pipeline::Pipeline) is paired with
//! an [`Activation`]. The pipeline only consults a strategy when its
//! activation returns `true` for the line and context.
//!
//! ```rust
//! use parley_core::{Context, ParseMode};
//! use parley_framework::activation::{all, mode, not, prefix};
//!
//! let ctx = Context::default();
//! let text_only = all(mode(ParseMode::text()), not(prefix('!')));
//!
//! assert!(text_only("help", &ctx));
//! assert!(!text_only("!ls", &ctx));
//! ```

use std::sync::Arc;

use parley_core::{Context, ParseMode};

/// A type-erased activation predicate.
pub type Activation = Arc<dyn Fn(&str, &Context) -> bool + Send + Sync>;

/// Wraps a closure as an [`Activation`].
pub fn when<F>(f: F) -> Activation
where
    F: Fn(&str, &Context) -> bool + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Activates for every line.
pub fn always() -> Activation {
    Arc::new(|_, _| true)
}

/// Activates when the left-trimmed line starts with `ch`.
pub fn prefix(ch: char) -> Activation {
    Arc::new(move |line, _| line.trim_start().starts_with(ch))
}

/// Activates when the left-trimmed line does not start with `ch`.
pub fn not_prefix(ch: char) -> Activation {
    not(prefix(ch))
}

/// Activates while the context is in `mode`.
pub fn mode(mode: ParseMode) -> Activation {
    Arc::new(move |_, ctx| ctx.mode() == &mode)
}

/// Activates when both predicates do.
pub fn all(a: Activation, b: Activation) -> Activation {
    Arc::new(move |line, ctx| a(line, ctx) && b(line, ctx))
}

/// Activates when either predicate does.
pub fn any(a: Activation, b: Activation) -> Activation {
    Arc::new(move |line, ctx| a(line, ctx) || b(line, ctx))
}

/// Inverts a predicate.
pub fn not(a: Activation) -> Activation {
    Arc::new(move |line, ctx| !a(line, ctx))
}
