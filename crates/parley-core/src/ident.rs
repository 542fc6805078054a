//! Branded identifier types.
//!
//! Every piece of text that flows through the parser plays one role: a
//! command name, an option key, a flag name, a raw argument value, a parse
//! mode tag, or a session context key. Each role has its own nominal type so
//! that an [`OptionKey`] can never be handed to something expecting a
//! [`CommandId`] without an explicit conversion.
//!
//! All types share the same surface:
//!
//! - `new` wraps text as-is (no validation, used on the parse hot path)
//! - `try_new` rejects empty, blank, or overlong text with [`IdentifierError`]
//! - `as_str` / `into_inner` / `Display` / `AsRef<str>` give the text back
//!
//! ```rust
//! use parley_core::{CommandId, OptionKey};
//!
//! let command = CommandId::new("build");
//! let option = OptionKey::new("output");
//! assert_eq!(command, "build");
//! assert_eq!(option.as_str(), "output");
//! ```

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::IdentifierError;

/// Maximum number of characters accepted by the validating constructors.
pub const MAX_IDENTIFIER_LEN: usize = 100;

fn validate(kind: &'static str, value: &str) -> Result<(), IdentifierError> {
    if value.trim().is_empty() {
        return Err(IdentifierError::Empty { kind });
    }

    let len = value.chars().count();
    if len > MAX_IDENTIFIER_LEN {
        return Err(IdentifierError::TooLong {
            kind,
            len,
            max: MAX_IDENTIFIER_LEN,
        });
    }

    Ok(())
}

macro_rules! semantic_id {
    ($(#[$meta:meta])* $name:ident => $kind:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps `value` without any validation.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Wraps `value`, rejecting empty, whitespace-only, or overlong text.
            pub fn try_new(value: impl Into<String>) -> Result<Self, IdentifierError> {
                let value = value.into();
                validate($kind, &value)?;
                Ok(Self(value))
            }

            /// Returns the underlying text.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Unwraps into the underlying `String`.
            pub fn into_inner(self) -> String {
                self.0
            }

            /// Returns `true` if the wrapped text is empty.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

semantic_id! {
    /// Canonical name of a command (or one of its aliases).
    CommandId => "command id"
}

semantic_id! {
    /// Name of a key/value option, without leading dashes (`output` in `--output file`).
    OptionKey => "option key"
}

semantic_id! {
    /// Name of a boolean switch, without leading dashes.
    FlagName => "flag name"
}

semantic_id! {
    /// A raw positional or option value; never type-coerced by the parser.
    ArgumentValue => "argument value"
}

semantic_id! {
    /// Tag naming the strategy that produced a result.
    ///
    /// The set is open: strategies may introduce their own modes with
    /// [`ParseMode::new`].
    ParseMode => "parse mode"
}

semantic_id! {
    /// Name of an entry in the session context variable map.
    ContextKey => "context key"
}

impl ParseMode {
    /// Tag of the default text command grammar.
    pub const TEXT: &'static str = "text";
    /// Tag of the shell pass-through grammar.
    pub const SHELL: &'static str = "shell";
    /// Tag reserved for structured/semantic grammars.
    pub const SEMANTIC: &'static str = "semantic";

    /// The `text` mode.
    pub fn text() -> Self {
        Self::new(Self::TEXT)
    }

    /// The `shell` mode.
    pub fn shell() -> Self {
        Self::new(Self::SHELL)
    }

    /// The `semantic` mode.
    pub fn semantic() -> Self {
        Self::new(Self::SEMANTIC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_new_does_not_validate() {
        let id = CommandId::new("");
        assert!(id.is_empty());
    }

    #[test]
    fn test_try_new_rejects_blank() {
        let err = CommandId::try_new("   ").unwrap_err();
        assert!(matches!(err, IdentifierError::Empty { kind: "command id" }));
    }

    #[test]
    fn test_try_new_rejects_overlong() {
        let err = OptionKey::try_new("x".repeat(MAX_IDENTIFIER_LEN + 1)).unwrap_err();
        assert!(matches!(err, IdentifierError::TooLong { len: 101, .. }));
    }

    #[test]
    fn test_try_new_accepts_regular_text() {
        let flag = FlagName::try_new("verbose").unwrap();
        assert_eq!(flag, "verbose");
        assert_eq!(flag.to_string(), "verbose");
    }

    #[test]
    fn test_borrow_allows_str_lookup() {
        let mut map = HashMap::new();
        map.insert(ContextKey::new("user"), 1);
        assert_eq!(map.get("user"), Some(&1));
    }

    #[test]
    fn test_serde_is_transparent() {
        let json = serde_json::to_string(&ArgumentValue::new("file.txt")).unwrap();
        assert_eq!(json, "\"file.txt\"");

        let back: ArgumentValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, "file.txt");
    }

    #[test]
    fn test_well_known_modes() {
        assert_eq!(ParseMode::text(), ParseMode::TEXT);
        assert_eq!(ParseMode::shell(), ParseMode::SHELL);
        assert_eq!(ParseMode::semantic().as_str(), "semantic");
    }
}
