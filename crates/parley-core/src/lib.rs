//! # Parley Core
//!
//! Value types shared by every Parley crate.
//!
//! This crate has no notion of strategies or registries. It defines what
//! flows between them:
//!
//! - **Identifiers**: branded newtypes for every role a piece of text can play
//!   ([`CommandId`], [`OptionKey`], [`FlagName`], [`ArgumentValue`],
//!   [`ParseMode`], [`ContextKey`])
//! - **Tokenizer**: shell-like word splitting with quote handling ([`tokenize`])
//! - **Results**: [`ParseResult`] and its plain-string twin [`RawParseResult`]
//! - **Errors**: the [`ParseError`] taxonomy every strategy reports through
//! - **Context**: the session view strategies read ([`Context`])
//! - **Metadata**: command declarations ([`CommandMetadata`], [`ParameterSpec`])
//!
//! ```rust
//! use parley_core::{CommandId, ParseMode, ParseResult, tokenize_words};
//!
//! let words = tokenize_words(r#"greet "Ada Lovelace" --loud"#).unwrap();
//! assert_eq!(words, vec!["greet", "Ada Lovelace", "--loud"]);
//!
//! let result = ParseResult::builder(CommandId::new("greet"), ParseMode::text(), "greet Ada")
//!     .argument("Ada")
//!     .build();
//! assert_eq!(result.command(), "greet");
//! ```

pub mod context;
pub mod error;
pub mod ident;
pub mod metadata;
pub mod result;
pub mod tokenizer;

pub use context::Context;
pub use error::{IdentifierError, ParseError, ParseErrorKind, TokenizeError};
pub use ident::{
    ArgumentValue, CommandId, ContextKey, FlagName, MAX_IDENTIFIER_LEN, OptionKey, ParseMode,
};
pub use metadata::{CommandMetadata, DEFAULT_CATEGORY, ParameterSpec};
pub use result::{
    ParseResult, ParseResultBuilder, RawParseResult, SemanticParseResult, to_raw, to_semantic,
};
pub use tokenizer::{Token, join, quote, tokenize, tokenize_words};

/// Prelude for common imports.
pub mod prelude {
    pub use super::{
        ArgumentValue, CommandId, CommandMetadata, Context, ContextKey, FlagName, OptionKey,
        ParameterSpec, ParseError, ParseErrorKind, ParseMode, ParseResult,
    };
}
