//! Command metadata consumed by the registry and the text strategy.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ident::{CommandId, FlagName, OptionKey};

/// Category assigned to commands that do not name one.
pub const DEFAULT_CATEGORY: &str = "general";

/// One declared parameter of a command.
///
/// Tagged by `kind` in serialized form:
///
/// ```yaml
/// parameters:
///   - kind: flag
///     name: verbose
///   - kind: option
///     name: output
///     default: out.txt
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ParameterSpec {
    /// A boolean switch (`--verbose`).
    Flag {
        /// Flag name without dashes.
        name: FlagName,
        /// Human-readable description.
        #[serde(default)]
        description: String,
    },

    /// A key/value option (`--output file` or `--output=file`).
    Option {
        /// Option key without dashes.
        name: OptionKey,
        /// Human-readable description.
        #[serde(default)]
        description: String,
        /// Documented default value; the parser does not inject it.
        #[serde(default)]
        default: Option<String>,
    },
}

impl ParameterSpec {
    /// Creates a flag spec.
    pub fn flag(name: impl Into<String>) -> Self {
        Self::Flag {
            name: FlagName::new(name),
            description: String::new(),
        }
    }

    /// Creates an option spec.
    pub fn option(name: impl Into<String>) -> Self {
        Self::Option {
            name: OptionKey::new(name),
            description: String::new(),
            default: None,
        }
    }

    /// Returns the parameter name as text.
    pub fn name(&self) -> &str {
        match self {
            Self::Flag { name, .. } => name.as_str(),
            Self::Option { name, .. } => name.as_str(),
        }
    }
}

/// Everything the parser knows about one command.
///
/// Built with the consuming builder methods and handed to the registry once.
///
/// ```rust
/// use parley_core::CommandMetadata;
///
/// let meta = CommandMetadata::new("build")
///     .alias("b")
///     .description("Compile the project")
///     .option("target")
///     .flag("release");
///
/// assert!(meta.accepts_option("target"));
/// assert!(meta.accepts_flag("release"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// Canonical command name.
    pub id: CommandId,
    /// Alternative names resolving to `id`.
    #[serde(default)]
    pub aliases: BTreeSet<CommandId>,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Options accepted by the command.
    #[serde(default)]
    pub declared_options: BTreeSet<OptionKey>,
    /// Flags accepted by the command.
    #[serde(default)]
    pub declared_flags: BTreeSet<FlagName>,
    /// Grouping used by listings.
    #[serde(default = "default_category")]
    pub category: String,
    /// Hidden commands resolve normally but never show up in listings or
    /// suggestions.
    #[serde(default)]
    pub hidden: bool,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl CommandMetadata {
    /// Creates metadata for a command with no aliases or parameters.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: CommandId::new(id),
            aliases: BTreeSet::new(),
            description: String::new(),
            declared_options: BTreeSet::new(),
            declared_flags: BTreeSet::new(),
            category: default_category(),
            hidden: false,
        }
    }

    /// Adds an alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.insert(CommandId::new(alias));
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declares a key/value option.
    pub fn option(mut self, key: impl Into<String>) -> Self {
        self.declared_options.insert(OptionKey::new(key));
        self
    }

    /// Declares a boolean flag.
    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.declared_flags.insert(FlagName::new(name));
        self
    }

    /// Declares a parameter from its spec.
    pub fn declare(mut self, spec: ParameterSpec) -> Self {
        match spec {
            ParameterSpec::Flag { name, .. } => {
                self.declared_flags.insert(name);
            }
            ParameterSpec::Option { name, .. } => {
                self.declared_options.insert(name);
            }
        }
        self
    }

    /// Sets the category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Marks the command as hidden.
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Returns `true` if `key` is a declared option.
    pub fn accepts_option(&self, key: &str) -> bool {
        self.declared_options.contains(key)
    }

    /// Returns `true` if `name` is a declared flag.
    pub fn accepts_flag(&self, name: &str) -> bool {
        self.declared_flags.contains(name)
    }

    /// Returns the id followed by every alias.
    pub fn names(&self) -> impl Iterator<Item = &CommandId> {
        std::iter::once(&self.id).chain(self.aliases.iter())
    }
}
