//! The command registry.
//!
//! [`CommandRegistry`] owns the catalog of [`CommandMetadata`] and answers
//! three questions for the text strategy: does this name exist, what is its
//! canonical id, and what did the user probably mean if it does not.
//!
//! The registry uses interior locking so it can be shared behind an `Arc`
//! with strategies while commands are still being registered. Registration
//! is expected to be serialized by the caller; lookups may run concurrently.
//!
//! ```rust
//! use parley_core::CommandMetadata;
//! use parley_framework::CommandRegistry;
//!
//! let registry = CommandRegistry::new();
//! registry.register(CommandMetadata::new("build").alias("b")).unwrap();
//!
//! assert_eq!(registry.resolve("b").unwrap(), "build");
//! assert_eq!(registry.suggest("buidl", 3)[0], "build");
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use parking_lot::{Mutex, RwLock};
use parley_core::{CommandId, CommandMetadata};
use tracing::{debug, trace, warn};

use crate::error::{RegistryError, RegistryResult};
use crate::fuzzy::{self, DEFAULT_MAX_DISTANCE};

/// Default number of suggestions attached to unknown-command errors.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Default number of memoized suggestion lists.
pub const DEFAULT_CACHE_CAPACITY: usize = 128;

#[derive(Default)]
struct Catalog {
    commands: BTreeMap<CommandId, CommandMetadata>,
    /// Every id and alias, mapped to its canonical id.
    names: HashMap<CommandId, CommandId>,
}

impl Catalog {
    fn visible_names(&self) -> impl Iterator<Item = &CommandId> {
        self.commands
            .values()
            .filter(|meta| !meta.hidden)
            .flat_map(CommandMetadata::names)
    }
}

/// Least-recently-used memo of `suggest` answers.
struct SuggestionCache {
    capacity: usize,
    entries: HashMap<(String, usize), Vec<CommandId>>,
    order: VecDeque<(String, usize)>,
}

impl SuggestionCache {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    fn get(&mut self, key: &(String, usize)) -> Option<Vec<CommandId>> {
        let hit = self.entries.get(key)?.clone();
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_back(k);
            }
        }
        Some(hit)
    }

    fn insert(&mut self, key: (String, usize), value: Vec<CommandId>) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.insert(key.clone(), value).is_none() {
            self.order.push_back(key);
        }
        while self.entries.len() > self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Catalog of registered commands with alias resolution and fuzzy suggestions.
pub struct CommandRegistry {
    catalog: RwLock<Catalog>,
    cache: Mutex<SuggestionCache>,
    max_distance: usize,
    suggestion_limit: usize,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Creates an empty registry with default limits.
    pub fn new() -> Self {
        Self {
            catalog: RwLock::new(Catalog::default()),
            cache: Mutex::new(SuggestionCache::new(DEFAULT_CACHE_CAPACITY)),
            max_distance: DEFAULT_MAX_DISTANCE,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }

    /// Sets the edit-distance cap for fuzzy suggestions.
    pub fn with_max_distance(mut self, max_distance: usize) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// Sets how many suggestions unknown-command errors carry.
    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit;
        self
    }

    /// Sets the size of the suggestion memo. Zero disables it.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache = Mutex::new(SuggestionCache::new(capacity));
        self
    }

    /// Returns how many suggestions unknown-command errors carry.
    pub fn suggestion_limit(&self) -> usize {
        self.suggestion_limit
    }

    /// Registers a command.
    ///
    /// Fails without changing anything if the id or any alias is already
    /// taken, or if the metadata collides with itself.
    pub fn register(&self, metadata: CommandMetadata) -> RegistryResult<()> {
        validate(&metadata)?;

        let mut catalog = self.catalog.write();
        for name in metadata.names() {
            if let Some(existing) = catalog.names.get(name) {
                warn!(
                    command = %metadata.id,
                    name = %name,
                    existing = %existing,
                    "Rejected command registration"
                );
                return Err(RegistryError::DuplicateCommand {
                    name: name.clone(),
                    existing: existing.clone(),
                });
            }
        }

        for name in metadata.names() {
            catalog.names.insert(name.clone(), metadata.id.clone());
        }
        debug!(
            command = %metadata.id,
            aliases = metadata.aliases.len(),
            category = %metadata.category,
            "Registered command"
        );
        catalog.commands.insert(metadata.id.clone(), metadata);
        self.cache.lock().clear();
        Ok(())
    }

    /// Removes a command by id or alias, returning its metadata.
    pub fn unregister(&self, name: &str) -> Option<CommandMetadata> {
        let mut catalog = self.catalog.write();
        let id = catalog.names.get(name)?.clone();
        let metadata = catalog.commands.remove(&id)?;
        for name in metadata.names() {
            catalog.names.remove(name);
        }
        self.cache.lock().clear();
        drop(catalog);

        debug!(command = %id, "Unregistered command");
        Some(metadata)
    }

    /// Resolves an id or alias to its canonical id.
    pub fn resolve(&self, name: &str) -> RegistryResult<CommandId> {
        let found = self.catalog.read().names.get(name).cloned();
        match found {
            Some(id) => Ok(id),
            None => Err(self.unknown(name)),
        }
    }

    /// Resolves an id or alias to the command's metadata.
    pub fn resolve_metadata(&self, name: &str) -> RegistryResult<CommandMetadata> {
        let found = {
            let catalog = self.catalog.read();
            catalog
                .names
                .get(name)
                .and_then(|id| catalog.commands.get(id))
                .cloned()
        };
        found.ok_or_else(|| self.unknown(name))
    }

    fn unknown(&self, name: &str) -> RegistryError {
        RegistryError::UnknownCommand {
            name: CommandId::new(name),
            suggestions: self.suggest(name, self.suggestion_limit),
        }
    }

    /// Returns up to `limit` ranked suggestions for `name`, best first.
    ///
    /// Hidden commands never appear.
    pub fn suggest(&self, name: &str, limit: usize) -> Vec<CommandId> {
        let key = (name.to_string(), limit);
        if let Some(hit) = self.cache.lock().get(&key) {
            trace!(name, "Suggestion cache hit");
            return hit;
        }

        // Insert under the read lock. Registration clears the memo under the write lock.
        let catalog = self.catalog.read();
        let ranked = fuzzy::rank(name, catalog.visible_names(), self.max_distance, limit);
        self.cache.lock().insert(key, ranked.clone());
        ranked
    }

    /// Returns the metadata of a command by id or alias.
    pub fn get(&self, name: &str) -> Option<CommandMetadata> {
        let catalog = self.catalog.read();
        let id = catalog.names.get(name)?;
        catalog.commands.get(id).cloned()
    }

    /// Like [`get`](Self::get), but falls back to a case-insensitive match
    /// on ids, then on aliases.
    pub fn lookup(&self, name: &str) -> Option<CommandMetadata> {
        if name.is_empty() {
            return None;
        }

        let catalog = self.catalog.read();
        if let Some(meta) = catalog.names.get(name).and_then(|id| catalog.commands.get(id)) {
            return Some(meta.clone());
        }

        let needle = name.to_lowercase();
        let folded = |candidate: &CommandId| candidate.as_str().to_lowercase() == needle;
        let by_id = catalog.commands.values().find(|meta| folded(&meta.id));
        by_id
            .or_else(|| {
                catalog
                    .commands
                    .values()
                    .find(|meta| meta.aliases.iter().any(folded))
            })
            .cloned()
    }

    /// Returns `true` if `name` is a registered id or alias.
    pub fn contains(&self, name: &str) -> bool {
        self.catalog.read().names.contains_key(name)
    }

    /// Lists visible commands sorted by id, optionally within one category.
    pub fn list(&self, category: Option<&str>) -> Vec<CommandMetadata> {
        self.catalog
            .read()
            .commands
            .values()
            .filter(|meta| !meta.hidden)
            .filter(|meta| category.is_none_or(|c| meta.category == c))
            .cloned()
            .collect()
    }

    /// Returns the sorted categories of visible commands.
    pub fn categories(&self) -> Vec<String> {
        self.catalog
            .read()
            .commands
            .values()
            .filter(|meta| !meta.hidden)
            .map(|meta| meta.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Returns the number of registered commands, hidden ones included.
    pub fn len(&self) -> usize {
        self.catalog.read().commands.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.catalog.read().commands.is_empty()
    }
}

fn validate(metadata: &CommandMetadata) -> RegistryResult<()> {
    if metadata.id.as_str().trim().is_empty() {
        return Err(RegistryError::invalid(
            metadata.id.clone(),
            "command id cannot be empty",
        ));
    }

    if metadata
        .aliases
        .iter()
        .any(|alias| alias.as_str().trim().is_empty())
    {
        return Err(RegistryError::invalid(
            metadata.id.clone(),
            "aliases cannot be empty",
        ));
    }

    if metadata.aliases.contains(&metadata.id) {
        return Err(RegistryError::DuplicateCommand {
            name: metadata.id.clone(),
            existing: metadata.id.clone(),
        });
    }

    Ok(())
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("command_count", &self.len())
            .field("cached_suggestions", &self.cache.lock().len())
            .field("max_distance", &self.max_distance)
            .finish()
    }
}
