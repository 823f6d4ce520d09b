use crate::error::{AlphabetError, Result};
use crate::hooks::{AlterContext, TableAlter};
use crate::tables::{
    builtin_alphabets, builtin_numbers, default_alphabet, default_numbers, CharacterTable,
    DEFAULT_LANGCODE,
};
use alpha_pagination_cache::CacheBackend;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableKind {
    Alphabets,
    Numbers,
}

impl TableKind {
    fn cid(self) -> &'static str {
        match self {
            Self::Alphabets => "alpha_pagination:alphabets",
            Self::Numbers => "alpha_pagination:numbers",
        }
    }
}

/// Supplies the ordered characters of each language.
///
/// Tables are built once: from the backend cache if present, otherwise from
/// the builtin tables passed through every registered [`TableAlter`] hook, and
/// then written back to the backend. They stay in memory until
/// [`AlphabetProvider::invalidate`] is called.
pub struct AlphabetProvider {
    cache: Arc<dyn CacheBackend>,
    hooks: Vec<Arc<dyn TableAlter>>,
    default_langcode: String,
    alphabets: RwLock<Option<Arc<CharacterTable>>>,
    numbers: RwLock<Option<Arc<CharacterTable>>>,
}

impl AlphabetProvider {
    pub fn new(cache: Arc<dyn CacheBackend>) -> Self {
        Self {
            cache,
            hooks: Vec::new(),
            default_langcode: DEFAULT_LANGCODE.to_string(),
            alphabets: RwLock::new(None),
            numbers: RwLock::new(None),
        }
    }

    pub fn with_hook(mut self, hook: Arc<dyn TableAlter>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Langcode used when a lookup does not name one (the request language).
    pub fn with_default_langcode(mut self, langcode: impl Into<String>) -> Self {
        self.default_langcode = langcode.into();
        self
    }

    pub fn default_langcode(&self) -> &str {
        &self.default_langcode
    }

    /// Alphabet for `langcode`, falling back to English for unknown languages.
    pub fn alphabet(&self, langcode: Option<&str>) -> Result<Vec<String>> {
        let langcode = langcode.unwrap_or(&self.default_langcode);
        let table = self.table(TableKind::Alphabets)?;
        Ok(table.get(langcode).cloned().unwrap_or_else(default_alphabet))
    }

    /// Numbers for `langcode`, falling back to 0-9 for unknown languages.
    pub fn numbers(&self, langcode: Option<&str>) -> Result<Vec<String>> {
        let langcode = langcode.unwrap_or(&self.default_langcode);
        let table = self.table(TableKind::Numbers)?;
        Ok(table.get(langcode).cloned().unwrap_or_else(default_numbers))
    }

    pub fn alphabets(&self) -> Result<Arc<CharacterTable>> {
        self.table(TableKind::Alphabets)
    }

    pub fn number_tables(&self) -> Result<Arc<CharacterTable>> {
        self.table(TableKind::Numbers)
    }

    /// Forget both tables, in memory and in the backend.
    pub fn invalidate(&self) -> Result<()> {
        for kind in [TableKind::Alphabets, TableKind::Numbers] {
            *self.slot(kind).write().map_err(|_| AlphabetError::Poisoned)? = None;
            self.cache.invalidate(kind.cid())?;
        }
        Ok(())
    }

    fn slot(&self, kind: TableKind) -> &RwLock<Option<Arc<CharacterTable>>> {
        match kind {
            TableKind::Alphabets => &self.alphabets,
            TableKind::Numbers => &self.numbers,
        }
    }

    fn table(&self, kind: TableKind) -> Result<Arc<CharacterTable>> {
        let slot = self.slot(kind);
        if let Some(table) = slot.read().map_err(|_| AlphabetError::Poisoned)?.as_ref() {
            return Ok(Arc::clone(table));
        }

        // Rebuilding is idempotent, so two racing callers may both build.
        let table = Arc::new(self.load_or_build(kind)?);
        *slot.write().map_err(|_| AlphabetError::Poisoned)? = Some(Arc::clone(&table));
        Ok(table)
    }

    fn load_or_build(&self, kind: TableKind) -> Result<CharacterTable> {
        let cached: Option<CharacterTable> =
            alpha_pagination_cache::load(self.cache.as_ref(), kind.cid())?;
        if let Some(table) = cached.filter(|t| !t.is_empty()) {
            return Ok(table);
        }

        let context = AlterContext {
            default_langcode: &self.default_langcode,
        };
        let mut table = match kind {
            TableKind::Alphabets => builtin_alphabets(),
            TableKind::Numbers => builtin_numbers(),
        };
        for hook in &self.hooks {
            match kind {
                TableKind::Alphabets => hook.alter_alphabets(&mut table, &context),
                TableKind::Numbers => hook.alter_numbers(&mut table, &context),
            }
        }
        log::debug!(
            "Built {} table with {} languages",
            kind.cid(),
            table.len()
        );

        alpha_pagination_cache::store(self.cache.as_ref(), kind.cid(), &table)?;
        Ok(table)
    }
}
