//! Logging scopes.
//!
//! Each logger owns a stack of scope strings. Entering pushes; dropping the
//! returned guard pops that scope and every scope entered after it, so an
//! outer guard released first also clears the scopes nested inside it. A
//! guard whose scope is already gone does nothing.

use std::fmt;

use parking_lot::Mutex;
use serde::Deserialize;

/// How the scope stack is rendered into the line prefix.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ScopeFormat {
    /// Only the most recently entered scope.
    Innermost,
    /// Every scope, outermost first.
    Chain {
        #[serde(default = "default_separator")]
        separator: String,
    },
}

fn default_separator() -> String {
    " => ".to_string()
}

impl Default for ScopeFormat {
    fn default() -> Self {
        ScopeFormat::Innermost
    }
}

impl ScopeFormat {
    pub fn chain() -> Self {
        ScopeFormat::Chain {
            separator: default_separator(),
        }
    }
}

#[derive(Debug, Default)]
struct Scopes {
    entries: Vec<(u64, String)>,
    next_id: u64,
}

#[derive(Debug, Default)]
pub struct ScopeStack {
    scopes: Mutex<Scopes>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, state: impl fmt::Display) -> ScopeGuard<'_> {
        let mut scopes = self.scopes.lock();
        let id = scopes.next_id;
        scopes.next_id += 1;
        let depth = scopes.entries.len();
        scopes.entries.push((id, state.to_string()));
        ScopeGuard {
            stack: self,
            id,
            depth,
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.lock().entries.is_empty()
    }

    /// Rendered prefix, or `None` when no scope is active.
    pub fn render(&self, format: &ScopeFormat) -> Option<String> {
        let scopes = self.scopes.lock();
        let mut texts = scopes.entries.iter().map(|(_, text)| text.as_str());
        match format {
            ScopeFormat::Innermost => texts.next_back().map(str::to_string),
            ScopeFormat::Chain { separator } => {
                if scopes.entries.is_empty() {
                    None
                } else {
                    Some(texts.collect::<Vec<_>>().join(separator))
                }
            }
        }
    }

    /// Pop scope `id` and everything entered after it. A scope already
    /// cleared by an enclosing guard is left alone.
    fn release(&self, id: u64) {
        let mut scopes = self.scopes.lock();
        if let Some(index) = scopes.entries.iter().position(|(entry, _)| *entry == id) {
            scopes.entries.truncate(index);
        }
    }
}

/// Active scope. Dropping it restores the enclosing scope.
#[must_use = "the scope ends as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ScopeGuard<'a> {
    stack: &'a ScopeStack,
    id: u64,
    depth: usize,
}

impl ScopeGuard<'_> {
    /// Stack depth at which this guard's scope was entered.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.stack.release(self.id);
    }
}
