//! Registry of shopping-trip category labels.
//!
//! Labels are stored in display form (`"Farmácia"`) and compared through a
//! normalized key (`"farmacia"`), so `"FARMACIA"` resolves to the stored
//! label. The fallback [`FALLBACK_CATEGORY`] is always registered, always
//! last, and can be neither renamed nor removed: it is where trips go when
//! their category is deleted.

use serde::{Deserialize, Serialize};

use crate::{
    EngineError, ResultEngine,
    util::{normalize_display, normalize_key},
};

pub const FALLBACK_CATEGORY: &str = "Other";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRegistry {
    labels: Vec<String>,
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self {
            labels: vec![FALLBACK_CATEGORY.to_string()],
        }
    }
}

impl CategoryRegistry {
    /// Builds a registry from `labels`. The fallback is appended if missing.
    pub fn with_labels<I, S>(labels: I) -> ResultEngine<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::default();
        for label in labels {
            if registry.contains(label.as_ref()) && is_fallback(label.as_ref()) {
                continue;
            }
            registry.add(label.as_ref())?;
        }
        Ok(registry)
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn fallback(&self) -> &str {
        FALLBACK_CATEGORY
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.position(label).is_some()
    }

    /// Returns the stored display form of `label`, if registered.
    #[must_use]
    pub fn resolve(&self, label: &str) -> Option<&str> {
        self.position(label).map(|idx| self.labels[idx].as_str())
    }

    /// Registers a new label before the fallback and returns its display form.
    pub fn add(&mut self, label: &str) -> ResultEngine<String> {
        let display = display_label(label)?;
        if let Some(existing) = self.resolve(&display) {
            return Err(EngineError::ExistingKey(existing.to_string()));
        }
        let at = self.labels.len().saturating_sub(1);
        self.labels.insert(at, display.clone());
        Ok(display)
    }

    /// Renames `from` to `to` in place and returns `(old, new)` display forms.
    ///
    /// Changing only the spelling of a label (`"mercado"` → `"Mercado"`) is
    /// allowed; taking over another registered label is not.
    pub fn rename(&mut self, from: &str, to: &str) -> ResultEngine<(String, String)> {
        let idx = self
            .position(from)
            .ok_or_else(|| EngineError::KeyNotFound(from.to_string()))?;
        if is_fallback(&self.labels[idx]) {
            return Err(EngineError::ProtectedCategory(FALLBACK_CATEGORY.to_string()));
        }

        let display = display_label(to)?;
        if let Some(other) = self.position(&display)
            && other != idx
        {
            return Err(EngineError::ExistingKey(self.labels[other].clone()));
        }

        let old = std::mem::replace(&mut self.labels[idx], display.clone());
        Ok((old, display))
    }

    /// Unregisters `label` and returns its display form.
    pub fn remove(&mut self, label: &str) -> ResultEngine<String> {
        let idx = self
            .position(label)
            .ok_or_else(|| EngineError::KeyNotFound(label.to_string()))?;
        if is_fallback(&self.labels[idx]) {
            return Err(EngineError::ProtectedCategory(FALLBACK_CATEGORY.to_string()));
        }
        Ok(self.labels.remove(idx))
    }

    fn position(&self, label: &str) -> Option<usize> {
        let key = normalize_key(label)?;
        self.labels
            .iter()
            .position(|stored| normalize_key(stored).as_deref() == Some(key.as_str()))
    }
}

fn display_label(label: &str) -> ResultEngine<String> {
    let display = normalize_display(label)
        .ok_or_else(|| EngineError::InvalidName("category must not be empty".to_string()))?;
    if normalize_key(&display).is_none() {
        return Err(EngineError::InvalidName(format!(
            "category '{display}' has no letters or digits"
        )));
    }
    Ok(display)
}

fn is_fallback(label: &str) -> bool {
    normalize_key(label).as_deref() == normalize_key(FALLBACK_CATEGORY).as_deref()
}
