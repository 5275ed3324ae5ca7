//! ProfileRegistry - Uniquely-keyed catalog of mission profiles
//!
//! Owns the name-uniqueness rules. Cascade operations that also touch the
//! mission list (delete, rename) live on `MissionSchedule`; the registry only
//! knows about profiles.

use std::collections::BTreeMap;

use crate::model::profile::Profile;

/// Disambiguator tokens, tried in order before falling back to an integer
/// counter that starts at the token-list length.
const NAME_TOKENS: [&str; 11] = [
    "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Eta", "Theta", "Iota", "Kappa",
    "Lambda",
];

const DEFAULT_NAME: &str = "Mission Profile";

/// Uniquely-keyed profile catalog
///
/// Backed by a BTreeMap so iteration (and therefore the persisted form) has a
/// stable order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileRegistry {
    profiles: BTreeMap<String, Profile>,
    default_name: Option<String>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the label substituted for blank name hints.
    pub fn with_default_name(mut self, label: impl Into<String>) -> Self {
        self.default_name = Some(label.into());
        self
    }

    /// Insert a profile under a unique key derived from its name hint.
    ///
    /// Trims the hint, substitutes the default label if it is blank, then
    /// appends disambiguator tokens (lower-cased when the hint itself carries
    /// no uppercase characters) until the key is free. Never fails; returns
    /// the key the profile was stored under.
    pub fn add(&mut self, mut profile: Profile) -> String {
        let hint = std::mem::take(&mut profile.name);
        let key = self.resolve_unique_name(&hint);
        profile.name = key.clone();
        self.profiles.insert(key.clone(), profile);
        key
    }

    /// Re-insert a persisted profile under its saved (already unique) key.
    pub fn restore(&mut self, profile: Profile) {
        self.profiles.insert(profile.name.clone(), profile);
    }

    /// Remove the old entry, re-run uniqueness on the new hint against the
    /// remaining keys, and re-insert. Returns the new key, or `None` if the
    /// old key was absent.
    pub fn rename(&mut self, old_name: &str, new_hint: &str) -> Option<String> {
        let mut profile = self.profiles.remove(old_name)?;
        profile.name = new_hint.to_string();
        Some(self.add(profile))
    }

    pub fn remove(&mut self, name: &str) -> Option<Profile> {
        self.profiles.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Profiles in key order.
    pub fn iter(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.values()
    }

    fn resolve_unique_name(&self, hint: &str) -> String {
        let trimmed = hint.trim();
        let base = if trimmed.is_empty() {
            self.default_name.as_deref().unwrap_or(DEFAULT_NAME)
        } else {
            trimmed
        };

        if !self.profiles.contains_key(base) {
            return base.to_string();
        }

        // An all-lowercase hint keeps its suffix lowercase too, so the
        // generated key does not visually break the name.
        let lowercase = !base.chars().any(|c| c.is_uppercase());

        let mut index = 0usize;
        loop {
            let suffix = if index < NAME_TOKENS.len() {
                if lowercase {
                    NAME_TOKENS[index].to_lowercase()
                } else {
                    NAME_TOKENS[index].to_string()
                }
            } else {
                index.to_string()
            };
            let candidate = format!("{} {}", base, suffix);
            if !self.profiles.contains_key(&candidate) {
                return candidate;
            }
            index += 1;
        }
    }
}
