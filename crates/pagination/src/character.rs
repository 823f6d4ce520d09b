use serde::{Deserialize, Serialize};

/// One slot of the pagination index.
///
/// `all`, `numeric` and `divider` are fixed when the set is built; `enabled`
/// is set once from the discovered prefixes and `active` per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    value: String,
    label: String,
    #[serde(default)]
    enabled: bool,
    #[serde(default, skip_serializing)]
    active: bool,
    #[serde(default)]
    all: bool,
    #[serde(default)]
    numeric: bool,
    #[serde(default)]
    divider: bool,
}

impl Character {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            enabled: false,
            active: false,
            all: false,
            numeric: false,
            divider: false,
        }
    }

    pub(crate) fn with_kind(mut self, all: bool, numeric: bool, divider: bool) -> Self {
        self.all = all;
        self.numeric = numeric;
        self.divider = divider;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The "all" entry.
    pub fn is_all(&self) -> bool {
        self.all
    }

    /// A digit, or the single entry standing for every digit.
    pub fn is_numeric(&self) -> bool {
        self.numeric
    }

    /// The empty entry between the numeric block and the alphabet.
    pub fn is_divider(&self) -> bool {
        self.divider
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether any listed entity starts with this character.
    pub fn has_results(&self) -> bool {
        self.enabled
    }

    pub fn is_enabled(&self) -> bool {
        self.all || self.active || self.enabled
    }

    pub fn is_link(&self) -> bool {
        !self.active && (self.is_enabled() || self.all)
    }

    pub fn set_enabled(&mut self, enabled: bool) -> &mut Self {
        self.enabled = enabled;
        self
    }

    pub fn set_active(&mut self, active: bool) -> &mut Self {
        self.active = active;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_character_without_results_is_not_a_link() {
        let c = Character::new("B", "B");
        assert!(!c.is_enabled());
        assert!(!c.is_link());
    }

    #[test]
    fn enabled_character_links_until_active() {
        let mut c = Character::new("A", "A");
        c.set_enabled(true);
        assert!(c.is_link());
        c.set_active(true);
        assert!(c.is_enabled());
        assert!(!c.is_link());
    }

    #[test]
    fn all_entry_is_always_enabled() {
        let c = Character::new("all", "All").with_kind(true, false, false);
        assert!(c.is_all());
        assert!(c.is_enabled());
        assert!(c.is_link());
        assert!(!c.has_results());
    }

    #[test]
    fn active_flag_is_not_serialized() {
        let mut c = Character::new("A", "A");
        c.set_active(true);
        let decoded: Character = serde_json::from_value(serde_json::to_value(&c).unwrap()).unwrap();
        assert!(!decoded.is_active());
        assert_eq!(decoded.value(), "A");
    }
}
