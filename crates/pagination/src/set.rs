use crate::character::Character;
use serde::{Deserialize, Serialize};

/// Characters in display order, unique by value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterSet {
    characters: Vec<Character>,
}

impl CharacterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append unless a character with the same value is already present.
    pub fn push(&mut self, character: Character) -> bool {
        if self.contains(character.value()) {
            return false;
        }
        self.characters.push(character);
        true
    }

    pub fn get(&self, value: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.value() == value)
    }

    pub fn get_mut(&mut self, value: &str) -> Option<&mut Character> {
        self.characters.iter_mut().find(|c| c.value() == value)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.get(value).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Character> {
        self.characters.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Character> {
        self.characters.iter_mut()
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.characters.iter().map(Character::value)
    }

    pub fn active(&self) -> Option<&Character> {
        self.characters.iter().find(|c| c.is_active())
    }

    pub fn retain(&mut self, keep: impl FnMut(&Character) -> bool) {
        self.characters.retain(keep);
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

impl<'a> IntoIterator for &'a CharacterSet {
    type Item = &'a Character;
    type IntoIter = std::slice::Iter<'a, Character>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Character> for CharacterSet {
    fn from_iter<I: IntoIterator<Item = Character>>(iter: I) -> Self {
        let mut set = Self::new();
        for character in iter {
            set.push(character);
        }
        set
    }
}
