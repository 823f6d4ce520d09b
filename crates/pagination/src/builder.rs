use crate::character::Character;
use crate::set::CharacterSet;
use alpha_pagination_protocol::{NumericMode, PaginationOptions, Position, NUMERIC_DIVIDER_VALUE};

/// The tables and options a character set is laid out from.
#[derive(Debug, Clone, Copy)]
pub struct Layout<'a> {
    pub options: &'a PaginationOptions,
    pub alphabet: &'a [String],
    pub numbers: &'a [String],
}

impl Layout<'_> {
    /// A real digit, or the single-label sentinel.
    pub fn is_numeric(&self, value: &str) -> bool {
        (self.options.numbers == NumericMode::SingleLabel && value == self.options.numeric_value)
            || self.numbers.iter().any(|n| n == value)
    }

    fn is_all(&self, value: &str) -> bool {
        value == self.options.all_value
    }

    fn is_divider(&self, value: &str) -> bool {
        self.options.shows_divider() && value == NUMERIC_DIVIDER_VALUE
    }

    /// `(value, label)` pairs in display order, before any filtering.
    pub fn entries(&self) -> Vec<(String, String)> {
        let options = self.options;
        let letters = self.alphabet.iter().map(|c| (c.clone(), c.clone()));

        let numeric: Vec<(String, String)> = match options.numbers {
            NumericMode::Off => Vec::new(),
            NumericMode::Individual => self.numbers.iter().map(|n| (n.clone(), n.clone())).collect(),
            NumericMode::SingleLabel => vec![(
                options.numeric_value.clone(),
                options.numeric_label.clone(),
            )],
        };
        let divider = (!numeric.is_empty() && options.shows_divider())
            .then(|| (NUMERIC_DIVIDER_VALUE.to_string(), String::new()));

        let mut entries: Vec<(String, String)> = Vec::new();
        match options.numeric_position {
            Position::After => {
                entries.extend(letters);
                entries.extend(divider);
                entries.extend(numeric);
            }
            Position::Before => {
                entries.extend(numeric);
                entries.extend(divider);
                entries.extend(letters);
            }
        }

        if options.shows_all() {
            let all = (options.all_value.clone(), options.all_label.clone());
            match options.all_position {
                Position::Before => entries.insert(0, all),
                Position::After => entries.push(all),
            }
        }

        entries
    }

    /// Build the cacheable character set for the discovered prefixes.
    ///
    /// No character is active in the result; see [`Layout::activate`].
    pub fn build(&self, prefixes: &[String]) -> CharacterSet {
        let options = self.options;
        let mut set: CharacterSet = self
            .entries()
            .into_iter()
            .map(|(value, label)| {
                let kind = (
                    self.is_all(&value),
                    self.is_numeric(&value),
                    self.is_divider(&value),
                );
                Character::new(value, label).with_kind(kind.0, kind.1, kind.2)
            })
            .collect();

        for prefix in prefixes {
            let value = if options.numbers == NumericMode::SingleLabel && self.is_numeric(prefix) {
                options.numeric_value.as_str()
            } else {
                prefix.as_str()
            };
            if let Some(character) = set.get_mut(value) {
                character.set_enabled(true);
            }
        }

        if !options.toggle_empty {
            set.retain(|c| c.has_results() || c.is_all() || c.is_divider());
        }

        if options.numeric_hide_empty && options.numbers != NumericMode::Off {
            let any_numeric = set.iter().any(|c| c.is_numeric() && c.has_results());
            if !any_numeric {
                set.retain(|c| !c.is_numeric() && !c.is_divider());
            }
        }

        set
    }

    /// Mark the character selected by the request's last argument as active.
    ///
    /// Without a matching argument the "all" entry (when shown) is active.
    pub fn activate(&self, set: &mut CharacterSet, args: &[String]) {
        let options = self.options;
        for character in set.iter_mut() {
            character.set_active(false);
        }

        let mut current = if options.shows_all() {
            options.all_value.as_str()
        } else {
            ""
        };

        if let Some(arg) = args.last().filter(|arg| !arg.is_empty()) {
            if set.contains(arg) {
                current = arg.as_str();
            } else if options.numbers == NumericMode::SingleLabel
                && self.is_numeric(arg)
                && set.contains(&options.numeric_value)
            {
                current = options.numeric_value.as_str();
            }
        }

        if current.is_empty() {
            return;
        }
        if let Some(character) = set.get_mut(current) {
            character.set_active(true);
        }
    }
}
