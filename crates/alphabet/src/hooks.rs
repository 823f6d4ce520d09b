use crate::tables::CharacterTable;

/// Passed to alter hooks alongside the table being built.
#[derive(Debug, Clone, Copy)]
pub struct AlterContext<'a> {
    /// Langcode used when callers do not ask for one.
    pub default_langcode: &'a str,
}

/// Extension point for changing the character tables before they are cached.
///
/// Hooks may add, remove or reorder entries and whole languages. They run once
/// per table build, in registration order.
pub trait TableAlter: Send + Sync {
    fn alter_alphabets(&self, _alphabets: &mut CharacterTable, _context: &AlterContext<'_>) {}

    fn alter_numbers(&self, _numbers: &mut CharacterTable, _context: &AlterContext<'_>) {}
}

/// Hook built from a closure over the alphabet table.
pub struct AlphabetAlterFn<F>(pub F);

impl<F> TableAlter for AlphabetAlterFn<F>
where
    F: Fn(&mut CharacterTable, &AlterContext<'_>) + Send + Sync,
{
    fn alter_alphabets(&self, alphabets: &mut CharacterTable, context: &AlterContext<'_>) {
        (self.0)(alphabets, context);
    }
}

/// Hook built from a closure over the number table.
pub struct NumbersAlterFn<F>(pub F);

impl<F> TableAlter for NumbersAlterFn<F>
where
    F: Fn(&mut CharacterTable, &AlterContext<'_>) + Send + Sync,
{
    fn alter_numbers(&self, numbers: &mut CharacterTable, context: &AlterContext<'_>) {
        (self.0)(numbers, context);
    }
}
