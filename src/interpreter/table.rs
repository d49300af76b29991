use indexmap::IndexMap;

/// Global variables in declaration order.
///
/// Names borrow from the source buffer. Entries are created by the first live
/// assignment at global scope and are never removed.
#[derive(Debug, Default)]
pub struct VariableTable<'src> {
    entries: IndexMap<&'src str, f64>,
}

impl<'src> VariableTable<'src> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of a variable, if it has been declared.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.get(name).copied()
    }

    /// Whether a variable of this name has been declared.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Creates the variable, or overwrites its value if it already exists.
    pub fn assign(&mut self, name: &'src str, value: f64) {
        self.entries.insert(name, value);
    }

    /// Number of declared variables.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no variable has been declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'src str, f64)> + '_ {
        self.entries.iter().map(|(name, value)| (*name, *value))
    }
}

/// Declared tasks and the token index their body starts at.
#[derive(Debug, Default)]
pub struct TaskTable<'src> {
    entries: IndexMap<&'src str, usize>,
}

impl<'src> TaskTable<'src> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a task, returning the entry of an earlier declaration of the
    /// same name. The latest declaration wins.
    pub fn declare(&mut self, name: &'src str, entry: usize) -> Option<usize> {
        self.entries.insert(name, entry)
    }

    /// Token index of the first statement of a task body.
    pub fn entry(&self, name: &str) -> Option<usize> {
        self.entries.get(name).copied()
    }

    /// Number of declared tasks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no task has been declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over task names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'src str> + '_ {
        self.entries.keys().copied()
    }
}
