use std::collections::HashMap;

/// Resolves normative Unicode character names for `:[NAME]` string escapes.
pub trait CharNames {
    fn lookup(&self, name: &str) -> Option<char>;
}

/// A table with no names in it; every `:[NAME]` escape stays unresolved.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCharNames;

impl CharNames for NoCharNames {
    fn lookup(&self, _name: &str) -> Option<char> {
        None
    }
}

impl CharNames for HashMap<String, char> {
    fn lookup(&self, name: &str) -> Option<char> {
        self.get(name).copied()
    }
}

impl<T: CharNames + ?Sized> CharNames for &T {
    fn lookup(&self, name: &str) -> Option<char> {
        (**self).lookup(name)
    }
}
