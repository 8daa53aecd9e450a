use std::collections::HashSet;

/// Authenticated caller identity, passed explicitly into every operation.
///
/// The request boundary authenticates the caller and hands over the set of
/// authority names granted to it (directly or through its roles). Nothing in
/// this crate consults ambient or thread-bound security state.
#[derive(Debug, Clone)]
pub struct Principal {
    name: String,
    authorities: HashSet<String>,
}

impl Principal {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            authorities: HashSet::new(),
        }
    }

    /// Adds a granted authority name (builder style).
    pub fn with_authority(mut self, authority: impl Into<String>) -> Self {
        self.authorities.insert(authority.into());
        self
    }

    pub fn with_authorities<I, S>(mut self, authorities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authorities.extend(authorities.into_iter().map(Into::into));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn authorities(&self) -> &HashSet<String> {
        &self.authorities
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.contains(authority)
    }

    /// True if any of the given authority names is granted.
    pub fn has_any_authority<'a, I>(&self, names: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        names.into_iter().any(|name| self.authorities.contains(name))
    }
}
