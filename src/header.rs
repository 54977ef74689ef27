/// Ordered mapping from thermo property name to its column in the data matrix.
///
/// Names are kept in the order of their first appearance in the header line.
/// When a name appears more than once the index of the last occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, usize)>,
}

impl HeaderMap {
    pub fn new() -> Self {
        HeaderMap {
            entries: Vec::new(),
        }
    }

    /// Build the map from the tokens of a header line, `tokens[i]` mapping to
    /// column `i`.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut header = HeaderMap::new();
        for (index, name) in tokens.into_iter().enumerate() {
            header.insert(name.as_ref(), index);
        }
        header
    }

    /// Insert `name`, overwriting the index of an existing entry with the same name.
    pub fn insert(&mut self, name: &str, index: usize) {
        match self.entries.iter_mut().find(|(n, _)| n.as_str() == name) {
            Some(entry) => entry.1 = index,
            None => self.entries.push((name.to_string(), index)),
        }
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|&(_, index)| index)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(n, i)| (n.as_str(), *i))
    }
}
