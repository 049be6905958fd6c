use smallvec::SmallVec;

type ParamEntry = (String, String);

/// Ordered multimap of captured parameters.
///
/// Insertion order is preserved and repeated names keep every value, so
/// contributions of composed selectors never shadow each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    entries: SmallVec<[ParamEntry; 4]>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut params = Self::new();
        params.append(name, value);
        params
    }

    pub fn from_values<I, V>(name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let mut params = Self::new();
        for value in values {
            params.append(name, value);
        }
        params
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    pub fn extend_from(&mut self, other: &Parameters) {
        self.entries.extend(other.entries.iter().cloned());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }
}

impl<K, V> FromIterator<(K, V)> for Parameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Parameters::new();
        for (key, value) in iter {
            params.append(key, value);
        }
        params
    }
}

impl IntoIterator for Parameters {
    type Item = (String, String);
    type IntoIter = smallvec::IntoIter<[ParamEntry; 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_every_value_for_repeated_names() {
        let mut params = Parameters::single("tag", "a");
        params.extend_from(&Parameters::from_values("tag", ["b", "c"]));

        assert_eq!(params.len(), 3);
        assert_eq!(params.get("tag"), Some("a"));
        assert_eq!(params.get_all("tag").collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn truncate_restores_checkpoint() {
        let mut params = Parameters::single("id", "1");
        let checkpoint = params.len();
        params.append("name", "x");
        params.truncate(checkpoint);

        assert!(!params.contains("name"));
        assert_eq!(params.get("id"), Some("1"));
    }
}
