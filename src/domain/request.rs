use std::ops::RangeInclusive;

use super::resource::ResourceId;

/// Ordered list of resources to read as one batch
///
/// Order only matters to sequential reads. A request is built once, handed
/// to a batch operation, and consumed there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchRequest {
    ids: Vec<ResourceId>,
}

impl BatchRequest {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ResourceId>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Numbered stanza files in `dir`: `<dir>/stanza-01.txt`, `<dir>/stanza-02.txt`, ...
    pub fn numbered(dir: &str, numbers: RangeInclusive<u32>) -> Self {
        Self::new(numbers.map(|n| format!("{dir}/stanza-{n:02}.txt")))
    }

    /// Replace the id at `index` with one that is guaranteed not to exist
    ///
    /// The substitute is named `wrong-file-name-<index + 1>.txt`. An index
    /// past the end leaves the request unchanged.
    pub fn with_fault(mut self, index: usize) -> Self {
        if let Some(slot) = self.ids.get_mut(index) {
            *slot = Self::fault_id(index);
        }
        self
    }

    /// The id substituted by [`BatchRequest::with_fault`] for `index`
    pub fn fault_id(index: usize) -> ResourceId {
        ResourceId::new(format!("wrong-file-name-{}.txt", index + 1))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[ResourceId] {
        &self.ids
    }
}

impl IntoIterator for BatchRequest {
    type Item = ResourceId;
    type IntoIter = std::vec::IntoIter<ResourceId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.into_iter()
    }
}

impl<S: Into<ResourceId>> FromIterator<S> for BatchRequest {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_builds_zero_padded_names() {
        let request = BatchRequest::numbered("poem-two", 1..=8);

        assert_eq!(request.len(), 8);
        assert_eq!(request.ids()[0].as_str(), "poem-two/stanza-01.txt");
        assert_eq!(request.ids()[7].as_str(), "poem-two/stanza-08.txt");
    }

    #[test]
    fn with_fault_replaces_only_the_chosen_index() {
        let request = BatchRequest::numbered("poem-two", 1..=4).with_fault(2);

        assert_eq!(request.len(), 4);
        assert_eq!(request.ids()[1].as_str(), "poem-two/stanza-02.txt");
        assert_eq!(request.ids()[2].as_str(), "wrong-file-name-3.txt");
        assert_eq!(request.ids()[3].as_str(), "poem-two/stanza-04.txt");
    }

    #[test]
    fn with_fault_out_of_range_is_noop() {
        let request = BatchRequest::numbered("poem-two", 1..=2);
        assert_eq!(request.clone().with_fault(5), request);
    }

    #[test]
    fn empty_request() {
        let request = BatchRequest::default();
        assert!(request.is_empty());
        assert_eq!(request.into_iter().count(), 0);
    }
}
