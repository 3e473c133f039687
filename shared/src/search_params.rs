use url::form_urlencoded;

/// An ordered list of query parameters, decoded from and serialized back to
/// the application/x-www-form-urlencoded representation used in a location's
/// search string.
///
/// `set` replaces the first occurrence of a name in place and drops any
/// duplicates; `delete` removes all occurrences. Insertion order is
/// preserved otherwise.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchParams {
    pairs: Vec<(String, String)>,
}

impl SearchParams {
    /// Parses a search string. A leading `?` is optional.
    pub fn parse(search: &str) -> Self {
        let raw = search.strip_prefix('?').unwrap_or(search);

        Self {
            pairs: form_urlencoded::parse(raw.as_bytes())
                .map(|(name, value)| (name.into_owned(), value.into_owned()))
                .collect(),
        }
    }

    /// Returns the value of the first parameter with the given name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.as_str())
    }

    /// Sets the parameter, replacing the first occurrence in place and
    /// removing any further occurrences; appends if the name is absent.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.pairs.iter().position(|(n, _)| n == name) {
            Some(at) => {
                self.pairs[at].1 = value.to_owned();

                let mut seen = 0usize;
                self.pairs.retain(|(n, _)| {
                    if n == name {
                        seen += 1;
                        seen == 1
                    } else {
                        true
                    }
                });
            }
            None => self.pairs.push((name.to_owned(), value.to_owned())),
        }
    }

    /// Removes all occurrences of the parameter.
    pub fn delete(&mut self, name: &str) {
        self.pairs.retain(|(n, _)| n != name);
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Serializes without a leading `?`.
    pub fn serialize(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str())))
            .finish()
    }

    /// Serializes to a search string: empty, or `?` followed by the
    /// encoded parameters.
    pub fn to_search(&self) -> String {
        if self.pairs.is_empty() {
            String::new()
        } else {
            format!("?{}", self.serialize())
        }
    }
}
