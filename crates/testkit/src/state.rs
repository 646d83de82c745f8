use std::collections::BTreeMap;

pub const NAME_ATTRIBUTE: &str = "name";
pub const COMMENT_ATTRIBUTE: &str = "comment";
pub const FULLY_QUALIFIED_NAME_ATTRIBUTE: &str = "fully_qualified_name";

/// Resource attributes after an apply or destroy step, keyed by address
/// (`<resource type>.<resource name>`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestState {
    resources: BTreeMap<String, ResourceState>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceState {
    pub attributes: BTreeMap<String, String>,
}

impl ResourceState {
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

impl TestState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_resource<I, K, V>(mut self, address: impl Into<String>, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.insert(address, attributes);
        self
    }

    pub fn insert<I, K, V>(&mut self, address: impl Into<String>, attributes: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let attributes = attributes
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        self.resources
            .insert(address.into(), ResourceState { attributes });
    }

    #[must_use]
    pub fn resource(&self, address: &str) -> Option<&ResourceState> {
        self.resources.get(address)
    }

    pub fn resources_of_type<'a>(
        &'a self,
        resource_type: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a ResourceState)> + 'a {
        self.resources
            .iter()
            .filter(move |(address, _)| {
                address
                    .split_once('.')
                    .is_some_and(|(kind, _)| kind == resource_type)
            })
            .map(|(address, resource)| (address.as_str(), resource))
    }
}
