// ABOUTME: Fully qualified reference to the container group being healed.
// ABOUTME: Subscription, resource group and container group, validated once at startup.

use std::fmt;

use super::{ContainerGroupName, ResourceGroupName};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    pub subscription_id: String,
    pub resource_group: ResourceGroupName,
    pub container_group: ContainerGroupName,
}

impl ResourceRef {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group: ResourceGroupName,
        container_group: ContainerGroupName,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group,
            container_group,
        }
    }

    /// Key identifying this resource on disk, e.g. for lease files.
    pub fn lease_key(&self) -> String {
        format!("{}.{}", self.resource_group, self.container_group)
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.resource_group, self.container_group)
    }
}
