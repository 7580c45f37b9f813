// ABOUTME: Validated domain types for the healed resource.
// ABOUTME: Container group and resource group names, resource refs, container state.

mod container_group;
mod container_state;
mod resource_group;
mod resource_ref;

pub use container_group::{ContainerGroupName, ContainerGroupNameError};
pub use container_state::ContainerState;
pub use resource_group::{ResourceGroupName, ResourceGroupNameError};
pub use resource_ref::ResourceRef;
