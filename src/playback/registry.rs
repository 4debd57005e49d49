use std::collections::HashMap;

use crate::shared::entities::AnimationDescriptor;
use crate::shared::error::AnimationError;

/// Read-only catalog of named animations. Exactly one descriptor is the
/// default (idle) pose; construction rejects anything else.
#[derive(Debug)]
pub struct AnimationRegistry {
    by_name: HashMap<&'static str, AnimationDescriptor>,
    default_name: &'static str,
}

impl AnimationRegistry {
    pub fn new(descriptors: Vec<AnimationDescriptor>) -> Result<Self, AnimationError> {
        let mut by_name = HashMap::new();
        let mut default_name = None;
        for desc in descriptors {
            if desc.is_default {
                if let Some(existing) = default_name {
                    if existing != desc.name {
                        return Err(AnimationError::DuplicateDefault(desc.name.to_string()));
                    }
                }
                default_name = Some(desc.name);
            }
            by_name.insert(desc.name, desc);
        }
        let default_name = default_name.ok_or(AnimationError::NoDefault)?;
        Ok(Self {
            by_name,
            default_name,
        })
    }

    pub fn lookup(&self, name: &str) -> Option<&AnimationDescriptor> {
        self.by_name.get(name)
    }

    pub fn default_name(&self) -> &'static str {
        self.default_name
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &AnimationDescriptor> {
        self.by_name.values()
    }
}
