/// Options model: instances and group names, plus load/save against a store

use crate::instance::Instance;
use crate::storage::{OptionsDocument, OptionsStore, StoreError};
use crate::validation::{allowed_origins, invalid_group_names, is_valid_group_name, is_valid_host};
use thiserror::Error;

pub const OPTIONS_SAVED: &str = "Options saved.";
pub const NOTHING_TO_SAVE: &str = "Nothing to save.";
pub const GROUP_NAME_EXISTS: &str = "Group name already added.";

/// Rejected form input; the message is what the status line shows
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Incorrect instance values.")]
    InvalidInstance,
    #[error("Incorrect group name values.")]
    InvalidGroupName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceChange {
    Added,
    Updated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupNameChange {
    Added,
    Duplicate,
}

/// Result of saving group names
#[derive(Debug, Clone, PartialEq)]
pub enum GroupNameSave {
    Saved,
    /// Nothing was persisted because these names fail the pattern
    Invalid(Vec<String>),
    Empty,
    Failed(StoreError),
}

impl GroupNameSave {
    pub fn status_message(&self) -> String {
        match self {
            GroupNameSave::Saved => OPTIONS_SAVED.to_string(),
            GroupNameSave::Invalid(names) => format!("Invalid group names: {}", names.join(", ")),
            GroupNameSave::Empty => NOTHING_TO_SAVE.to_string(),
            GroupNameSave::Failed(err) => err.to_string(),
        }
    }
}

/// In-memory options owned by the options page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionsController {
    instances: Vec<Instance>,
    group_names: Vec<String>,
}

impl OptionsController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn group_names(&self) -> &[String] {
        &self.group_names
    }

    /// Snapshot of the current model in its persisted shape
    pub fn document(&self) -> OptionsDocument {
        OptionsDocument::new(self.instances.clone(), self.group_names.clone())
    }

    /// Insert an instance, or update name/enabled if the host is already known
    pub fn add_instance(&mut self, host: &str, name: &str, enabled: bool) -> InstanceChange {
        match self.instances.iter_mut().find(|i| i.host == host) {
            Some(existing) => {
                existing.name = name.to_string();
                existing.enabled = enabled;
                log::debug!("Updated instance {}", host);
                InstanceChange::Updated
            }
            None => {
                self.instances.push(Instance::new(host, name, enabled));
                log::debug!("Added instance {}", host);
                InstanceChange::Added
            }
        }
    }

    /// Live checkbox edit. Returns false for an unknown host.
    pub fn set_instance_enabled(&mut self, host: &str, enabled: bool) -> bool {
        self.instances
            .iter_mut()
            .find(|i| i.host == host)
            .map(|instance| {
                instance.enabled = enabled;
            })
            .is_some()
    }

    pub fn add_group_name(&mut self, name: &str) -> GroupNameChange {
        if self.group_names.iter().any(|n| n == name) {
            return GroupNameChange::Duplicate;
        }

        self.group_names.push(name.to_string());
        log::debug!("Added group name {}", name);
        GroupNameChange::Added
    }

    /// Merge a persisted document through the same add rules as user input
    pub fn apply_document(&mut self, document: OptionsDocument) {
        for instance in &document.instances {
            self.add_instance(&instance.host, &instance.name, instance.enabled);
        }
        for name in &document.group_names {
            if self.add_group_name(name) == GroupNameChange::Duplicate {
                log::warn!("Ignoring duplicate stored group name {}", name);
            }
        }
    }

    /// Grant origins for enabled instances, then persist the full document
    ///
    /// The two steps are not atomic; saving again repairs a partial failure.
    pub async fn save_instance_options<S: OptionsStore>(&self, store: &S) -> Result<(), StoreError> {
        let origins = allowed_origins(&self.instances);
        log::info!("Saving instances, allowing origins {:?}", origins);

        store.set_allowed_origins(&origins).await?;
        store.save_options(&self.document()).await
    }

    /// Persist the full document only if every group name is valid
    pub async fn save_group_name_options<S: OptionsStore>(&self, store: &S) -> GroupNameSave {
        let invalid = invalid_group_names(&self.group_names);

        if !invalid.is_empty() {
            log::warn!("Not saving, invalid group names {:?}", invalid);
            return GroupNameSave::Invalid(invalid);
        }
        if self.group_names.is_empty() {
            return GroupNameSave::Empty;
        }

        match store.save_options(&self.document()).await {
            Ok(()) => {
                log::info!("Saved {} group names", self.group_names.len());
                GroupNameSave::Saved
            }
            Err(e) => {
                log::error!("Failed to save group names: {}", e);
                GroupNameSave::Failed(e)
            }
        }
    }
}

/// Trimmed (host, name) if the host starts with an http(s) origin and the name is non-empty
pub fn check_instance_input<'a>(host: &'a str, name: &'a str) -> Result<(&'a str, &'a str), InputError> {
    let host = host.trim();
    let name = name.trim();

    if !is_valid_host(host) || name.is_empty() {
        log::warn!("Rejected instance input {:?} / {:?}", host, name);
        return Err(InputError::InvalidInstance);
    }
    Ok((host, name))
}

/// Trimmed group name if it matches the group name pattern
pub fn check_group_name_input(name: &str) -> Result<&str, InputError> {
    let name = name.trim();

    if !is_valid_group_name(name) {
        log::warn!("Rejected group name input {:?}", name);
        return Err(InputError::InvalidGroupName);
    }
    Ok(name)
}

/// Fetch the persisted document. Errors are left to the caller.
pub async fn load_options<S: OptionsStore>(store: &S) -> Result<OptionsDocument, StoreError> {
    let document = store.fetch_options().await?;
    log::info!(
        "Loaded {} instances and {} group names",
        document.instances.len(),
        document.group_names.len()
    );
    Ok(document)
}
