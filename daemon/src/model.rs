//! Transliteration model selection.

use std::fmt;
use thiserror::Error;

/// Identifier of a remote transliteration model variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelId {
    A,
    B,
}

impl ModelId {
    /// Integer id carried in the service request body.
    pub fn wire_id(self) -> u32 {
        match self {
            ModelId::A => 1,
            ModelId::B => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ModelId::A => "A",
            ModelId::B => "B",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown model id {0}")]
pub struct UnknownModelId(pub u32);

impl TryFrom<u32> for ModelId {
    type Error = UnknownModelId;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(ModelId::A),
            2 => Ok(ModelId::B),
            other => Err(UnknownModelId(other)),
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Model {}", self.label())
    }
}

/// Holds the active model and the transient activation notice.
///
/// The notice is a display-state flag only; it never gates dispatch. Expiry
/// is driven by the controller, which owns the timing.
#[derive(Debug)]
pub struct ModelSelector {
    active: ModelId,
    notice: Option<String>,
}

impl ModelSelector {
    pub fn new(active: ModelId) -> Self {
        Self {
            active,
            notice: None,
        }
    }

    pub fn active(&self) -> ModelId {
        self.active
    }

    /// Switch the active model and raise the activation notice.
    ///
    /// Only dispatches issued after this call see the new id; anything
    /// already in flight keeps the id it was dispatched with.
    pub fn set_active(&mut self, model: ModelId) {
        self.active = model;
        self.notice = Some(format!("{} activated", model));
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }
}
