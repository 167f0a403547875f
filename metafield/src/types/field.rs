use chrono::{DateTime, Utc};
use metafield_fields::{FieldConfig, FieldKind};
use serde::{Deserialize, Serialize};

use crate::ids::{FieldId, Scope};

/// A named, typed field definition owned by one scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub id: FieldId,
    pub scope: Scope,
    pub name: String,
    pub config: FieldConfig,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Field {
    pub fn kind(&self) -> FieldKind {
        self.config.kind()
    }
}

/// Partial update of a field. `None` leaves the attribute unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replaces the whole configuration, including the kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<FieldConfig>,
}

impl FieldPatch {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.config.is_none()
    }
}
