//! User model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::{AttributeMap, ResourceIdentifier};
use crate::models::model::{Attributes, Model};
use crate::resource_type::ResourceType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UserAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: AttributeMap,
}

impl Attributes for UserAttributes {
    fn resource_type() -> ResourceType {
        ResourceType::Users
    }
}

/// An account user.
pub type User = Model<UserAttributes>;

impl Model<UserAttributes> {
    pub fn structures(&self) -> Vec<&ResourceIdentifier> {
        self.related("structures")
    }
}
