//! Update trait for modifying entities by id.

use async_trait::async_trait;

use crate::client::FlairClient;
use crate::document::AttributeMap;
use crate::error::Result;
use crate::models::{Attributes, Model};
use crate::relationships::RelationshipMap;

/// Update an existing entity without holding a copy of it.
///
/// To update a model you already have, use the instance method
/// [`Model::update`], which merges the answer into the model.
///
/// # Example
///
/// ```ignore
/// use flair_api::{FlairClient, RelationshipMap, Update, Vent};
/// use serde_json::json;
///
/// let mut changes = serde_json::Map::new();
/// changes.insert("percent-open".into(), json!(50));
/// let vent = Vent::patch(&client, "42".to_string(), changes, RelationshipMap::new()).await?;
/// ```
#[async_trait]
pub trait Update: Sized {
    /// The ID type for this entity.
    type Id;

    /// Apply a partial update and return the updated entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn patch(
        client: &FlairClient,
        id: Self::Id,
        attributes: AttributeMap,
        relationships: RelationshipMap,
    ) -> Result<Self>;
}

#[async_trait]
impl<A: Attributes> Update for Model<A> {
    type Id = String;

    #[tracing::instrument(skip(client, attributes, relationships), fields(resource_type = %A::resource_type()))]
    async fn patch(
        client: &FlairClient,
        id: String,
        attributes: AttributeMap,
        relationships: RelationshipMap,
    ) -> Result<Self> {
        let object = client
            .update_object(&A::resource_type(), &id, &attributes, &relationships)
            .await?;
        Model::from_object(object, Some(client))
    }
}
