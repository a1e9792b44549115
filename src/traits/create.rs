//! Create trait for new entities.

use async_trait::async_trait;

use crate::client::FlairClient;
use crate::document::attribute_map;
use crate::error::Result;
use crate::models::{Attributes, Model};
use crate::relationships::RelationshipMap;

/// Create a new entity on the server.
///
/// # Example
///
/// ```ignore
/// use flair_api::{Create, FlairClient, RelationshipMap, Related, Room, RoomAttributes};
///
/// let attributes = RoomAttributes { name: Some("Office".into()), ..Default::default() };
/// let relationships = RelationshipMap::new().with("structure", Related::to(&structure)?);
/// let room = Room::create(&client, attributes, relationships).await?;
/// ```
#[async_trait]
pub trait Create: Sized {
    /// Attributes accepted on creation.
    type Params: Send;

    /// Create the entity and return the server's copy.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the entity or the request fails.
    async fn create(
        client: &FlairClient,
        params: Self::Params,
        relationships: RelationshipMap,
    ) -> Result<Self>;
}

#[async_trait]
impl<A: Attributes> Create for Model<A> {
    type Params = A;

    #[tracing::instrument(skip(client, params, relationships), fields(resource_type = %A::resource_type()))]
    async fn create(
        client: &FlairClient,
        params: A,
        relationships: RelationshipMap,
    ) -> Result<Self> {
        let attributes = attribute_map(&params)?;
        let object = client
            .create_object(&A::resource_type(), &attributes, &relationships)
            .await?;
        Model::from_object(object, Some(client))
    }
}
