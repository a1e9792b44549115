//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::FlairClient;
use crate::error::Result;
use crate::models::{Attributes, Model};

/// Fetch a single entity by ID.
///
/// # Example
///
/// ```ignore
/// use flair_api::{FlairClient, Get, Vent};
///
/// let client = FlairClient::from_env()?;
/// let vent = Vent::get(&client, "42".to_string()).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity.
    type Id;

    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn get(client: &FlairClient, id: Self::Id) -> Result<Self>;
}

#[async_trait]
impl<A: Attributes> Get for Model<A> {
    type Id = String;

    #[tracing::instrument(skip(client), fields(resource_type = %A::resource_type()))]
    async fn get(client: &FlairClient, id: String) -> Result<Self> {
        let object = client.get_object(&A::resource_type(), &id).await?;
        Model::from_object(object, Some(client))
    }
}
