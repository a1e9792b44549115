//! List trait for fetching collections of entities.

use async_trait::async_trait;

use crate::client::FlairClient;
use crate::error::Result;
use crate::models::{Attributes, Model};

/// List every entity of a type.
///
/// The Flair API is not paginated by this client; the whole collection comes
/// back in one response.
///
/// # Example
///
/// ```ignore
/// use flair_api::{FlairClient, List, Structure};
///
/// let client = FlairClient::from_env()?;
/// let structures = Structure::list(&client).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// List all entities, in server order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list(client: &FlairClient) -> Result<Vec<Self>>;
}

#[async_trait]
impl<A: Attributes> List for Model<A> {
    #[tracing::instrument(skip(client), fields(resource_type = %A::resource_type()))]
    async fn list(client: &FlairClient) -> Result<Vec<Self>> {
        client
            .get_document(&A::resource_type(), None)
            .await?
            .into_many()
            .into_iter()
            .map(|object| Model::from_object(object, Some(client)))
            .collect()
    }
}
