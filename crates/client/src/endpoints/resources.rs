//! Generic CRUD endpoints for collection resources.

use serde::Serialize;
use tracing::debug;

use crate::auth::SessionManager;
use crate::endpoints::{check_response, read_json, read_optional_json};
use crate::error::Result;
use crate::models::Resource;

/// List a collection, optionally filtered by query parameters.
pub async fn list<R: Resource>(
    session: &SessionManager,
    query: &[(&str, String)],
) -> Result<Vec<R>> {
    debug!("Listing {}", R::NAME);

    let url = session.url(R::PATH);
    let response = session.send(|http| http.get(&url).query(query)).await?;
    let response = check_response(response).await?;
    read_json(response).await
}

/// Fetch one item by id.
pub async fn get<R: Resource>(session: &SessionManager, id: &str) -> Result<R> {
    debug!("Getting {} {}", R::NAME, id);

    let url = format!("{}/{}", session.url(R::PATH), id);
    let response = session.send(|http| http.get(&url)).await?;
    let response = check_response(response).await?;
    read_json(response).await
}

/// Create an item and return it as stored by the server.
pub async fn create<R, B>(session: &SessionManager, body: &B) -> Result<R>
where
    R: Resource,
    B: Serialize + Sync + ?Sized,
{
    debug!("Creating {}", R::NAME);

    let url = session.url(R::PATH);
    let response = session.send(|http| http.post(&url).json(body)).await?;
    let response = check_response(response).await?;
    read_json(response).await
}

/// Update an item. Servers answering `204 No Content` yield `None`.
pub async fn update<R, B>(session: &SessionManager, id: &str, body: &B) -> Result<Option<R>>
where
    R: Resource,
    B: Serialize + Sync + ?Sized,
{
    debug!("Updating {} {}", R::NAME, id);

    let url = format!("{}/{}", session.url(R::PATH), id);
    let response = session.send(|http| http.put(&url).json(body)).await?;
    let response = check_response(response).await?;
    read_optional_json(response).await
}

/// Delete an item.
pub async fn delete<R: Resource>(session: &SessionManager, id: &str) -> Result<()> {
    debug!("Deleting {} {}", R::NAME, id);

    let url = format!("{}/{}", session.url(R::PATH), id);
    let response = session.send(|http| http.delete(&url)).await?;
    check_response(response).await?;
    Ok(())
}
