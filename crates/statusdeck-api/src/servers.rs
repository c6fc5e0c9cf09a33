// Server endpoints: `/servers`

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ServerBody, ServerResponse};

impl ApiClient {
    /// List every server.
    ///
    /// `GET /servers`
    pub async fn list_servers(&self) -> Result<Vec<ServerResponse>, Error> {
        let url = self.api_url("servers")?;
        self.get(url).await
    }

    /// Fetch a single server.
    ///
    /// `GET /servers/{id}`
    pub async fn get_server(&self, id: i64) -> Result<ServerResponse, Error> {
        let url = self.api_url(&format!("servers/{id}"))?;
        self.get(url).await
    }

    /// Create a server. The backend assigns the id.
    ///
    /// `POST /servers` with `{"name": "..."}`
    pub async fn create_server(&self, name: &str) -> Result<ServerResponse, Error> {
        let url = self.api_url("servers")?;
        debug!(name, "creating server");
        self.post(url, &ServerBody { name: name.into() }).await
    }

    /// Rename a server.
    ///
    /// `PUT /servers/{id}` with `{"name": "..."}`
    pub async fn update_server(&self, id: i64, name: &str) -> Result<ServerResponse, Error> {
        let url = self.api_url(&format!("servers/{id}"))?;
        debug!(id, name, "updating server");
        self.put(url, &ServerBody { name: name.into() }).await
    }

    /// Delete a server.
    ///
    /// `DELETE /servers/{id}`
    pub async fn delete_server(&self, id: i64) -> Result<(), Error> {
        let url = self.api_url(&format!("servers/{id}"))?;
        debug!(id, "deleting server");
        self.delete(url).await
    }
}
