//! HTTP client for the tenant's information-barrier management API.
//!
//! All paths are tenant-scoped when a tenant id is configured:
//! `/tenants/{tenant}/segments`, `/tenants/{tenant}/barrier-policies`, etc.
//! Mutation requests carry the open management session's id in the
//! `X-Session-Id` header.

use reqwest::{header, Method};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Error;
use crate::model::{
    ApplicationJob, BarrierPolicy, CreatePolicyRequest, Paginated, Segment, Session,
    UpdatePolicyRequest,
};

const SESSION_HEADER: &str = "X-Session-Id";

/// Client for the information-barrier management API.
///
/// Holds an optional explicit session handle; callers that run inside an
/// externally managed session never call [`BarrierClient::open_session`].
pub struct BarrierClient {
    base_url: String,
    tenant_id: Option<String>,
    http: reqwest::Client,
    session: Option<Session>,
}

impl BarrierClient {
    pub fn new(
        base_url: &str,
        api_key: Option<&str>,
        tenant_id: Option<&str>,
    ) -> Result<Self, Error> {
        let mut headers = header::HeaderMap::new();
        if let Some(key) = api_key {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", key))
                    .map_err(|_| Error::Config("api key is not a valid header value".into()))?,
            );
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Http {
                endpoint: "client init".into(),
                source: e,
            })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            tenant_id: tenant_id.map(String::from),
            http,
            session: None,
        })
    }

    /// The currently open management session, if any.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Open a management session. Subsequent requests carry its id.
    pub async fn open_session(&mut self) -> Result<(), Error> {
        let session: Session = self.send(Method::POST, "/sessions", None::<&()>).await?;
        tracing::info!(session = %session.id, "management session opened");
        self.session = Some(session);
        Ok(())
    }

    /// Close the open management session, if one was opened by this client.
    pub async fn close_session(&mut self) -> Result<(), Error> {
        let Some(session) = self.session.take() else {
            return Ok(());
        };
        let path = format!("/sessions/{}", session.id);
        let endpoint = format!("DELETE {}", path);
        let resp = self
            .request(Method::DELETE, &path)
            .send()
            .await
            .map_err(|e| Error::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }
        tracing::info!(session = %session.id, "management session closed");
        Ok(())
    }

    /// List all segments in the tenant.
    pub async fn segments(&self) -> Result<Vec<Segment>, Error> {
        let page: Paginated<Segment> = self.send(Method::GET, "/segments", None::<&()>).await?;
        Ok(page.items)
    }

    /// List all barrier policies in the tenant.
    pub async fn barrier_policies(&self) -> Result<Vec<BarrierPolicy>, Error> {
        let page: Paginated<BarrierPolicy> = self
            .send(Method::GET, "/barrier-policies", None::<&()>)
            .await?;
        Ok(page.items)
    }

    /// Get one barrier policy by its opaque id.
    pub async fn barrier_policy(&self, id: &str) -> Result<BarrierPolicy, Error> {
        self.send(Method::GET, &format!("/barrier-policies/{}", id), None::<&()>)
            .await
    }

    /// Create a barrier policy for a segment.
    pub async fn create_policy(&self, req: &CreatePolicyRequest) -> Result<BarrierPolicy, Error> {
        self.send(Method::POST, "/barrier-policies", Some(req)).await
    }

    /// Update an existing barrier policy in place.
    pub async fn update_policy(
        &self,
        id: &str,
        req: &UpdatePolicyRequest,
    ) -> Result<BarrierPolicy, Error> {
        self.send(Method::PATCH, &format!("/barrier-policies/{}", id), Some(req))
            .await
    }

    /// Trigger tenant-side application of all pending policy changes.
    pub async fn start_application(&self) -> Result<ApplicationJob, Error> {
        self.send(Method::POST, "/barrier-policies/apply", None::<&()>)
            .await
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, self.tenant_path(path));
        let mut req = self.http.request(method, url);
        if let Some(session) = &self.session {
            req = req.header(SESSION_HEADER, &session.id);
        }
        req
    }

    async fn send<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, Error> {
        let endpoint = format!("{} {}", method, path);
        let mut req = self.request(method, path);
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(|e| Error::Http {
            endpoint: endpoint.clone(),
            source: e,
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }

        resp.json().await.map_err(|e| Error::Decode {
            endpoint,
            source: e,
        })
    }

    fn tenant_path(&self, path: &str) -> String {
        match &self.tenant_id {
            Some(tenant) => format!("/tenants/{}{}", tenant, path),
            None => path.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_path_scoping() {
        let client = BarrierClient::new("http://localhost", None, Some("t-1")).unwrap();
        assert_eq!(client.tenant_path("/segments"), "/tenants/t-1/segments");

        let client = BarrierClient::new("http://localhost", None, None).unwrap();
        assert_eq!(client.tenant_path("/segments"), "/segments");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = BarrierClient::new("http://localhost/v1/", None, None).unwrap();
        assert_eq!(client.base_url, "http://localhost/v1");
    }
}
