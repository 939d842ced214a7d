//! HTTP backend implementation.
//!
//! Talks to the backend's management API with a blocking [`ureq`] agent.
//! Authentication/session handling is out of scope here: the agent is
//! assumed to reach an already-authenticated endpoint (gateway, local
//! proxy, or an API that trusts the caller).

use crate::backend::SwitchBackend;
use crate::error::{Error, Result};
use crate::types::{AdapterRecord, ScopingTree};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use ureq::http::Response;
use ureq::{Agent, Body};

/// HTTP implementation of [`SwitchBackend`].
///
/// # Example
///
/// ```no_run
/// use switchkit::{HttpSwitchBackend, SwitchBackend};
///
/// let backend = HttpSwitchBackend::new("https://backend.example.com");
/// let tree = backend.scoping_objects().unwrap();
/// ```
pub struct HttpSwitchBackend {
    /// HTTP agent for requests.
    agent: Agent,
    /// Backend API base URL.
    base_url: String,
}

/// Error body the backend returns for rejected operations.
#[derive(Debug, Deserialize)]
struct ApiFault {
    details: Option<String>,
}

impl HttpSwitchBackend {
    /// Create a backend client for the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        // Error statuses are handled here, not by the agent, so rejected
        // mutations keep their backend detail body.
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .build();
        Self {
            agent: Agent::new_with_config(config),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// The configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check the response status, mapping 404 to `NotFound` and other
    /// non-success statuses to the backend's fault detail.
    fn guard(what: &str, mut res: Response<Body>) -> Result<Response<Body>> {
        let status = res.status();
        if status.as_u16() == 404 {
            return Err(Error::not_found(what));
        }
        if !status.is_success() {
            let text = res.body_mut().read_to_string().unwrap_or_default();
            let detail = serde_json::from_str::<ApiFault>(&text)
                .ok()
                .and_then(|fault| fault.details)
                .unwrap_or(text);
            if detail.is_empty() {
                return Err(Error::Http {
                    message: format!("HTTP {}", status.as_u16()),
                    status: Some(status.as_u16()),
                });
            }
            return Err(Error::Api { detail });
        }
        Ok(res)
    }

    fn get_json<T: DeserializeOwned>(&self, what: &str, path: &str) -> Result<T> {
        let res = self
            .agent
            .get(self.url(path))
            .header("Accept", "application/json")
            .header("User-Agent", "switchkit")
            .call()?;
        Self::guard(what, res)?
            .body_mut()
            .read_json()
            .map_err(|e| Error::InvalidResponse(e.to_string()))
    }

    fn delete(&self, what: &str, path: &str) -> Result<()> {
        let res = self
            .agent
            .delete(self.url(path))
            .header("User-Agent", "switchkit")
            .call()?;
        Self::guard(what, res)?;
        Ok(())
    }
}

impl SwitchBackend for HttpSwitchBackend {
    fn scoping_objects(&self) -> Result<ScopingTree> {
        self.get_json("scoping objects", "/api/2.0/services/scopingobjects")
    }

    fn adapter(&self, adapter_id: &str) -> Result<AdapterRecord> {
        self.get_json(
            &format!("adapter {adapter_id}"),
            &format!("/api/2.0/vdn/switches/{adapter_id}"),
        )
    }

    fn update_adapter(&self, record: &AdapterRecord) -> Result<AdapterRecord> {
        let res = self
            .agent
            .put(self.url(&format!("/api/2.0/vdn/switches/{}", record.id)))
            .header("Accept", "application/json")
            .header("User-Agent", "switchkit")
            .send_json(record)?;
        Self::guard(&format!("adapter {}", record.id), res)?
            .body_mut()
            .read_json()
            .map_err(|e| Error::InvalidResponse(e.to_string()))
    }

    fn delete_port_group(&self, adapter_id: &str, backend_id: &str) -> Result<()> {
        self.delete(
            &format!("port group {backend_id}"),
            &format!("/api/2.0/vdn/portgroups/{adapter_id}/{backend_id}"),
        )
    }

    fn delete_virtual_wire(&self, backend_id: &str) -> Result<()> {
        self.delete(
            &format!("virtual wire {backend_id}"),
            &format!("/api/2.0/vdn/virtualwires/{backend_id}"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let backend = HttpSwitchBackend::new("https://backend.example.com/");
        assert_eq!(backend.base_url(), "https://backend.example.com");
        assert_eq!(
            backend.url("/api/2.0/vdn/virtualwires/virtualwire-1"),
            "https://backend.example.com/api/2.0/vdn/virtualwires/virtualwire-1"
        );
    }

    #[test]
    fn test_api_fault_body_parsing() {
        let fault: ApiFault =
            serde_json::from_str(r#"{"details": "No enum constant ROUND_ROBIN"}"#).unwrap();
        assert_eq!(fault.details.as_deref(), Some("No enum constant ROUND_ROBIN"));

        let fault: ApiFault = serde_json::from_str("{}").unwrap();
        assert!(fault.details.is_none());
    }
}
