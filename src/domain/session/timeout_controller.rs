use crate::api::session_dto::{IncreaseTimeoutRequestDto, SessionDto, TimeoutAckDto};
use crate::domain::context::scope;
use crate::domain::platform::client::PlatformClient;
use crate::domain::platform::endpoint::ApiEndpoint;
use crate::domain::session::session_resource::SessionResource;
use crate::error::{Error, Result};

/// Reads compute sessions and asks the platform to extend their time-to-live.
///
/// Errors are attributed to whatever operation context the caller has active.
#[derive(Debug, Clone)]
pub struct SessionTimeoutController {
    client: PlatformClient,
}

impl SessionTimeoutController {
    pub fn new(client: PlatformClient) -> Self {
        SessionTimeoutController { client }
    }

    /// An empty `session_id` disables the lookup: `Ok(None)` and no request is sent.
    ///
    /// `.` and `..` are rejected locally since no encoding keeps them from being read as path steps.
    pub async fn get_session(&self, session_id: &str) -> Result<Option<SessionResource>> {
        let session_id = session_id.trim();
        if session_id.is_empty() {
            log::debug!("No session id given; skipping session lookup.");
            return Ok(None);
        }
        if session_id == "." || session_id == ".." {
            return Err(Error::InvalidSessionId(session_id.to_string()).with_context(scope::current()));
        }

        let endpoint = ApiEndpoint::Session(session_id.to_string());
        let session = self
            .client
            .call_with(&endpoint, Vec::new(), None, |value| {
                let dto: SessionDto = serde_json::from_value(value)?;
                SessionResource::from_dto(dto)
            })
            .await?;
        Ok(Some(session))
    }

    pub async fn extend_timeout(&self, timeout: u32, machine_id: &str, session_id: &str, gpu: &str) -> Result<TimeoutAckDto> {
        let request = IncreaseTimeoutRequestDto {
            timeout,
            machine_id: machine_id.to_string(),
            session_id: session_id.to_string(),
            gpu: gpu.to_string(),
        };
        log::info!("Requesting timeout of {} min for session {} on machine {} ({}).", timeout, session_id, machine_id, gpu);

        self.client.post(&ApiEndpoint::IncreaseTimeout, serde_json::to_value(&request)?).await
    }
}
