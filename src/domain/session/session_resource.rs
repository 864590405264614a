use chrono::{DateTime, TimeDelta, Utc};

use crate::api::session_dto::SessionDto;
use crate::error::{Error, Result};

/// A compute session owned by the remote platform. Read-only on this side.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionResource {
    pub session_id: String,
    pub machine_id: Option<String>,
    pub gpu: Option<String>,
    pub timeout_minutes: Option<u32>,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SessionResource {
    pub fn from_dto(dto: SessionDto) -> Result<SessionResource> {
        let created_at = DateTime::parse_from_rfc3339(&dto.created_at)
            .map_err(|e| {
                Error::ModelConstructionError(format!("session '{}' has invalid created_at '{}': {}", dto.session_id, dto.created_at, e))
            })?
            .with_timezone(&Utc);

        Ok(SessionResource {
            session_id: dto.session_id,
            machine_id: dto.machine_id,
            gpu: dto.gpu,
            timeout_minutes: dto.timeout,
            url: dto.url,
            created_at,
        })
    }

    /// When the platform will shut the session down, if it has a timeout.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.timeout_minutes.map(|minutes| self.created_at + TimeDelta::minutes(i64::from(minutes)))
    }

    pub fn remaining(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        self.expires_at().map(|expires_at| (expires_at - now).max(TimeDelta::zero()))
    }
}
