use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored credential row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub id: String,
    pub platform: String,
    #[serde(default)]
    pub domain: Option<String>,
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Credential {
    pub fn fields(&self) -> CredentialFields {
        CredentialFields {
            platform: self.platform.clone(),
            domain: self.domain.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

/// The editable part of a credential, sent as the insert/update body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialFields {
    pub platform: String,
    pub domain: Option<String>,
    pub username: String,
    pub password: String,
}

/// What a submitted form asks the store to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveRequest {
    Create(CredentialFields),
    Update { id: String, fields: CredentialFields },
}

impl SaveRequest {
    pub fn is_update(&self) -> bool {
        matches!(self, SaveRequest::Update { .. })
    }
}
