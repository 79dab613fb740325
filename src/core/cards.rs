//! Card view state for the credential list.

use crate::constants::PASSWORD_MASK;
use crate::core::icons::PlatformIcon;
use crate::models::credential::Credential;

/// One rendered credential. Visibility starts masked on every render.
#[derive(Debug, Clone)]
pub struct CredentialCard<'a> {
    credential: &'a Credential,
    revealed: bool,
}

impl<'a> CredentialCard<'a> {
    pub fn new(credential: &'a Credential) -> Self {
        Self {
            credential,
            revealed: false,
        }
    }

    pub fn credential(&self) -> &'a Credential {
        self.credential
    }

    pub fn icon(&self) -> PlatformIcon {
        PlatformIcon::for_platform(&self.credential.platform)
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn toggle_password(&mut self) {
        self.revealed = !self.revealed;
    }

    /// The password as it should appear: plaintext when revealed, the fixed mask otherwise.
    pub fn password_display(&self) -> &'a str {
        if self.revealed {
            &self.credential.password
        } else {
            PASSWORD_MASK
        }
    }
}

/// Render a list of visible credentials as fresh, masked cards.
pub fn render<'a>(visible: &[&'a Credential]) -> Vec<CredentialCard<'a>> {
    visible.iter().map(|c| CredentialCard::new(c)).collect()
}
