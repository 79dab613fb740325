//! Credential form: controlled input state and submit validation.

use crate::core::password;
use crate::models::credential::{Credential, CredentialFields, SaveRequest};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("fill in all required fields (missing: {})", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("form is not open")]
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Platform,
    Domain,
    Username,
    Password,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Platform, Field::Domain, Field::Username, Field::Password];

    pub fn label(self) -> &'static str {
        match self {
            Field::Platform => "platform",
            Field::Domain => "domain",
            Field::Username => "username",
            Field::Password => "password",
        }
    }

    pub fn required(self) -> bool {
        !matches!(self, Field::Domain)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw text inputs as the user typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInputs {
    pub platform: String,
    pub domain: String,
    pub username: String,
    pub password: String,
}

impl FormInputs {
    fn from_credential(c: &Credential) -> Self {
        Self {
            platform: c.platform.clone(),
            domain: c.domain.clone().unwrap_or_default(),
            username: c.username.clone(),
            password: c.password.clone(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Platform => &self.platform,
            Field::Domain => &self.domain,
            Field::Username => &self.username,
            Field::Password => &self.password,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Platform => &mut self.platform,
            Field::Domain => &mut self.domain,
            Field::Username => &mut self.username,
            Field::Password => &mut self.password,
        }
    }

    /// Trim text fields, turn a blank domain into `None`, keep the password verbatim.
    fn normalized(&self) -> CredentialFields {
        let domain = self.domain.trim();
        CredentialFields {
            platform: self.platform.trim().to_string(),
            domain: (!domain.is_empty()).then(|| domain.to_string()),
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Closed,
    Create,
    Edit(Credential),
}

#[derive(Debug, Clone, Default)]
pub struct CredentialForm {
    mode: FormMode,
    inputs: FormInputs,
}

impl CredentialForm {
    /// Open for editing when given a credential, otherwise for creating.
    pub fn open(&mut self, credential: Option<&Credential>) {
        match credential {
            Some(c) => {
                self.inputs = FormInputs::from_credential(c);
                self.mode = FormMode::Edit(c.clone());
            }
            None => {
                self.inputs = FormInputs::default();
                self.mode = FormMode::Create;
            }
        }
    }

    /// Close without emitting anything; in-progress edits are dropped.
    pub fn cancel(&mut self) {
        self.mode = FormMode::Closed;
        self.inputs = FormInputs::default();
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.mode, FormMode::Closed)
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn inputs(&self) -> &FormInputs {
        &self.inputs
    }

    pub fn editing_id(&self) -> Option<&str> {
        match &self.mode {
            FormMode::Edit(c) => Some(&c.id),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Edit(_) => "Edit credential",
            _ => "New credential",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Edit(_) => "Update",
            _ => "Save",
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) -> Result<(), FormError> {
        if !self.is_open() {
            return Err(FormError::Closed);
        }
        *self.inputs.slot(field) = value.into();
        Ok(())
    }

    /// Replace the password input with a freshly generated one.
    pub fn generate_password(&mut self) -> Result<&str, FormError> {
        if !self.is_open() {
            return Err(FormError::Closed);
        }
        self.inputs.password = password::generate();
        Ok(&self.inputs.password)
    }

    /// Validate and build the save request. The form stays open either way;
    /// the caller closes it once the store accepted the request.
    pub fn submit(&self) -> Result<SaveRequest, FormError> {
        let fields = self.inputs.normalized();
        let missing: Vec<&'static str> = [
            (Field::Platform, fields.platform.is_empty()),
            (Field::Username, fields.username.is_empty()),
            (Field::Password, fields.password.is_empty()),
        ]
        .into_iter()
        .filter(|(_, empty)| *empty)
        .map(|(field, _)| field.label())
        .collect();

        match &self.mode {
            FormMode::Closed => Err(FormError::Closed),
            _ if !missing.is_empty() => Err(FormError::MissingFields(missing)),
            FormMode::Create => Ok(SaveRequest::Create(fields)),
            FormMode::Edit(c) => Ok(SaveRequest::Update {
                id: c.id.clone(),
                fields,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing() -> Credential {
        Credential {
            id: "abc".into(),
            platform: "Gmail".into(),
            domain: Some("gmail.com".into()),
            username: "a@b.com".into(),
            password: "Xx1!".into(),
            created_at: None,
            updated_at: None,
        }
    }

    fn fill(form: &mut CredentialForm, platform: &str, domain: &str, user: &str, pw: &str) {
        form.set(Field::Platform, platform).unwrap();
        form.set(Field::Domain, domain).unwrap();
        form.set(Field::Username, user).unwrap();
        form.set(Field::Password, pw).unwrap();
    }

    #[test]
    fn test_starts_closed() {
        let form = CredentialForm::default();
        assert!(!form.is_open());
        assert_eq!(form.submit(), Err(FormError::Closed));
    }

    #[test]
    fn test_open_create_is_blank() {
        let mut form = CredentialForm::default();
        form.open(None);
        assert_eq!(form.mode(), &FormMode::Create);
        assert_eq!(form.inputs(), &FormInputs::default());
        assert_eq!(form.title(), "New credential");
        assert_eq!(form.submit_label(), "Save");
    }

    #[test]
    fn test_open_edit_prefills_exact_values() {
        let mut form = CredentialForm::default();
        form.open(Some(&existing()));
        assert_eq!(form.inputs().platform, "Gmail");
        assert_eq!(form.inputs().domain, "gmail.com");
        assert_eq!(form.inputs().username, "a@b.com");
        assert_eq!(form.inputs().password, "Xx1!");
        assert_eq!(form.editing_id(), Some("abc"));
        assert_eq!(form.title(), "Edit credential");
    }

    #[test]
    fn test_open_edit_with_null_domain() {
        let mut cred = existing();
        cred.domain = None;
        let mut form = CredentialForm::default();
        form.open(Some(&cred));
        assert_eq!(form.inputs().domain, "");
    }

    #[test]
    fn test_reopen_create_after_edit_clears_inputs() {
        let mut form = CredentialForm::default();
        form.open(Some(&existing()));
        form.open(None);
        assert_eq!(form.inputs(), &FormInputs::default());
        assert_eq!(form.editing_id(), None);
    }

    #[test]
    fn test_missing_fields_rejected() {
        let mut form = CredentialForm::default();
        form.open(None);
        fill(&mut form, "  ", "", "user", "");
        let err = form.submit().unwrap_err();
        assert_eq!(err, FormError::MissingFields(vec!["platform", "password"]));
        assert!(form.is_open());
    }

    #[test]
    fn test_each_required_field_checked() {
        for field in [Field::Platform, Field::Username, Field::Password] {
            let mut form = CredentialForm::default();
            form.open(None);
            fill(&mut form, "P", "", "U", "pw");
            form.set(field, "").unwrap();
            assert_eq!(form.submit(), Err(FormError::MissingFields(vec![field.label()])));
        }
    }

    #[test]
    fn test_create_request_normalizes_inputs() {
        let mut form = CredentialForm::default();
        form.open(None);
        fill(&mut form, " Gmail ", "   ", " a@b.com ", " pw ");
        let req = form.submit().unwrap();
        assert_eq!(
            req,
            SaveRequest::Create(CredentialFields {
                platform: "Gmail".into(),
                domain: None,
                username: "a@b.com".into(),
                password: " pw ".into(),
            })
        );
    }

    #[test]
    fn test_edit_request_carries_id() {
        let mut form = CredentialForm::default();
        form.open(Some(&existing()));
        form.set(Field::Password, "new-pw").unwrap();
        let req = form.submit().unwrap();
        assert!(req.is_update());
        match req {
            SaveRequest::Update { id, fields } => {
                assert_eq!(id, "abc");
                assert_eq!(fields.password, "new-pw");
                assert_eq!(fields.domain.as_deref(), Some("gmail.com"));
            }
            SaveRequest::Create(_) => panic!("expected update"),
        }
    }

    #[test]
    fn test_cancel_discards_edits() {
        let mut form = CredentialForm::default();
        form.open(Some(&existing()));
        form.set(Field::Username, "changed").unwrap();
        form.cancel();
        assert!(!form.is_open());
        assert_eq!(form.inputs(), &FormInputs::default());
        assert_eq!(form.set(Field::Username, "x"), Err(FormError::Closed));
    }

    #[test]
    fn test_generate_password_fills_input() {
        let mut form = CredentialForm::default();
        form.open(None);
        let generated = form.generate_password().unwrap().to_string();
        assert_eq!(generated.len(), 16);
        assert_eq!(form.inputs().password, generated);
    }

    #[test]
    fn test_missing_fields_message() {
        let err = FormError::MissingFields(vec!["platform", "username"]);
        assert_eq!(
            err.to_string(),
            "fill in all required fields (missing: platform, username)"
        );
    }
}
