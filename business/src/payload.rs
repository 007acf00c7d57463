//! Multipart payload sent to the user creation endpoint.

use crate::form::{FormField, NewUserForm};
use crate::roles::PortalRole;

/// One entry of the multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadPart {
    Text {
        name: &'static str,
        value: String,
    },
    File {
        name: &'static str,
        file_name: String,
        mime_type: String,
        bytes: Vec<u8>,
    },
}

impl PayloadPart {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// Transport payload for a single create-user call.
///
/// Parts are kept in the order the server receives them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserPayload {
    parts: Vec<PayloadPart>,
}

impl CreateUserPayload {
    /// Packs the form into parts: scalar text fields, `roles` as a JSON
    /// array, `is_superuser` as `"true"`/`"false"`, and `avatar` only when
    /// one was chosen.
    ///
    /// Does not validate; callers gate on [`NewUserForm::validate`] first.
    pub fn from_form(form: &NewUserForm) -> Result<Self, serde_json::Error> {
        let roles: Vec<PortalRole> = form.roles.iter().copied().collect();

        let mut parts = vec![
            text(FormField::Name, &form.name),
            text(FormField::Surname, &form.surname),
            text(FormField::MiddleName, &form.middle_name),
            text(FormField::BirthYear, &form.birth_year),
            text(FormField::Email, &form.email),
            text(FormField::Password, &form.password),
            text(FormField::ConfirmPassword, &form.confirm_password),
            PayloadPart::Text {
                name: FormField::Roles.key(),
                value: serde_json::to_string(&roles)?,
            },
            PayloadPart::Text {
                name: FormField::IsSuperuser.key(),
                value: form.is_superuser.to_string(),
            },
        ];

        if let Some(avatar) = &form.avatar {
            parts.push(PayloadPart::File {
                name: FormField::Avatar.key(),
                file_name: avatar.file_name.clone(),
                mime_type: avatar.mime_type.clone(),
                bytes: avatar.bytes.clone(),
            });
        }

        Ok(Self { parts })
    }

    pub fn parts(&self) -> &[PayloadPart] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<PayloadPart> {
        self.parts
    }

    /// Value of a text part, if present.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            PayloadPart::Text { name: n, value } if *n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// The file part with the given name, if present.
    pub fn file(&self, name: &str) -> Option<&PayloadPart> {
        self.parts
            .iter()
            .find(|part| matches!(part, PayloadPart::File { name: n, .. } if *n == name))
    }

    /// Part names in order, safe for logging.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.parts.iter().map(PayloadPart::name).collect()
    }
}

fn text(field: FormField, value: &str) -> PayloadPart {
    PayloadPart::Text {
        name: field.key(),
        value: value.to_owned(),
    }
}
