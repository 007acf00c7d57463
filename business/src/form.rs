//! Form state for creating a portal user.
//!
//! `NewUserForm` holds the raw values as typed by the operator. `FieldErrors`
//! holds the current inline error per field. Both are plain data; the
//! [`UserCreationDialog`](crate::UserCreationDialog) decides when to validate.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::avatar::AvatarFile;
use crate::roles::PortalRole;
use crate::validation::{
    ValidationError, validate_confirm_password, validate_email, validate_password, validate_roles,
};

/// Every input of the form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Email,
    Name,
    Surname,
    MiddleName,
    BirthYear,
    Password,
    ConfirmPassword,
    Avatar,
    Roles,
    IsSuperuser,
}

impl FormField {
    pub const ALL: [Self; 10] = [
        Self::Email,
        Self::Name,
        Self::Surname,
        Self::MiddleName,
        Self::BirthYear,
        Self::Password,
        Self::ConfirmPassword,
        Self::Avatar,
        Self::Roles,
        Self::IsSuperuser,
    ];

    /// Name of the field on the wire.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Name => "name",
            Self::Surname => "surname",
            Self::MiddleName => "middle_name",
            Self::BirthYear => "birth_year",
            Self::Password => "password",
            Self::ConfirmPassword => "confirm_password",
            Self::Avatar => "avatar",
            Self::Roles => "roles",
            Self::IsSuperuser => "is_superuser",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Name => "Name",
            Self::Surname => "Surname",
            Self::MiddleName => "Middle Name",
            Self::BirthYear => "Birth Year",
            Self::Password => "Set Password",
            Self::ConfirmPassword => "Confirm Password",
            Self::Avatar => "Avatar",
            Self::Roles => "Roles",
            Self::IsSuperuser => "Superuser",
        }
    }

    pub const fn is_required(self) -> bool {
        matches!(
            self,
            Self::Email | Self::Password | Self::ConfirmPassword | Self::Roles
        )
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Raw values of the user creation form.
///
/// `Default` is the declared initial state: empty strings, no roles, not a
/// superuser, no avatar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUserForm {
    pub email: String,
    pub name: String,
    pub surname: String,
    pub middle_name: String,
    /// Free text; not checked for being a number or a plausible year.
    pub birth_year: String,
    pub password: String,
    pub confirm_password: String,
    pub roles: BTreeSet<PortalRole>,
    pub is_superuser: bool,
    pub avatar: Option<AvatarFile>,
}

impl NewUserForm {
    /// Runs the rule for a single field against the current values.
    ///
    /// Optional fields always pass.
    pub fn validate_field(&self, field: FormField) -> Result<(), ValidationError> {
        match field {
            FormField::Email => validate_email(&self.email),
            FormField::Password => validate_password(&self.password),
            FormField::ConfirmPassword => {
                validate_confirm_password(&self.confirm_password, &self.password)
            }
            FormField::Roles => validate_roles(&self.roles),
            FormField::Name
            | FormField::Surname
            | FormField::MiddleName
            | FormField::BirthYear
            | FormField::Avatar
            | FormField::IsSuperuser => Ok(()),
        }
    }

    /// Runs every rule. Returns all failures, keyed by field.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        for field in FormField::ALL {
            if let Err(err) = self.validate_field(field) {
                errors.insert(field, err);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// The string behind a text field, for input bindings.
    pub fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Email => Some(&mut self.email),
            FormField::Name => Some(&mut self.name),
            FormField::Surname => Some(&mut self.surname),
            FormField::MiddleName => Some(&mut self.middle_name),
            FormField::BirthYear => Some(&mut self.birth_year),
            FormField::Password => Some(&mut self.password),
            FormField::ConfirmPassword => Some(&mut self.confirm_password),
            FormField::Avatar | FormField::Roles | FormField::IsSuperuser => None,
        }
    }

    pub fn toggle_role(&mut self, role: PortalRole) {
        if !self.roles.remove(&role) {
            self.roles.insert(role);
        }
    }

    pub fn set_role(&mut self, role: PortalRole, selected: bool) {
        if selected {
            self.roles.insert(role);
        } else {
            self.roles.remove(&role);
        }
    }

    /// Applies a file selection. Only the first file is kept; an empty
    /// selection leaves the current avatar untouched.
    pub fn select_avatar(&mut self, files: impl IntoIterator<Item = AvatarFile>) {
        if let Some(first) = files.into_iter().next() {
            self.avatar = Some(first);
        }
    }

    pub fn clear_avatar(&mut self) {
        self.avatar = None;
    }

    /// Back to the declared defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Inline validation errors, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    inner: BTreeMap<FormField, ValidationError>,
}

impl FieldErrors {
    pub fn get(&self, field: FormField) -> Option<ValidationError> {
        self.inner.get(&field).copied()
    }

    pub fn insert(&mut self, field: FormField, error: ValidationError) {
        self.inner.insert(field, error);
    }

    pub fn remove(&mut self, field: FormField) {
        self.inner.remove(&field);
    }

    /// Stores the outcome of validating `field`: sets or clears its error.
    pub fn record(&mut self, field: FormField, result: Result<(), ValidationError>) {
        match result {
            Ok(()) => self.remove(field),
            Err(err) => self.insert(field, err),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, ValidationError)> + '_ {
        self.inner.iter().map(|(field, err)| (*field, *err))
    }
}
