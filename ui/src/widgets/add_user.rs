//! "Add User" button and modal dialog.

use egui::{Button, Color32, TextEdit, Ui, Window};
use portal_business::{FormField, PortalRole, UserCreationDialog};

use crate::state::State;

/// Widget state that lives outside the business dialog.
#[derive(Debug, Default)]
pub struct AddUserView {
    pub show_password: bool,
}

impl AddUserView {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

pub fn add_user_button(state: &mut State, ui: &mut Ui) {
    if ui.button("Add User").clicked() {
        state.dialog.open();
    }
}

/// Renders the dialog while it is open. Closing the window acts as Cancel.
pub fn add_user_dialog(state: &mut State, ui: &mut Ui) {
    if !state.dialog.is_open() {
        return;
    }

    let State {
        dialog,
        add_user_view: view,
        avatar_picker,
        ..
    } = state;
    let mut open = true;

    Window::new("Add User")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ui.ctx(), |ui| {
            for field in [
                FormField::Email,
                FormField::Name,
                FormField::Surname,
                FormField::MiddleName,
                FormField::BirthYear,
            ] {
                text_field(dialog, field, false, ui);
            }

            text_field(dialog, FormField::Password, !view.show_password, ui);
            let toggle = if view.show_password { "Hide" } else { "Show" };
            if ui.small_button(toggle).clicked() {
                view.show_password = !view.show_password;
            }
            text_field(dialog, FormField::ConfirmPassword, true, ui);

            ui.add_space(8.0);
            roles(dialog, ui);
            ui.checkbox(
                &mut dialog.form_mut().is_superuser,
                FormField::IsSuperuser.label(),
            );

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label(FormField::Avatar.label());
                let chosen = dialog.form().avatar.as_ref().map(|a| a.file_name.clone());
                match chosen {
                    Some(file_name) => {
                        ui.label(file_name);
                        if ui.button("Remove").clicked() {
                            dialog.form_mut().clear_avatar();
                        }
                    }
                    None => {
                        ui.label("No file chosen");
                    }
                }
                if ui.button("Choose...").clicked() {
                    dialog.select_avatar(avatar_picker.pick_avatars());
                }
            });

            ui.add_space(16.0);
            ui.horizontal(|ui| {
                let submitting = dialog.is_submitting();
                if ui.add_enabled(!submitting, Button::new("Save")).clicked() {
                    let outcome = dialog.submit();
                    log::debug!("Add user save: {outcome:?}");
                }
                if submitting {
                    ui.spinner();
                }
                if ui.button("Cancel").clicked() {
                    dialog.cancel();
                }
            });
        });

    if !open {
        dialog.cancel();
    }
}

fn text_field(dialog: &mut UserCreationDialog, field: FormField, masked: bool, ui: &mut Ui) {
    let label = if field.is_required() {
        format!("{} *", field.label())
    } else {
        field.label().to_owned()
    };
    let label = ui.label(label);

    let Some(text) = dialog.form_mut().text_mut(field) else {
        return;
    };
    let response = ui
        .add(TextEdit::singleline(text).password(masked))
        .labelled_by(label.id);
    if response.lost_focus() {
        dialog.blur(field);
    }

    error_label(dialog, field, ui);
}

fn roles(dialog: &mut UserCreationDialog, ui: &mut Ui) {
    ui.label(format!("{} *", FormField::Roles.label()));
    ui.horizontal(|ui| {
        for role in PortalRole::ALL {
            let mut selected = dialog.form().roles.contains(&role);
            if ui.checkbox(&mut selected, role.label()).changed() {
                dialog.form_mut().set_role(role, selected);
                dialog.blur(FormField::Roles);
            }
        }
    });
    error_label(dialog, FormField::Roles, ui);
}

fn error_label(dialog: &UserCreationDialog, field: FormField, ui: &mut Ui) {
    if let Some(err) = dialog.error(field) {
        ui.colored_label(Color32::RED, err.to_string());
    }
}
