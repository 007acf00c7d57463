use egui::{Color32, Ui};
use portal_business::UsersListCache;

/// Shows whether the users list needs a refetch.
pub fn users_list_status(cache: &mut UsersListCache, ui: &mut Ui) {
    ui.horizontal(|ui| {
        if cache.is_stale() {
            ui.colored_label(
                Color32::from_rgb(255, 165, 0),
                format!(
                    "Users list: stale ({} invalidations)",
                    cache.invalidations()
                ),
            );
            if ui.button("Mark refreshed").clicked() {
                log::debug!("Users list marked refreshed");
                cache.mark_fresh();
            }
        } else {
            ui.label("Users list: up to date");
        }
    });
}
