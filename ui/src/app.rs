use crate::{state::State, widgets};

pub struct PortalApp {
    state: State,
}

impl PortalApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }
}

impl eframe::App for PortalApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.sync();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.heading("Portal Admin");
                ui.separator();
                widgets::add_user_button(&mut self.state, ui);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Users");
            ui.label(format!("API: {}", self.state.config.api_base_url));
            ui.separator();
            widgets::users_list_status(&mut self.state.users_list, ui);

            widgets::add_user_dialog(&mut self.state, ui);
            widgets::toasts(&self.state.toast_board, ui);
        });

        if self.state.dialog.is_submitting() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }
    }
}
