use egui_kittest::Harness;
use portal_business::{AvatarFile, NewUserForm, PortalRole};
use portal_ui::PortalApp;
use portal_ui::state::State;
use portal_ui::utils::file_picker::AvatarPicker;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestCtx<'a, T = State> {
    mock_server: MockServer,
    harness: Harness<'a, T>,
}

impl<'a, T> TestCtx<'a, T> {
    pub fn harness_mut(&mut self) -> &mut Harness<'a, T> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn mock_server(&self) -> &MockServer {
        &self.mock_server
    }
}

impl<'a> TestCtx<'a, State> {
    /// Renders `app` against a state whose create-user endpoint answers with `response`.
    pub async fn new(
        app: impl FnMut(&mut egui::Ui, &mut State) + 'a,
        response: ResponseTemplate,
    ) -> Self {
        let (mock_server, state) = setup_test_state(response).await;
        let state = state.with_avatar_picker(StubAvatarPicker::new(vec![
            AvatarFile::new("first.png", "image/png", vec![1, 2, 3]),
            AvatarFile::new("second.png", "image/png", vec![4]),
        ]));
        let harness = Harness::new_ui_state(app, state);

        Self {
            mock_server,
            harness,
        }
    }
}

impl<'a> TestCtx<'a, PortalApp> {
    #[allow(unused)]
    pub async fn new_app(response: ResponseTemplate) -> Self {
        let (mock_server, state) = setup_test_state(response).await;
        let app = PortalApp::new(state);
        let harness = Harness::new_eframe(|_| app);

        Self {
            mock_server,
            harness,
        }
    }
}

async fn setup_test_state(response: ResponseTemplate) -> (MockServer, State) {
    let _ = env_logger::builder().is_test(true).try_init();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/create"))
        .respond_with(response)
        .mount(&mock_server)
        .await;

    let state = State::test(mock_server.uri());

    (mock_server, state)
}

/// Picker that hands back a fixed selection.
pub struct StubAvatarPicker {
    files: Vec<AvatarFile>,
}

impl StubAvatarPicker {
    pub fn new(files: Vec<AvatarFile>) -> Self {
        Self { files }
    }
}

impl AvatarPicker for StubAvatarPicker {
    fn pick_avatars(&self) -> Vec<AvatarFile> {
        self.files.clone()
    }
}

#[allow(unused)]
pub fn valid_form() -> NewUserForm {
    let mut form = NewUserForm {
        email: "new.user@example.com".to_owned(),
        password: "longenough1".to_owned(),
        confirm_password: "longenough1".to_owned(),
        ..Default::default()
    };
    form.roles.insert(PortalRole::PortalUser);
    form
}
