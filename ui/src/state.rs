use std::sync::Arc;

use chrono::Utc;
use flume::Receiver;
use portal_business::{
    BusinessConfig, CacheEventReceiver, HttpUsersService, ToastQueue, UserCreationDialog,
    UsersListCache, cache_channel, toast_channel,
};

use crate::utils::file_picker::{AvatarPicker, SystemAvatarPicker};
use crate::widgets::{AddUserView, ToastBoard};

/// The main application state.
///
/// Note: We manually implement Default because the channels don't
/// implement Default.
pub struct State {
    pub config: BusinessConfig,
    /// The create-user dialog controller.
    pub dialog: UserCreationDialog,
    pub add_user_view: AddUserView,
    pub avatar_picker: Box<dyn AvatarPicker>,
    /// Toasts produced by the business layer, not yet on screen.
    pub toasts: ToastQueue,
    pub toast_board: ToastBoard,
    pub users_list: UsersListCache,
    pub cache_events: CacheEventReceiver,
    /// Fires once every time the dialog closes.
    pub dialog_closed: Receiver<()>,
}

impl Default for State {
    fn default() -> Self {
        Self::new(BusinessConfig::default())
    }
}

impl State {
    pub fn new(config: BusinessConfig) -> Self {
        let (toast_sender, toasts) = toast_channel();
        let (cache_sender, cache_events) = cache_channel();
        let (closed_tx, dialog_closed) = flume::unbounded();

        let service = HttpUsersService::new(config.clone());
        let dialog =
            UserCreationDialog::new(Arc::new(service), Arc::new(toast_sender), cache_sender)
                .with_on_close(move || {
                    if closed_tx.send(()).is_err() {
                        log::debug!("Dialog closed with no listener");
                    }
                });

        Self {
            config,
            dialog,
            add_user_view: AddUserView::default(),
            avatar_picker: Box::new(SystemAvatarPicker),
            toasts,
            toast_board: ToastBoard::default(),
            users_list: UsersListCache::default(),
            cache_events,
            dialog_closed,
        }
    }

    pub fn test(base_url: String) -> Self {
        Self::new(BusinessConfig::new(base_url))
    }

    pub fn with_avatar_picker(mut self, picker: impl AvatarPicker + 'static) -> Self {
        self.avatar_picker = Box::new(picker);
        self
    }

    /// Pulls everything the background tasks produced since the last frame.
    pub fn sync(&mut self) {
        if let Some(settled) = self.dialog.poll() {
            log::debug!("Create user settled: {settled:?}");
        }

        let invalidated = self.users_list.sync(&self.cache_events);
        if invalidated > 0 {
            log::info!("Users list invalidated ({invalidated} event(s))");
        }

        while self.dialog_closed.try_recv().is_ok() {
            self.add_user_view.reset();
        }

        let now = Utc::now();
        self.toast_board.extend(self.toasts.drain(), now);
        self.toast_board.prune(now);
    }
}
