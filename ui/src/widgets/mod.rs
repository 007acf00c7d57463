mod add_user;
mod toasts;
mod users_list;

pub use add_user::{AddUserView, add_user_button, add_user_dialog};
pub use toasts::{TOAST_LIFETIME_SECS, ToastBoard, toasts};
pub use users_list::users_list_status;
