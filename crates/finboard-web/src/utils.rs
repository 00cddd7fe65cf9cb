//! Page-wide helpers, also exposed to
//! plain scripts as `window.utils`.

pub mod clipboard;
pub mod debounce;
pub mod fetch;
pub mod forms;
pub mod loading;
pub mod submit;
pub mod toast;

pub use clipboard::copy_to_clipboard;
pub use fetch::fetch_with_error_handling;
pub use loading::{
  hide_loading,
  show_loading
};
pub use submit::prevent_double_submit;
pub use toast::show_toast;

pub const DEFAULT_CONFIRM_MESSAGE:
  &str =
  "Tem certeza que deseja realizar esta \
   ação?";

/// Browser confirmation prompt.
pub fn confirm_action(
  message: Option<&str>
) -> bool {
  let message = message
    .filter(|text| !text.is_empty())
    .unwrap_or(DEFAULT_CONFIRM_MESSAGE);
  gloo::dialogs::confirm(message)
}
