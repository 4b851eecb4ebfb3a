//! Blocking message dialogs.

use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

/// Surfaces confirmations and errors to the user.
pub trait Notifier {
    fn info(&self, title: &str, message: &str);
    fn error(&self, title: &str, message: &str);
    /// Ask a yes/no question; true means yes.
    fn confirm(&self, title: &str, message: &str) -> bool;
}

/// Native dialogs through `rfd`. Each call blocks the UI thread until closed.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeDialogs;

impl NativeDialogs {
    fn dialog(level: MessageLevel, title: &str, message: &str) -> MessageDialog {
        MessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(message)
    }
}

impl Notifier for NativeDialogs {
    fn info(&self, title: &str, message: &str) {
        Self::dialog(MessageLevel::Info, title, message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }

    fn error(&self, title: &str, message: &str) {
        Self::dialog(MessageLevel::Error, title, message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }

    fn confirm(&self, title: &str, message: &str) -> bool {
        let result = Self::dialog(MessageLevel::Warning, title, message)
            .set_buttons(MessageButtons::YesNo)
            .show();
        matches!(result, MessageDialogResult::Yes)
    }
}
