//! Confirmation gate for destructive actions.

pub const CLEAR_CREDENTIAL: &str =
    "Are you sure you want to reset your API key? You will be returned to the landing page.";

pub const RESET_DATA: &str = "Are you sure you want to reset all app data?\n\nThis will permanently delete:\n- All your notes\n- All study session logs\n- Your entire chat history\n- Your study plan and progress\n\nThis action cannot be undone.";

pub const REPLACE_PLAN: &str = "This will replace your current study plan and reset all progress. Are you sure you want to continue?";

pub const RESET_PROGRESS: &str =
    "Are you sure you want to reset your progress on this plan? This action cannot be undone.";

/// Asks the user to approve an action described by `message`
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}
