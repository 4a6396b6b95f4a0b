//! User confirmation collaborator.

/// A synchronous yes/no prompt, asked before destructive or fallback actions.
pub trait Confirm {
    /// Show `message` and return whether the user agreed.
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
