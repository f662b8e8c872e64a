use anyhow::Result;
use inquire::InquireError;

mod interrupt;
mod spinner;
mod style;
mod view;

pub use interrupt::CtrlCCancel;
pub use spinner::Spinner;
pub use style::Style;
pub use view::TerminalView;

/// Check if the inquire error is a user cancellation/interruption.
const fn is_prompt_cancelled(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Runs an interactive flow and treats Ctrl+C or Escape in a prompt as a clean exit.
pub fn handle_prompt_cancellation<F>(f: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    match f() {
        Ok(()) => Ok(()),
        Err(e)
            if e.downcast_ref::<InquireError>()
                .is_some_and(is_prompt_cancelled) =>
        {
            eprintln!();
            Ok(())
        }
        Err(e) => Err(e),
    }
}
