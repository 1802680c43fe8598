use crate::error::{PreprocessError, Result};

/// Nesting state for `#ifdef`/`#ifndef`, one boolean per open conditional.
///
/// In the stock pipeline this is bookkeeping only: lines are emitted whether
/// or not their branch is live. Suppression can be switched on per run, but
/// `#else`/`#endif` with nothing open is a hard error either way.
#[derive(Debug, Default)]
pub struct CondStack {
    stack: Vec<bool>,
}

impl CondStack {
    pub fn new() -> Self {
        CondStack::default()
    }

    /// Open a conditional whose branch evaluated to `active`.
    pub fn push(&mut self, active: bool) {
        self.stack.push(active);
    }

    /// Flip the innermost branch for `#else`.
    pub fn invert(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(top) => {
                self.stack.push(!top);
                Ok(())
            }
            None => Err(PreprocessError::StackUnderflow { directive: "else" }),
        }
    }

    /// Close the innermost conditional for `#endif`.
    pub fn pop(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(_) => Ok(()),
            None => Err(PreprocessError::StackUnderflow { directive: "endif" }),
        }
    }

    /// True when no open branch is false.
    pub fn all_active(&self) -> bool {
        self.stack.iter().all(|&active| active)
    }
}
