use crate::line::SourceLine;

/// Owned cursor over a growable line stream.
///
/// Both passes walk the stream front to back exactly once, but mutate it
/// mid-walk: include splicing inserts replacement lines where a directive
/// was removed, and macro-definition parsing consumes continuation entries
/// directly, bypassing dispatch. An explicit index keeps those mutations
/// from invalidating the traversal.
#[derive(Debug)]
pub struct LineCursor {
    lines: Vec<SourceLine>,
    next: usize,
}

impl LineCursor {
    pub fn new(lines: Vec<SourceLine>) -> Self {
        LineCursor { lines, next: 0 }
    }

    /// The entry under the cursor, if any.
    pub fn peek(&self) -> Option<&SourceLine> {
        self.lines.get(self.next)
    }

    /// Step over the entry under the cursor, leaving it in the stream.
    pub fn advance(&mut self) {
        if self.next < self.lines.len() {
            self.next += 1;
        }
    }

    /// Remove and return the entry under the cursor.
    pub fn take_next(&mut self) -> Option<SourceLine> {
        if self.next < self.lines.len() {
            Some(self.lines.remove(self.next))
        } else {
            None
        }
    }

    /// Insert `spliced` at the cursor and leave the cursor after it, so the
    /// inserted entries are not revisited by the current walk.
    pub fn splice(&mut self, spliced: Vec<SourceLine>) {
        let count = spliced.len();
        self.lines.splice(self.next..self.next, spliced);
        self.next += count;
    }

    /// Reset the cursor to the front for another walk.
    pub fn rewind(&mut self) {
        self.next = 0;
    }
}
