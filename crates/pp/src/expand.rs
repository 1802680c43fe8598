use log::trace;

use crate::error::{PreprocessError, Result};
use crate::table::MacroTable;

/// Hard cap on how large a line may grow during expansion. A body that
/// reintroduces its own name can double the text every sweep, so the sweep
/// bound alone does not keep memory in check.
const MAX_EXPANDED_LEN: usize = 1 << 20;

/// Run whole-table substitution sweeps over `line` until one sweep changes
/// nothing. Each sweep tries every macro in definition order, skipping any
/// whose name does not occur in the current text. Chained macros settle
/// across sweeps; a self-reintroducing macro never settles and aborts with
/// the offending line number once `max_sweeps` or the size cap is hit.
pub fn fixed_point(
    table: &MacroTable,
    max_sweeps: usize,
    number: usize,
    line: &str,
) -> Result<String> {
    let mut text = line.to_string();
    let mut sweeps = 0usize;
    loop {
        let mut changed = false;
        for (name, mac) in table.iter() {
            if !text.contains(name) {
                continue;
            }
            let rewritten = mac.apply(name, &text);
            if rewritten != text {
                text = rewritten;
                changed = true;
            }
        }
        if !changed {
            if sweeps > 0 {
                trace!("line {number}: settled after {sweeps} sweeps");
            }
            return Ok(text);
        }
        sweeps += 1;
        if sweeps >= max_sweeps || text.len() > MAX_EXPANDED_LEN {
            return Err(PreprocessError::ExpansionLimit {
                line: number,
                sweeps,
            });
        }
    }
}
