//! Groups extracted match requests under their governing date header.

use crate::match_model::{DateBlock, MatchRequest};
use log::{debug, trace};

/// Builds the ordered list of date blocks for one message
///
/// Every block opened by a date header is kept, even without matches.
/// Undated blocks are dropped, and so is the implicit first block when
/// nothing was pushed into it. The assembler also enforces the request
/// ceiling: once `ceiling` requests are committed further pushes are
/// refused.
#[derive(Debug)]
pub struct BlockAssembler {
    ceiling: usize,
    blocks: Vec<DateBlock>,
    current: DateBlock,
    /// Whether `current` is the block created by [`BlockAssembler::new`]
    current_is_implicit: bool,
    committed: usize,
}

impl BlockAssembler {
    /// Create an assembler whose first, implicit block carries
    /// `implicit_date`
    ///
    /// An empty implicit date makes matches seen before the first header
    /// disappear when that block closes.
    pub fn new(ceiling: usize, implicit_date: impl Into<String>) -> Self {
        Self {
            ceiling,
            blocks: Vec::new(),
            current: DateBlock::new(implicit_date, ""),
            current_is_implicit: true,
            committed: 0,
        }
    }

    /// Close the current block and start a new one
    pub fn open_block(&mut self, display_date: impl Into<String>, deadline: impl Into<String>) {
        self.close_current();
        self.current = DateBlock::new(display_date, deadline);
        self.current_is_implicit = false;
        trace!("Opened block '{}'", self.current.display_date);
    }

    /// Open a block for `display_date` unless the current block already
    /// has that date
    pub fn ensure_block(&mut self, display_date: &str) {
        if self.current.display_date != display_date {
            self.open_block(display_date, "");
        }
    }

    /// Add a request to the current block
    ///
    /// Returns `false` and drops the request when the ceiling is reached.
    pub fn push(&mut self, request: MatchRequest) -> bool {
        if self.is_full() {
            debug!("Ceiling of {} reached, dropping '{}'", self.ceiling, request);
            return false;
        }
        self.current.push(request);
        true
    }

    /// Requests held so far, including the open block
    ///
    /// Requests in an undated block are not counted since they are
    /// discarded when the block closes.
    pub fn len(&self) -> usize {
        let open = if self.current.has_date() {
            self.current.matches.len()
        } else {
            0
        };
        self.committed + open
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.ceiling
    }

    /// Close the open block and return all kept blocks in input order
    pub fn finish(mut self) -> Vec<DateBlock> {
        self.close_current();
        self.blocks
    }

    fn close_current(&mut self) {
        let block = std::mem::take(&mut self.current);
        if !block.has_date() {
            if !block.is_empty() {
                debug!(
                    "Discarding {} request(s) without a date header",
                    block.matches.len()
                );
            }
            return;
        }
        if self.current_is_implicit && block.is_empty() {
            return;
        }
        self.committed += block.matches.len();
        self.blocks.push(block);
    }
}
