//! Boundary iteration over UTF-8 text driven by the forward state table.
//!
//! [`RuleBasedBreakIterator::next`] runs the state machine from the current
//! boundary until it reaches the stop state, remembering the last accepting
//! position. Reverse movement ([`preceding`](RuleBasedBreakIterator::preceding),
//! [`previous`](RuleBasedBreakIterator::previous)) and random access use the
//! boundaries of a full forward pass, computed once per text.

use std::sync::Arc;

use ficu_common::utf8::{self, Utf8Mode};
use smallvec::SmallVec;

use crate::data::{
    BOF_CATEGORY, DICTIONARY_BIT, EOF_CATEGORY, RbbiData, START_STATE, STOP_STATE, StateTable,
    TableFlags,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Feeding the BOF pseudo-category before the first character.
    Start,
    Run,
    /// Feeding the EOF pseudo-category.
    End,
}

/// Result of one run of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Step {
    boundary: usize,
    tag_idx: i16,
    dictionary_chars: usize,
}

/// A boundary and the rule status group that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Boundary {
    offset: usize,
    tag_idx: i16,
}

/// Finds boundaries in text with shared break data.
///
/// Offsets are byte offsets into the UTF-8 text. The iterator is cheap to
/// clone; data and text are reference counted.
#[derive(Debug, Clone)]
pub struct RuleBasedBreakIterator {
    data: Arc<RbbiData>,
    text: Arc<str>,
    pos: usize,
    tag_idx: i16,
    dictionary_chars: usize,
    boundaries: Option<Arc<[Boundary]>>,
}

impl RuleBasedBreakIterator {
    /// An iterator over empty text.
    #[must_use]
    pub fn new(data: Arc<RbbiData>) -> Self {
        Self {
            data,
            text: Arc::from(""),
            pos: 0,
            tag_idx: 0,
            dictionary_chars: 0,
            boundaries: None,
        }
    }

    #[must_use]
    pub fn data(&self) -> &Arc<RbbiData> {
        &self.data
    }

    /// Replace the text and move to its start.
    pub fn set_text(&mut self, text: &str) {
        self.text = Arc::from(text);
        self.boundaries = None;
        self.first();
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Move to the start of the text.
    pub fn first(&mut self) -> usize {
        self.pos = 0;
        self.tag_idx = 0;
        0
    }

    /// Move to the end of the text.
    pub fn last(&mut self) -> usize {
        let end = self.text.len();
        self.tag_idx = self
            .boundary_list()
            .last()
            .filter(|b| b.offset == end)
            .map_or(0, |b| b.tag_idx);
        self.pos = end;
        end
    }

    #[must_use]
    pub fn current(&self) -> usize {
        self.pos
    }

    /// Advance to the next boundary, or `None` at the end of the text.
    pub fn next(&mut self) -> Option<usize> {
        if self.pos >= self.text.len() {
            return None;
        }
        let step = handle_next(&self.data, self.data.forward_table(), &self.text, self.pos);
        self.pos = step.boundary;
        self.tag_idx = step.tag_idx;
        self.dictionary_chars += step.dictionary_chars;
        Some(self.pos)
    }

    /// First boundary after `offset`. At or past the end of the text, moves
    /// to the end and returns `None`.
    pub fn following(&mut self, offset: usize) -> Option<usize> {
        let boundaries = self.boundary_list();
        let i = boundaries.partition_point(|b| b.offset <= offset);
        match boundaries.get(i).copied() {
            Some(b) => {
                self.pos = b.offset;
                self.tag_idx = b.tag_idx;
                Some(b.offset)
            }
            None => {
                self.last();
                None
            }
        }
    }

    /// Last boundary before `offset`. At or before the start of the text,
    /// moves to the start and returns `None`.
    pub fn preceding(&mut self, offset: usize) -> Option<usize> {
        if offset == 0 {
            self.first();
            return None;
        }
        let offset = offset.min(self.text.len() + 1);
        let boundaries = self.boundary_list();
        let i = boundaries.partition_point(|b| b.offset < offset);
        match i.checked_sub(1).and_then(|i| boundaries.get(i)).copied() {
            Some(b) => {
                self.pos = b.offset;
                self.tag_idx = b.tag_idx;
                Some(b.offset)
            }
            None => {
                self.first();
                Some(0)
            }
        }
    }

    /// Move back one boundary, or `None` at the start of the text.
    pub fn previous(&mut self) -> Option<usize> {
        self.preceding(self.pos)
    }

    /// Whether `offset` is a boundary. Leaves the iterator at the first
    /// boundary at or after `offset`.
    pub fn is_boundary(&mut self, offset: usize) -> bool {
        if offset == 0 {
            self.first();
            return true;
        }
        if offset > self.text.len() {
            self.last();
            return false;
        }
        self.following(offset - 1) == Some(offset)
    }

    /// The largest status value of the rule that produced the current
    /// boundary; 0 when there is none.
    #[must_use]
    pub fn rule_status(&self) -> i32 {
        self.data
            .status_group(self.tag_idx)
            .iter()
            .copied()
            .max()
            .unwrap_or(0)
    }

    /// All status values of the rule that produced the current boundary.
    #[must_use]
    pub fn rule_status_vec(&self) -> SmallVec<[i32; 4]> {
        let group = self.data.status_group(self.tag_idx);
        if group.is_empty() {
            SmallVec::from_slice(&[0])
        } else {
            SmallVec::from_slice(group)
        }
    }

    /// Characters with the dictionary bit seen by [`next`](Self::next) since
    /// the iterator was created.
    #[must_use]
    pub fn dictionary_char_count(&self) -> usize {
        self.dictionary_chars
    }

    /// Every boundary of the text, including 0 and the text length.
    pub fn boundaries(&mut self) -> Vec<usize> {
        self.boundary_list().iter().map(|b| b.offset).collect()
    }

    fn boundary_list(&mut self) -> Arc<[Boundary]> {
        if let Some(list) = &self.boundaries {
            return Arc::clone(list);
        }
        let table = self.data.forward_table();
        let mut list = vec![Boundary {
            offset: 0,
            tag_idx: 0,
        }];
        let mut pos = 0;
        while pos < self.text.len() {
            let step = handle_next(&self.data, table, &self.text, pos);
            pos = step.boundary;
            list.push(Boundary {
                offset: pos,
                tag_idx: step.tag_idx,
            });
        }
        let list: Arc<[Boundary]> = list.into();
        self.boundaries = Some(Arc::clone(&list));
        list
    }
}

/// One run of the state machine from `start`, which is below `text.len()`.
fn handle_next(data: &RbbiData, table: &StateTable, text: &str, start: usize) -> Step {
    let bytes = text.as_bytes();
    let hard_break = table.flags().contains(TableFlags::LOOKAHEAD_HARD_BREAK);

    let mut result = start;
    let mut tag_idx: i16 = 0;
    let mut lookahead_status: i16 = 0;
    let mut lookahead_result = 0;
    let mut lookahead_tag: i16 = 0;
    let mut dictionary_chars = 0;

    let mut pos = start;
    let mut c = read_char(bytes, &mut pos);
    let mut state = START_STATE;
    let mut category = 0;
    let mut mode = Mode::Run;
    if table.flags().contains(TableFlags::BOF_REQUIRED) {
        category = BOF_CATEGORY;
        mode = Mode::Start;
    }

    loop {
        if c.is_none() {
            if mode == Mode::End {
                // Ran off the end with a pending look-ahead: take it.
                if lookahead_result > result {
                    result = lookahead_result;
                    tag_idx = lookahead_tag;
                }
                break;
            }
            mode = Mode::End;
            category = EOF_CATEGORY;
        }

        if mode == Mode::Run
            && let Some(cp) = c
        {
            category = data.trie().get(cp);
            if category & DICTIONARY_BIT != 0 {
                dictionary_chars += 1;
                category &= !DICTIONARY_BIT;
            }
        }

        state = table.row(state).map_or(STOP_STATE, |row| row.next_state(category));
        let Some(row) = table.row(state) else { break };

        if row.accepting() == -1 {
            if mode != Mode::Start {
                result = pos;
            }
            tag_idx = row.tag_idx();
        }

        if row.lookahead() != 0 {
            if lookahead_status != 0 && row.accepting() == lookahead_status {
                result = lookahead_result;
                tag_idx = lookahead_tag;
                lookahead_status = 0;
                if hard_break {
                    return Step {
                        boundary: result,
                        tag_idx,
                        dictionary_chars,
                    };
                }
            } else {
                lookahead_result = pos;
                lookahead_status = row.lookahead();
                lookahead_tag = row.tag_idx();
            }
        } else if row.accepting() != 0 {
            lookahead_status = 0;
        }

        if state == STOP_STATE {
            break;
        }

        match mode {
            Mode::Run => c = read_char(bytes, &mut pos),
            Mode::Start => mode = Mode::Run,
            Mode::End => {}
        }
    }

    // Always make progress, even if the rules matched nothing.
    if result == start {
        read_char(bytes, &mut result);
    }
    Step {
        boundary: result,
        tag_idx,
        dictionary_chars,
    }
}

/// Decode the code point at `*pos` and advance; `None` at the end.
fn read_char(bytes: &[u8], pos: &mut usize) -> Option<u32> {
    if *pos >= bytes.len() {
        return None;
    }
    // Input comes from a `str`, so decoding cannot fail.
    Some(utf8::next_code_point(bytes, pos, Utf8Mode::Replacement) as u32)
}
