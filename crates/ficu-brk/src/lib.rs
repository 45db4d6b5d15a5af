#![forbid(unsafe_code)]

//! Rule-based break iterator data engine.
//!
//! # Role in ficu
//! Break rules are compiled elsewhere into a compact binary image: a header,
//! up to four state tables, a character-category trie, the rule source and
//! a table of rule status values. This crate loads and validates such
//! images ([`RbbiData`]), writes them ([`RbbiDataBuilder`]), converts them
//! between byte orders and charset families ([`swap_break_data`]) and runs
//! the forward state machine over text ([`RuleBasedBreakIterator`]).
//!
//! # How it fits in the system
//! Binary layout primitives (data header, swapper, trie) come from
//! `ficu-common`. `ficu-tools` wraps [`swap_break_data`] and
//! [`RbbiData::dump`] in the `ficu-swap` command.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ficu_brk::{RbbiData, RuleBasedBreakIterator};
//!
//! let bytes = std::fs::read("word.brk").unwrap();
//! let data = Arc::new(RbbiData::from_udata(&bytes).unwrap());
//! let mut it = RuleBasedBreakIterator::new(data);
//! it.set_text("Hello, world");
//! while let Some(boundary) = it.next() {
//!     println!("{boundary} status={}", it.rule_status());
//! }
//! ```

pub mod builder;
pub mod data;
pub mod iter;
pub mod swap;

pub use builder::RbbiDataBuilder;
pub use data::{RbbiData, RbbiHeader, Row, Section, StateTable, TableFlags};
pub use iter::RuleBasedBreakIterator;
pub use swap::{swap_break_data, swap_break_data_in_place, swap_break_data_to_vec};
