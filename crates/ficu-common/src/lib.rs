#![forbid(unsafe_code)]

//! Shared low-level primitives for ficu.
//!
//! # Role in ficu
//! `ficu-common` holds everything the break-iterator data engine and the
//! formatting engine both rely on: the ICU-compatible error code space, the
//! generic ICU data header, the byte-order/charset swapper, UTF-8 helpers,
//! the version-1 `UTrie` used for character categories, and locale ids.
//!
//! # How it fits in the system
//! `ficu-brk` builds its binary data loader and swapper on [`swapper`],
//! [`data_header`] and [`trie`]. `ficu-fmt` uses [`error`] and [`locale`].
//! Nothing here depends on either of them.

pub mod data_header;
pub mod error;
pub mod locale;
pub mod swapper;
pub mod trie;
pub mod utf8;

pub use data_header::{DataHeader, DataInfo, swap_data_header};
pub use error::{Error, ErrorCode, Result};
pub use locale::Locale;
pub use swapper::{CharsetFamily, DataSwapper, Endianness};
pub use trie::{FoldingFn, Trie16, TrieBuilder16, fold_high_bit, swap_trie};
