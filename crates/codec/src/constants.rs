//! Wire format constants.

/// Width of a single ABI word, in bytes.
pub const WORD_SIZE: usize = 32;

/// Length of a function selector, in bytes.
pub const SELECTOR_LEN: usize = 4;

/// Number of bytes an `address` occupies inside its word.
pub const ADDRESS_LEN: usize = 20;

/// Number of bytes a `function` value (address followed by selector) occupies inside its word.
pub const FUNCTION_LEN: usize = ADDRESS_LEN + SELECTOR_LEN;

/// Maximum nesting depth the decoder descends into before giving up.
pub const MAX_DECODE_DEPTH: usize = 128;
