//! Unicode utilities for code-point addressing and display width.

mod codepoint;
mod width;

pub use codepoint::{
    cp_byte_offset, cp_len, cp_slice, cp_slice_from, is_word_char, to_code_points,
};
pub use width::{
    WidthMethod, display_width, display_width_char, display_width_char_with_method,
    display_width_with_method,
};
