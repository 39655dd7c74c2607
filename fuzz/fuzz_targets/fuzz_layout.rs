//! Fuzz target for word-wrap layout.
//!
//! Checks that layout never panics and that its maps stay consistent for
//! arbitrary text, widths and cursor positions.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use promptbuf::WidthMethod;
use promptbuf::text::compute_layout_with_method;

#[derive(Arbitrary, Debug)]
struct LayoutInput {
    text: String,
    width: u8,
    cursor_row: u8,
    cursor_col: u16,
    cjk: bool,
}

fuzz_target!(|input: LayoutInput| {
    let lines: Vec<String> = input
        .text
        .split('\n')
        .take(64)
        .map(str::to_string)
        .collect();
    let method = if input.cjk {
        WidthMethod::Unicode
    } else {
        WidthMethod::WcWidth
    };
    let cursor = (usize::from(input.cursor_row), usize::from(input.cursor_col));

    let layout = compute_layout_with_method(&lines, cursor, usize::from(input.width), method);

    let chunks: usize = layout.logical_to_visual.iter().map(Vec::len).sum();
    assert_eq!(chunks, layout.visual_lines.len());
    assert_eq!(layout.visual_to_logical.len(), layout.visual_lines.len());

    for (row, line) in lines.iter().enumerate() {
        let len = line.chars().count();
        let visual = layout.to_visual(row, len).expect("line end must map");
        let (back_row, _) = layout.to_logical(visual.0, visual.1).expect("visual row exists");
        assert_eq!(back_row, row);
    }
});
