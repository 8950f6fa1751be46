//! Markdown table rendering

/// Render a pipe-delimited Markdown table.
///
/// The column count is the widest of the header and every row; shorter rows
/// (and the header) are padded with empty cells, longer ones are never cut.
/// Cell contents are emitted verbatim, so a `|` inside a cell splits it.
pub fn render_table<S: AsRef<str>>(header: &[S], rows: &[Vec<String>]) -> String {
    let columns = rows
        .iter()
        .map(Vec::len)
        .fold(header.len(), usize::max);

    let mut md = String::new();
    push_row(&mut md, header.iter().map(AsRef::as_ref), columns);
    push_row(&mut md, std::iter::repeat("---").take(columns), columns);
    for row in rows {
        push_row(&mut md, row.iter().map(String::as_str), columns);
    }
    md
}

fn push_row<'a>(md: &mut String, cells: impl Iterator<Item = &'a str>, columns: usize) {
    let mut written = 0;
    md.push('|');
    for cell in cells {
        md.push_str(cell);
        md.push('|');
        written += 1;
    }
    while written < columns {
        md.push('|');
        written += 1;
    }
    md.push('\n');
}
