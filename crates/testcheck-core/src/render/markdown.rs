//! Small markdown helpers shared by the templates.

pub(crate) fn escape_table_cell(input: &str) -> String {
    escape_text(input).replace('|', "\\|")
}

pub(crate) fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\r' | '\n' => out.push(' '),
            '\\' | '`' | '*' | '_' | '[' | ']' | '#' | '<' | '>' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Indent every line of `block` by `margin` spaces. Blank lines stay blank.
pub(crate) fn indent(block: &str, margin: usize) -> String {
    let pad = " ".repeat(margin);
    let mut out = String::with_capacity(block.len() + margin * 4);
    for (i, line) in block.trim_end().lines().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let line = line.trim_end();
        if !line.is_empty() {
            out.push_str(&pad);
            out.push_str(line);
        }
    }
    out
}

pub(crate) fn format_duration(ms: u64) -> String {
    if ms < 1_000 {
        format!("{ms}ms")
    } else if ms < 60_000 {
        format!("{}.{:03}s", ms / 1_000, ms % 1_000)
    } else {
        let secs = ms / 1_000;
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
