//! Markdown writer: serializes block tokens back to markdown text.
//!
//! The written text must re-lex to the same block kind sequence, so the
//! Markdown export path and the direct render path stay in agreement.

use super::tokens::{Block, List, Table};

/// Serialize a token sequence to markdown.
pub fn write(blocks: &[Block]) -> String {
    let mut output = String::new();
    for block in blocks {
        match block {
            Block::Heading { depth, text } => {
                let depth = (*depth).clamp(1, 6) as usize;
                output.push_str(&"#".repeat(depth));
                output.push(' ');
                output.push_str(text.trim());
                output.push_str("\n\n");
            }
            Block::Paragraph { text } => {
                let text = text.trim();
                if !text.is_empty() {
                    output.push_str(text);
                    output.push_str("\n\n");
                }
            }
            Block::List(list) => {
                write_list(&mut output, list, "");
                output.push('\n');
            }
            Block::Table(table) => write_table(&mut output, table),
            Block::Rule => output.push_str("---\n\n"),
            Block::Blank => output.push('\n'),
        }
    }
    output
}

fn write_list(output: &mut String, list: &List, indent: &str) {
    let mut ordinal = list.start;
    for item in &list.items {
        let marker = if list.ordered {
            let marker = format!("{}. ", ordinal);
            ordinal += 1;
            marker
        } else {
            "- ".to_string()
        };

        output.push_str(indent);
        output.push_str(&marker);
        output.push_str(item.text.trim());
        output.push('\n');

        if let Some(nested) = &item.nested {
            // Nested content must be indented past the parent marker.
            let child_indent = format!("{}{}", indent, " ".repeat(marker.len()));
            write_list(output, nested, &child_indent);
        }
    }
}

fn write_table(output: &mut String, table: &Table) {
    if table.is_empty() {
        return;
    }

    let cols = table.column_count();

    // Uniform column widths keep the plain-text table readable.
    let mut col_widths = vec![3usize; cols];
    for (i, cell) in table.header.iter().enumerate() {
        col_widths[i] = col_widths[i].max(cell.len());
    }
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            if i < cols {
                col_widths[i] = col_widths[i].max(cell.len());
            }
        }
    }

    let write_row = |output: &mut String, cells: &[String]| {
        output.push('|');
        for (i, width) in col_widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            output.push_str(&format!(" {:width$} |", cell, width = width));
        }
        output.push('\n');
    };

    write_row(output, &table.header);

    output.push('|');
    for width in &col_widths {
        output.push_str(&format!(" {} |", "-".repeat(*width)));
    }
    output.push('\n');

    for row in &table.rows {
        write_row(output, row);
    }
    output.push('\n');
}

// ============================================================
// Tests
// ============================================================
