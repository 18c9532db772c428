use docx_rs::{
    DocumentChild, Paragraph, ParagraphChild, RunChild, Table, TableCellContent, TableChild,
    TableRowChild,
};

use crate::extraction::ExtractionError;

/// Extracts paragraph text from a DOCX document.
///
/// Every paragraph, including those inside table cells, is followed by a
/// blank line so paragraph-based heuristics see the same layout as other formats.
pub fn extract_docx(data: &[u8]) -> Result<String, ExtractionError> {
    let docx = docx_rs::read_docx(data)?;
    let mut out = String::new();

    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(p) => push_paragraph(&mut out, p),
            DocumentChild::Table(t) => push_table(&mut out, t),
            _ => {}
        }
    }

    Ok(out)
}

fn push_paragraph(out: &mut String, paragraph: &Paragraph) {
    push_paragraph_children(out, &paragraph.children);
    out.push_str("\n\n");
}

fn push_paragraph_children(out: &mut String, children: &[ParagraphChild]) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => out.push_str(&t.text),
                        RunChild::Tab(_) => out.push('\t'),
                        RunChild::Break(_) => out.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_paragraph_children(out, &link.children),
            _ => {}
        }
    }
}

fn push_table(out: &mut String, table: &Table) {
    for row_child in &table.rows {
        let TableChild::TableRow(row) = row_child;
        for cell_child in &row.cells {
            let TableRowChild::TableCell(cell) = cell_child;
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(p) => push_paragraph(out, p),
                    TableCellContent::Table(t) => push_table(out, t),
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Run, TableCell, TableRow};
    use std::io::Cursor;

    fn pack(docx: Docx) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_paragraphs_are_blank_line_separated() {
        let bytes = pack(
            Docx::new()
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Jane Doe")))
                .add_paragraph(
                    Paragraph::new().add_run(Run::new().add_text("Seattle, WA. Python and SQL.")),
                ),
        );

        let text = extract_docx(&bytes).unwrap();
        assert!(text.starts_with("Jane Doe\n\nSeattle, WA. Python and SQL.\n\n"));
    }

    #[test]
    fn test_table_cells_are_extracted() {
        let table = Table::new(vec![TableRow::new(vec![
            TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text("Docker"))),
            TableCell::new()
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Kubernetes"))),
        ])]);
        let bytes = pack(Docx::new().add_table(table));

        let text = extract_docx(&bytes).unwrap();
        assert!(text.contains("Docker"));
        assert!(text.contains("Kubernetes"));
    }

    #[test]
    fn test_garbage_is_error() {
        assert!(extract_docx(b"not a zip archive").is_err());
    }
}
