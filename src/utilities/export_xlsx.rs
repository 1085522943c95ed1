use chrono::NaiveDate;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet, XlsxError};
use tracing::warn;

use crate::faq_data::FaqSnapshot;

pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const HEADERS: [&str; 3] = ["Category", "Question", "Answer"];
const COLUMN_WIDTHS: [f64; 3] = [20.0, 40.0, 60.0];
const HEADER_BACKGROUND: u32 = 0x4F81BD;

/// Excel refuses cells holding more characters than this.
pub const MAX_CELL_CHARS: usize = 32_767;

/// Checks a sheet name against Excel's rules without building a workbook.
pub fn validate_sheet_name(sheet_name: &str) -> Result<(), XlsxError> {
    Worksheet::new().set_name(sheet_name).map(|_| ())
}

/// Cuts `text` to `MAX_CELL_CHARS` characters on a char boundary.
fn fit_cell<'a>(text: &'a str, row: u32, column: &str) -> &'a str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((cut, _)) => {
            warn!(
                row,
                column,
                chars = text.chars().count(),
                "Truncating cell to Excel's limit of {} characters",
                MAX_CELL_CHARS
            );
            &text[..cut]
        }
        None => text,
    }
}

/// Renders the snapshot as a one-sheet workbook and returns the file bytes.
pub fn export_xlsx(snapshot: &FaqSnapshot, sheet_name: &str) -> Result<Vec<u8>, XlsxError> {
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(HEADER_BACKGROUND))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin)
        .set_text_wrap();
    let cell_format = Format::new().set_text_wrap().set_border(FormatBorder::Thin);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, (header, width)) in HEADERS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        worksheet.set_column_width(col, width)?;
        worksheet.write_string_with_format(0, col, *header, &header_format)?;
    }

    for (index, record) in snapshot.records.iter().enumerate() {
        let row = index as u32 + 1;
        let cells = [&record.category, &record.question, &record.answer];
        for (col, (header, text)) in HEADERS.iter().zip(cells).enumerate() {
            let text = fit_cell(text, row, header);
            worksheet.write_string_with_format(row, col as u16, text, &cell_format)?;
        }
    }

    workbook.save_to_buffer()
}

/// Download name for an export made on `date`, e.g. `bospop_faq_20240706.xlsx`.
pub fn export_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}_{}.xlsx", prefix, date.format("%Y%m%d"))
}
