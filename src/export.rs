//! Spreadsheet download of whatever subset the table currently shows

use crate::schema::Runner;
use rust_xlsxwriter::{Workbook, XlsxError};

pub const EXPORT_SHEET: &str = "Runners";
pub const EXPORT_HEADERS: [&str; 7] = [
    "ชื่อ",
    "เบอร์",
    "เพศ",
    "VIP",
    "ระยะทาง",
    "Size เสื้อ",
    "สถานะรับเสื้อ",
];

#[derive(Debug)]
pub enum ExportError {
    Encode { message: String },
}

impl From<XlsxError> for ExportError {
    fn from(e: XlsxError) -> ExportError {
        return ExportError::Encode {
            message: e.to_string(),
        };
    }
}

/// display cells in header order, booleans as the localized yes/no tokens
pub fn export_rows(runners: &[Runner]) -> Vec<[String; 7]> {
    return runners
        .iter()
        .map(|r| {
            [
                r.full_name.clone(),
                r.phone.clone(),
                r.gender.clone(),
                if r.vip { "ใช่" } else { "ไม่ใช่" }.to_string(),
                r.distance.clone(),
                r.shirt_size.clone(),
                if r.shirt_status {
                    "ได้รับแล้ว"
                } else {
                    "ยังไม่ได้รับ"
                }
                .to_string(),
            ]
        })
        .collect();
}

pub fn to_xlsx(runners: &[Runner]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(EXPORT_SHEET)?;

    for (col, header) in EXPORT_HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }
    for (row, cells) in export_rows(runners).iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            worksheet.write_string(row as u32 + 1, col as u16, cell.as_str())?;
        }
    }

    return Ok(workbook.save_to_buffer()?);
}
