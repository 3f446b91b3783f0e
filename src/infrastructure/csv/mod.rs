use crate::domain::error::{AppError, Result};
use crate::domain::import::ImportRow;
use csv::{ReaderBuilder, Trim};

/// Upload cap enforced at the HTTP boundary.
pub const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

/// Decodes an uploaded file body. UTF-8 first; spreadsheet exports are
/// often Windows-1252, so that is the fallback before giving up.
pub fn decode_upload(bytes: &[u8]) -> Result<String> {
    if let Ok(content) = std::str::from_utf8(bytes) {
        return Ok(content.to_string());
    }

    let (content, _, had_errors) = encoding_rs::WINDOWS_1252.decode(bytes);
    if had_errors {
        return Err(AppError::ParseError(
            "File is not valid UTF-8 or Windows-1252 text".to_string(),
        ));
    }
    Ok(content.into_owned())
}

/// Parses CSV content into raw import rows. Headers are matched
/// case-insensitively; columns other than name/email/group are ignored,
/// and absent columns yield absent values.
pub fn parse_import_rows(content: &str) -> Result<Vec<ImportRow>> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
        .clone();

    let column = |wanted: &str| {
        headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(wanted))
    };
    let name_col = column("name");
    let email_col = column("email");
    let group_col = column("group");

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| {
            AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
        })?;

        let field = |col: Option<usize>| {
            col.and_then(|idx| record.get(idx))
                .map(str::to_string)
        };

        rows.push(ImportRow {
            name: field(name_col),
            email: field(email_col),
            group: field(group_col),
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_with_case_insensitive_headers() {
        let content = "Name,EMAIL,Group\nAl,al@x.com,hikers\nBo,,";
        let rows = parse_import_rows(content).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name.as_deref(), Some("Al"));
        assert_eq!(rows[0].email.as_deref(), Some("al@x.com"));
        assert_eq!(rows[0].group.as_deref(), Some("hikers"));
        assert_eq!(rows[1].email.as_deref(), Some(""));
    }

    #[test]
    fn ignores_extra_columns() {
        let content = "phone,name\n0612345678,Cy";
        let rows = parse_import_rows(content).unwrap();

        assert_eq!(rows[0].name.as_deref(), Some("Cy"));
        assert_eq!(rows[0].email, None);
        assert_eq!(rows[0].group, None);
    }

    #[test]
    fn missing_name_column_yields_absent_names() {
        let content = "email\nal@x.com";
        let rows = parse_import_rows(content).unwrap();
        assert_eq!(rows[0].name, None);
    }

    #[test]
    fn short_rows_are_tolerated() {
        let content = "name,email,group\nAl";
        let rows = parse_import_rows(content).unwrap();
        assert_eq!(rows[0].name.as_deref(), Some("Al"));
        assert_eq!(rows[0].email, None);
    }

    #[test]
    fn decodes_windows_1252_fallback() {
        // "Renée" with a Latin-1 e-acute, invalid as UTF-8.
        let bytes = b"name\nRen\xe9e";
        let content = decode_upload(bytes).unwrap();
        assert!(content.contains("Renée"));
    }

    #[test]
    fn decodes_plain_utf8() {
        let content = decode_upload("name\nRenée".as_bytes()).unwrap();
        assert!(content.contains("Renée"));
    }
}
