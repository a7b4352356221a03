//! Parser for snapper's machine-readable (`--csvout`) table output.
//!
//! The output is one header line naming the requested columns followed by one
//! CSV line per record. Fields containing the delimiter are double-quoted and
//! embedded quotes are doubled. Parsing is defensive: a malformed row fails
//! the calling operation rather than being silently dropped.

/// Parses a full `--csvout` table, skipping the header line.
///
/// Every data row must have exactly `columns` fields; anything else is a
/// malformed table and yields an error describing the offending line.
pub fn parse_table(raw: &str, columns: usize) -> Result<Vec<Vec<String>>, String> {
    let mut lines = raw.lines().filter(|l| !l.trim().is_empty());

    // Header row carries the column labels, not data.
    if lines.next().is_none() {
        return Err("missing header row".to_string());
    }

    let mut rows = Vec::new();
    for line in lines {
        let fields = parse_line(line)?;
        if fields.len() != columns {
            return Err(format!(
                "expected {} fields, found {} in line {:?}",
                columns,
                fields.len(),
                line
            ));
        }
        rows.push(fields);
    }
    Ok(rows)
}

/// Parses one CSV line into fields, honoring double-quote escaping.
fn parse_line(line: &str) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = line.chars().peekable();
    let mut quoted = false;

    loop {
        match chars.next() {
            Some('"') if field.is_empty() && !quoted => quoted = true,
            Some('"') if quoted => {
                // Doubled quote inside a quoted field is a literal quote.
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    quoted = false;
                }
            }
            Some(',') if !quoted => {
                fields.push(std::mem::take(&mut field));
            }
            Some(c) => field.push(c),
            None => {
                if quoted {
                    return Err(format!("unterminated quote in line {:?}", line));
                }
                fields.push(field);
                return Ok(fields);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_header_row() {
        let rows = parse_table("config\nroot\nhome\n", 1).unwrap();
        assert_eq!(rows, vec![vec!["root".to_string()], vec!["home".to_string()]]);
    }

    #[test]
    fn empty_table_has_no_rows() {
        let rows = parse_table("config,number,date,description\n", 4).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn missing_header_is_an_error() {
        assert!(parse_table("", 1).is_err());
        assert!(parse_table("   \n", 1).is_err());
    }

    #[test]
    fn parses_plain_fields() {
        let rows = parse_table(
            "config,number,date,description\nroot,1,2026-02-07 17:00:00,init\n",
            4,
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "root");
        assert_eq!(rows[0][1], "1");
        assert_eq!(rows[0][2], "2026-02-07 17:00:00");
        assert_eq!(rows[0][3], "init");
    }

    #[test]
    fn quoted_field_may_contain_delimiter() {
        let rows = parse_table(
            "config,number,date,description\nroot,2,2026-02-07,\"before update, rollback point\"\n",
            4,
        )
        .unwrap();
        assert_eq!(rows[0][3], "before update, rollback point");
    }

    #[test]
    fn doubled_quote_is_literal() {
        let line = parse_line("root,\"say \"\"hi\"\"\"").unwrap();
        assert_eq!(line, vec!["root".to_string(), "say \"hi\"".to_string()]);
    }

    #[test]
    fn empty_description_is_kept() {
        let rows = parse_table("config,number,date,description\nroot,3,2026-02-08,\n", 4).unwrap();
        assert_eq!(rows[0][3], "");
    }

    #[test]
    fn wrong_field_count_fails_the_row() {
        let err = parse_table("config,number\nroot\n", 2).unwrap_err();
        assert!(err.contains("expected 2 fields"));
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        assert!(parse_line("root,\"oops").is_err());
    }
}
