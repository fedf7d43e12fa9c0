use std::error::Error;
use std::fmt;

use csv_core::ReadFieldResult;

#[derive(Debug)]
pub struct CsvRowError {
    row: String,
}

impl fmt::Display for CsvRowError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CsvRowError: invalid UTF-8 in a row: {}", self.row)
    }
}

impl Error for CsvRowError {}

/// Splits a CSV row into fields, unquoting them.
pub fn parse_csv_row(row: &str) -> Result<Vec<String>, CsvRowError> {
    let mut fields = vec![];
    let mut rdr = csv_core::Reader::new();
    let mut bytes = row.as_bytes();
    let mut output = [0; 4096];
    let mut field = vec![];
    loop {
        let (result, nin, nout) = rdr.read_field(bytes, &mut output);
        field.extend_from_slice(&output[..nout]);
        bytes = &bytes[nin..];
        let end = match result {
            ReadFieldResult::OutputFull => continue,
            ReadFieldResult::Field { .. } => false,
            ReadFieldResult::InputEmpty | ReadFieldResult::End => true,
        };
        let s = String::from_utf8(std::mem::take(&mut field)).map_err(|_| CsvRowError {
            row: row.to_string(),
        })?;
        fields.push(s);
        if end {
            break;
        }
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_row() {
        assert_eq!(
            &["自然言語", "1000"],
            parse_csv_row("自然言語,1000").unwrap().as_slice()
        );
    }

    #[test]
    fn test_parse_csv_row_with_quote() {
        assert_eq!(
            &["1,2-ジクロロエタン", "5"],
            parse_csv_row("\"1,2-ジクロロエタン\",5").unwrap().as_slice()
        );
    }

    #[test]
    fn test_parse_single_field() {
        assert_eq!(&["辞書"], parse_csv_row("辞書").unwrap().as_slice());
    }
}
