// Primitives for reading delimited roll files.

use crate::roll::*;

pub fn read_csv_roll(path: String, _source: &FileSource) -> BRollResult<ParsedTable> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu {})?;
    let mut records = rdr.into_records();

    // The first record is the header row.
    let header: Vec<String> = match records.next() {
        Some(line_r) => {
            let line = line_r.context(CsvLineParseSnafu { lineno: 1usize })?;
            line.iter().map(|s| s.to_string()).collect()
        }
        None => {
            return Err(Box::new(RollError::RollUnavailable {
                source: voter_roll::RollErrors::EmptyTable,
            }));
        }
    };
    debug!("read_csv_roll: header: {:?}", header);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        debug!("read_csv_roll: lineno: {:?} row: {:?}", lineno, line);
        rows.push(line.iter().map(|s| s.to_string()).collect());
    }
    Ok(ParsedTable { header, rows })
}
