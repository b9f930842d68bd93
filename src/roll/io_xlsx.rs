// Primitives for reading Excel roll files.

use calamine::DataType;

use crate::roll::*;

pub fn read_excel_roll(path: String, source: &FileSource) -> BRollResult<ParsedTable> {
    let wrange = get_range(&path, source)?;

    let mut iter = wrange.rows();
    let header_row = iter.next().context(EmptyExcelSnafu {})?;
    let mut header: Vec<String> = Vec::new();
    for elt in header_row {
        header.push(read_cell(elt, 1)?);
    }
    debug!("read_excel_roll: header: {:?}", header);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, row) in iter.enumerate() {
        // The header is line 1 in the usual spreadsheet numbering.
        let lineno = (idx + 2) as u64;
        let mut cells: Vec<String> = Vec::new();
        for elt in row {
            cells.push(read_cell(elt, lineno)?);
        }
        rows.push(cells);
    }
    Ok(ParsedTable { header, rows })
}

fn read_cell(cell: &calamine::DataType, lineno: u64) -> RollResult<String> {
    match cell {
        DataType::String(s) => Ok(s.clone()),
        DataType::Empty => Ok("".to_string()),
        // Door numbers and identity codes are regularly stored as numbers in
        // the source sheets. Render integral floats without the fraction so
        // they match what the user types.
        DataType::Float(f) if f.fract() == 0.0 => Ok(format!("{}", *f as i64)),
        DataType::Float(f) => Ok(format!("{}", f)),
        DataType::Int(i) => Ok(format!("{}", i)),
        DataType::Bool(b) => Ok(format!("{}", b)),
        _ => Err(RollError::ExcelWrongCellType {
            lineno,
            content: format!("{:?}", cell),
        }),
    }
}

fn get_range(path: &String, source: &FileSource) -> BRollResult<calamine::Range<DataType>> {
    let worksheet_name_o = source.worksheet_name.clone();
    debug!(
        "read_excel_roll: path: {:?} worksheet: {:?}",
        &path, &worksheet_name_o
    );
    let p = path.clone();
    let mut workbook: Xlsx<_> =
        open_workbook(p).context(OpeningExcelSnafu { path: path.clone() })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = worksheet_name_o {
        let wrange = workbook
            .worksheet_range(&worksheet_name)
            .context(EmptyExcelSnafu {})?
            .context(OpeningExcelSnafu { path: path.clone() })?;
        Ok(wrange)
    } else {
        let wrange = workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu {})?
            .context(OpeningExcelSnafu { path: path.clone() })?;
        Ok(wrange)
    }
}
