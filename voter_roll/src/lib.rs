mod config;
use log::debug;

use std::collections::HashMap;

pub use crate::config::*;

pub mod builder;
pub mod quick_start;

// Aliases for the known columns, lowercased. Deployments disagree on the
// exact spelling of the door and identity-card headers.
const NAME_ALIASES: &[&str] = &["name"];
const DOOR_ALIASES: &[&str] = &["door_no", "door no.", "door no", "doorno"];
const EPIC_ALIASES: &[&str] = &["epic", "epic_no", "epic no."];
const SEX_ALIASES: &[&str] = &["sex", "gender"];

/// A single voter row with the identity columns broken out and every other
/// source column kept as opaque text.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VoterRecord {
    pub name: String,
    pub door_no: String,
    pub epic: String,
    pub sex: Gender,
    /// Values of the columns not covered above, in layout order.
    pub extra: Vec<String>,
}

/// The resolved shape of a source table: the trimmed header in its original
/// order plus the positions of the known columns within it.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RollLayout {
    columns: Vec<String>,
    name_idx: usize,
    door_idx: usize,
    epic_idx: usize,
    sex_idx: usize,
    extra_idx: Vec<usize>,
}

impl RollLayout {
    /// Trims the header and matches the known columns case-insensitively
    /// against their aliases. Every unmatched column becomes an extra column.
    pub(crate) fn resolve(header: &[String]) -> Result<RollLayout, RollErrors> {
        if header.is_empty() {
            return Err(RollErrors::EmptyTable);
        }
        let columns: Vec<String> = header.iter().map(|s| s.trim().to_string()).collect();
        let name_idx = find_column(&columns, NAME_ALIASES)
            .ok_or_else(|| RollErrors::MissingColumn("Name".to_string()))?;
        let door_idx = find_column(&columns, DOOR_ALIASES)
            .ok_or_else(|| RollErrors::MissingColumn("Door_No".to_string()))?;
        let epic_idx = find_column(&columns, EPIC_ALIASES)
            .ok_or_else(|| RollErrors::MissingColumn("EPIC".to_string()))?;
        let sex_idx = find_column(&columns, SEX_ALIASES)
            .ok_or_else(|| RollErrors::MissingColumn("Sex".to_string()))?;
        let known = [name_idx, door_idx, epic_idx, sex_idx];
        let extra_idx: Vec<usize> = (0..columns.len()).filter(|i| !known.contains(i)).collect();
        debug!(
            "resolve: columns: {:?} known: {:?} extra: {:?}",
            columns, known, extra_idx
        );
        Ok(RollLayout {
            columns,
            name_idx,
            door_idx,
            epic_idx,
            sex_idx,
            extra_idx,
        })
    }

    fn record_from_cells(&self, cells: &[String]) -> VoterRecord {
        // Rows shorter than the header are padded with empty values.
        let cell = |idx: usize| {
            cells
                .get(idx)
                .map(|s| s.trim().to_string())
                .unwrap_or_default()
        };
        VoterRecord {
            name: cell(self.name_idx),
            door_no: cell(self.door_idx),
            epic: cell(self.epic_idx),
            sex: Gender::parse(&cell(self.sex_idx)),
            extra: self.extra_idx.iter().map(|idx| cell(*idx)).collect(),
        }
    }

    // The displayed cell of a record for a given column position.
    fn cell_at(&self, record: &VoterRecord, col: usize) -> String {
        if col == self.name_idx {
            record.name.clone()
        } else if col == self.door_idx {
            record.door_no.clone()
        } else if col == self.epic_idx {
            record.epic.clone()
        } else if col == self.sex_idx {
            record.sex.label().to_string()
        } else {
            self.extra_idx
                .iter()
                .position(|idx| *idx == col)
                .and_then(|pos| record.extra.get(pos))
                .cloned()
                .unwrap_or_default()
        }
    }
}

fn find_column(columns: &[String], aliases: &[&str]) -> Option<usize> {
    columns.iter().position(|c| {
        let lower = c.to_lowercase();
        aliases.iter().any(|a| *a == lower)
    })
}

/// An immutable, ordered collection of voter records.
///
/// A `RecordSet` is loaded once per process and never mutated afterwards.
/// [`RecordSet::search`] derives fresh filtered views carrying the same
/// layout, so a shared roll can serve any number of independent queries.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RecordSet {
    pub(crate) layout: RollLayout,
    pub(crate) records: Vec<VoterRecord>,
}

impl RecordSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The column names of this view, in source order.
    pub fn columns(&self) -> &[String] {
        &self.layout.columns
    }

    pub fn records(&self) -> &[VoterRecord] {
        &self.records
    }

    /// The cells of one record in column order, as displayed or exported.
    pub fn record_cells(&self, record: &VoterRecord) -> Vec<String> {
        (0..self.layout.columns.len())
            .map(|col| self.layout.cell_at(record, col))
            .collect()
    }

    /// Filters the set by case-insensitive substring containment.
    ///
    /// An empty query returns the full set unchanged. Row order is preserved
    /// and the receiver is left untouched. The scope of the match is
    /// controlled by `options`: identity fields only, or every column.
    pub fn search(&self, query: &str, options: &SearchOptions) -> RecordSet {
        if query.is_empty() {
            return self.clone();
        }
        let needle = query.to_lowercase();
        let records: Vec<VoterRecord> = self
            .records
            .iter()
            .filter(|r| self.matches(r, &needle, options))
            .cloned()
            .collect();
        debug!(
            "search: {:?} matched {} of {} records",
            query,
            records.len(),
            self.records.len()
        );
        RecordSet {
            layout: self.layout.clone(),
            records,
        }
    }

    // needle must already be lowercased.
    fn matches(&self, record: &VoterRecord, needle: &str, options: &SearchOptions) -> bool {
        let hit = |s: &str| s.to_lowercase().contains(needle);
        if hit(&record.name) || hit(&record.door_no) || hit(&record.epic) {
            return true;
        }
        if options.restrict_to_identity_fields {
            return false;
        }
        hit(record.sex.label()) || record.extra.iter().any(|s| hit(s))
    }

    /// Frequency counts of the gender categories over this view.
    ///
    /// Categories with no occurrence are omitted; the counts always sum to
    /// the number of records in the view. The semantics are identical on the
    /// full roll and on any filtered view.
    pub fn gender_tally(&self) -> Vec<(Gender, u64)> {
        let mut counts: HashMap<Gender, u64> = HashMap::new();
        for record in self.records.iter() {
            *counts.entry(record.sex).or_insert(0) += 1;
        }
        Gender::ALL
            .iter()
            .filter_map(|g| counts.get(g).map(|count| (*g, *count)))
            .collect()
    }

    /// Serializes the view as delimited text: a header row with the source
    /// column names followed by one line per record, UTF-8 encoded.
    ///
    /// Fields containing the delimiter, a double quote or a newline are
    /// quoted; embedded quotes are doubled. No other escaping is applied.
    pub fn to_delimited(&self, delimiter: char) -> String {
        let mut out = String::new();
        write_line(&mut out, self.layout.columns.clone(), delimiter);
        for record in self.records.iter() {
            write_line(&mut out, self.record_cells(record), delimiter);
        }
        out
    }
}

fn write_line(out: &mut String, cells: Vec<String>, delimiter: char) {
    let quoted: Vec<String> = cells.iter().map(|c| quote_cell(c, delimiter)).collect();
    out.push_str(&quoted.join(&delimiter.to_string()));
    out.push('\n');
}

fn quote_cell(cell: &str, delimiter: char) -> String {
    if cell.contains(delimiter) || cell.contains('"') || cell.contains('\n') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::RollBuilder;
    use crate::*;

    fn strs(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn smith_roll() -> RecordSet {
        let header = strs(&["Name", "Relation", "Door_No", "EPIC", "Sex"]);
        let mut builder = RollBuilder::new(&header).unwrap();
        builder
            .add_row(&strs(&["John Smith", "Robert Smith", "12A", "ABC123", "M"]))
            .unwrap();
        builder
            .add_row(&strs(&["Jane Smith", "John Smith", "12B", "XYZ789", "F"]))
            .unwrap();
        builder
            .add_row(&strs(&["Raj Smith Sr.", "", "13", "PQR456", ""]))
            .unwrap();
        builder.build()
    }

    #[test]
    fn empty_query_is_identity() {
        let roll = smith_roll();
        let view = roll.search("", &SearchOptions::DEFAULT);
        assert_eq!(view, roll);
    }

    #[test]
    fn name_search_matches_all_smiths() {
        let roll = smith_roll();
        let view = roll.search("smith", &SearchOptions::DEFAULT);
        assert_eq!(view.len(), 3);
        assert_eq!(
            view.gender_tally(),
            vec![
                (Gender::Male, 1),
                (Gender::Female, 1),
                (Gender::Unknown, 1)
            ]
        );
    }

    #[test]
    fn door_number_match_is_case_insensitive() {
        let roll = smith_roll();
        let view = roll.search("12a", &SearchOptions::DEFAULT);
        assert_eq!(view.len(), 1);
        assert_eq!(view.records()[0].name, "John Smith");
    }

    #[test]
    fn epic_search_finds_one_record() {
        let roll = smith_roll();
        let view = roll.search("xyz789", &SearchOptions::DEFAULT);
        assert_eq!(view.len(), 1);
        assert_eq!(view.records()[0].name, "Jane Smith");
    }

    #[test]
    fn no_match_returns_empty_view() {
        let roll = smith_roll();
        let view = roll.search("nonexistent", &SearchOptions::DEFAULT);
        assert!(view.is_empty());
        assert_eq!(view.gender_tally(), vec![]);
    }

    #[test]
    fn search_is_idempotent() {
        let roll = smith_roll();
        let once = roll.search("smith", &SearchOptions::DEFAULT);
        let twice = once.search("smith", &SearchOptions::DEFAULT);
        assert_eq!(once, twice);
    }

    #[test]
    fn relation_column_is_ignored_by_default() {
        let roll = smith_roll();
        // "robert" only appears in the relation column of the first row.
        let restricted = roll.search("robert", &SearchOptions::DEFAULT);
        assert!(restricted.is_empty());
        let unrestricted = roll.search(
            "robert",
            &SearchOptions {
                restrict_to_identity_fields: false,
            },
        );
        assert_eq!(unrestricted.len(), 1);
    }

    #[test]
    fn tally_sums_to_view_length() {
        let roll = smith_roll();
        for query in ["", "smith", "12", "xyz789", "nonexistent"] {
            let view = roll.search(query, &SearchOptions::DEFAULT);
            let total: u64 = view.gender_tally().iter().map(|(_, c)| *c).sum();
            assert_eq!(total, view.len() as u64, "query {:?}", query);
        }
    }

    #[test]
    fn zero_count_categories_are_omitted() {
        let roll = smith_roll();
        let view = roll.search("12a", &SearchOptions::DEFAULT);
        assert_eq!(view.gender_tally(), vec![(Gender::Male, 1)]);
    }

    #[test]
    fn gender_parse_is_total() {
        for raw in ["M", "F", "Male", "Female", "", "X", "  f  ", "m.", "0"] {
            let gender = Gender::parse(raw);
            assert!(Gender::ALL.contains(&gender), "raw {:?}", raw);
        }
        assert_eq!(Gender::parse("M"), Gender::Male);
        assert_eq!(Gender::parse("female"), Gender::Female);
        assert_eq!(Gender::parse("X"), Gender::Unknown);
        assert_eq!(Gender::parse(""), Gender::Unknown);
    }

    #[test]
    fn header_whitespace_is_trimmed() {
        let header = strs(&[" Name ", "Door No.", "EPIC ", " Sex"]);
        let builder = RollBuilder::new(&header).unwrap();
        let roll = builder.build();
        assert_eq!(
            roll.columns(),
            strs(&["Name", "Door No.", "EPIC", "Sex"]).as_slice()
        );
    }

    #[test]
    fn gender_column_alias_resolves() {
        let header = strs(&["Name", "DoorNo", "EPIC_No", "Gender"]);
        let mut builder = RollBuilder::new(&header).unwrap();
        builder
            .add_row(&strs(&["A", "1", "AAA111", "Female"]))
            .unwrap();
        let roll = builder.build();
        assert_eq!(roll.records()[0].sex, Gender::Female);
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let header = strs(&["Name", "Door_No", "Sex"]);
        match RollBuilder::new(&header) {
            Err(RollErrors::MissingColumn(name)) => assert_eq!(name, "EPIC"),
            x => panic!("unexpected: {:?}", x.err()),
        }
    }

    #[test]
    fn empty_header_is_an_error() {
        assert_eq!(
            RollBuilder::new(&[]).err(),
            Some(RollErrors::EmptyTable)
        );
    }

    #[test]
    fn short_rows_pad_with_empty_cells() {
        let header = strs(&["Name", "Door_No", "EPIC", "Sex"]);
        let mut builder = RollBuilder::new(&header).unwrap();
        builder.add_row(&strs(&["Solo Voter"])).unwrap();
        let roll = builder.build();
        let record = &roll.records()[0];
        assert_eq!(record.name, "Solo Voter");
        assert_eq!(record.epic, "");
        assert_eq!(record.sex, Gender::Unknown);
        // A missing cell never matches a non-empty query.
        assert!(roll.search("abc", &SearchOptions::DEFAULT).is_empty());
    }

    #[test]
    fn delimited_export_round_layout() {
        let roll = smith_roll();
        let view = roll.search("12a", &SearchOptions::DEFAULT);
        let text = view.to_delimited(',');
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Name,Relation,Door_No,EPIC,Sex");
        assert_eq!(lines[1], "John Smith,Robert Smith,12A,ABC123,Male");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn delimited_export_quotes_the_delimiter() {
        let header = strs(&["Name", "Door_No", "EPIC", "Sex"]);
        let mut builder = RollBuilder::new(&header).unwrap();
        builder
            .add_row(&strs(&["Smith, John \"JJ\"", "12A", "ABC123", "M"]))
            .unwrap();
        let roll = builder.build();
        let text = roll.to_delimited(',');
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "\"Smith, John \"\"JJ\"\"\",12A,ABC123,Male");
    }
}
