// The interactive surface: one cached roll, one query per interaction.

use std::io::{self, BufRead, Write};

use voter_roll::{Gender, RecordSet};

use crate::roll::*;

/// The application context. It owns the one immutable record set loaded for
/// the lifetime of the process; every interaction derives a fresh filtered
/// view from it and nothing ever writes back.
pub struct Session {
    pub ward_name: String,
    pub roll: RecordSet,
    pub options: SearchOptions,
    pub preview_rows: usize,
}

impl Session {
    /// One synchronous filter pass over the cached roll.
    pub fn run_query(&self, query: &str) -> RecordSet {
        self.roll.search(query, &self.options)
    }

    pub fn print_summary(&self) {
        println!("=== {} ===", self.ward_name);
        println!("Total registered voters: {}", self.roll.len());
        print_tally("Ward-wide gender split", &self.roll.gender_tally());
    }

    pub fn print_preview(&self) {
        println!("Preview of records:");
        print_table(&self.roll, Some(self.preview_rows));
    }

    pub fn print_results(&self, query: &str, results: &RecordSet) {
        if results.is_empty() {
            // Zero matches is an ordinary outcome, not a failure.
            println!(
                "No match found for {:?} in the {} columns.",
                query,
                scope_label(&self.options)
            );
            if self.options.restrict_to_identity_fields {
                println!("Note: the search ignores relation columns (father/husband names).");
            }
            return;
        }
        println!("Found {} matches in voter details.", results.len());
        print_table(results, None);
        print_tally(
            &format!("Gender split for search {:?}", query),
            &results.gender_tally(),
        );
    }
}

fn scope_label(options: &SearchOptions) -> &'static str {
    if options.restrict_to_identity_fields {
        "name/door/EPIC"
    } else {
        "all"
    }
}

fn print_table(view: &RecordSet, cap: Option<usize>) {
    let shown = cap.unwrap_or(view.len()).min(view.len());
    println!("{}", view.columns().join(" | "));
    for record in view.records().iter().take(shown) {
        println!("{}", view.record_cells(record).join(" | "));
    }
    if shown < view.len() {
        println!("... {} more rows", view.len() - shown);
    }
}

fn print_tally(title: &str, tally: &[(Gender, u64)]) {
    println!("{}:", title);
    for (gender, count) in tally.iter() {
        println!("  {:<8} {}", gender.label(), count);
    }
}

/// Writes a view as comma-separated text, header row included.
pub fn export_view(view: &RecordSet, path: &str) -> RollResult<()> {
    let contents = view.to_delimited(',');
    fs::write(path, contents).context(WritingExportSnafu {
        path: path.to_string(),
    })?;
    info!("export_view: wrote {} rows to {:?}", view.len(), path);
    Ok(())
}

/// The read-eval-print loop over standard input.
///
/// A plain line runs a search, an empty line shows the preview again,
/// `:export <path>` writes the last results and `:quit` exits.
pub fn run_interactive(session: &Session) -> RollResult<()> {
    session.print_summary();
    session.print_preview();
    println!("Enter a name, door number or EPIC number to search.");
    println!("Commands: ':export <path>' writes the last results, ':quit' exits.");

    let stdin = io::stdin();
    let mut last_results: Option<RecordSet> = None;
    loop {
        print!("> ");
        io::stdout()
            .flush()
            .whatever_context("Error flushing standard output")?;
        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .whatever_context("Error reading standard input")?;
        if read == 0 {
            break;
        }
        let input = line.trim();
        match input {
            "" => session.print_preview(),
            ":quit" | ":q" => break,
            cmd if cmd.starts_with(":export") => {
                let path = cmd[":export".len()..].trim();
                if path.is_empty() {
                    println!("Usage: :export <path>");
                    continue;
                }
                match last_results.as_ref() {
                    Some(view) => {
                        export_view(view, path)?;
                        println!("Wrote {} rows to {}", view.len(), path);
                    }
                    None => println!("Nothing to export yet, run a search first."),
                }
            }
            cmd if cmd.starts_with(':') => {
                println!("Unknown command {:?}", cmd);
            }
            query => {
                let results = session.run_query(query);
                session.print_results(query, &results);
                last_results = Some(results);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use voter_roll::builder::RollBuilder;

    fn strs(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn test_session(restrict: bool) -> Session {
        let header = strs(&["Name", "Relation", "Door_No", "EPIC", "Sex"]);
        let mut builder = RollBuilder::new(&header).unwrap();
        builder
            .add_row(&strs(&["John Smith", "Robert Smith", "12A", "ABC123", "M"]))
            .unwrap();
        builder
            .add_row(&strs(&["Jane Smith", "John Smith", "12B", "XYZ789", "F"]))
            .unwrap();
        Session {
            ward_name: "Test Ward".to_string(),
            roll: builder.build(),
            options: SearchOptions {
                restrict_to_identity_fields: restrict,
            },
            preview_rows: 50,
        }
    }

    #[test]
    fn queries_follow_the_configured_scope() {
        let restricted = test_session(true);
        assert!(restricted.run_query("robert").is_empty());
        let unrestricted = test_session(false);
        assert_eq!(unrestricted.run_query("robert").len(), 1);
    }

    #[test]
    fn each_query_derives_a_fresh_view() {
        let session = test_session(true);
        let before = session.roll.len();
        let _ = session.run_query("smith");
        let _ = session.run_query("nonexistent");
        assert_eq!(session.roll.len(), before);
    }

    #[test]
    fn export_writes_the_filtered_view() {
        let session = test_session(true);
        let view = session.run_query("12b");
        let mut p = std::env::temp_dir();
        p.push(format!("wardroll_test_{}_export.csv", std::process::id()));
        let path = p.display().to_string();
        export_view(&view, &path).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "Name,Relation,Door_No,EPIC,Sex");
        assert_eq!(lines[1], "Jane Smith,John Smith,12B,XYZ789,Female");
        fs::remove_file(&path).unwrap();
    }
}
