/*!

# Quick start

This example shows how to load a ward roll and run searches against it, end
to end.

The roll is a spreadsheet with one row per registered voter. The only
required columns are the voter name, the door number, the EPIC (identity
card) number and the gender; any other column is carried along untouched and
shows up again in exports. A typical sheet looks like the following:

```text
Name          | Relation     | Door_No | EPIC    | Sex
John Smith    | Robert Smith | 12A     | ABC123  | M
Jane Smith    | John Smith   | 12B     | XYZ789  | F
```

**From the command line** Point `wardroll` at the file and start typing
queries:

```bash
wardroll --input voters_ward10.xlsx
```

The prompt accepts a name, a door number or an EPIC number and prints the
matching rows together with their gender split. `:export results.csv` writes
the last result set as comma-separated text, `:quit` leaves.

By default the search only considers the name, door-number and EPIC columns.
Relation columns are deliberately ignored so that searching for a family
name does not drag in every relative; pass `--all-fields` to search every
column instead.

**From the library** The same pipeline is available programmatically:

```
use voter_roll::builder::RollBuilder;
use voter_roll::SearchOptions;
# use voter_roll::RollErrors;

let header: Vec<String> = ["Name", "Door_No", "EPIC", "Sex"]
    .iter()
    .map(|s| s.to_string())
    .collect();
let mut builder = RollBuilder::new(&header)?;
builder.add_row(&[
    "John Smith".to_string(),
    "12A".to_string(),
    "ABC123".to_string(),
    "M".to_string(),
])?;
let roll = builder.build();

let results = roll.search("12a", &SearchOptions::DEFAULT);
assert_eq!(results.len(), 1);
for (gender, count) in results.gender_tally() {
    println!("{}: {}", gender.label(), count);
}

# Ok::<(), RollErrors>(())
```

*/
