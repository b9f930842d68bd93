pub use crate::config::*;
use crate::{RecordSet, RollLayout, VoterRecord};

/// A builder for assembling a voter roll from a raw table.
///
/// ```
/// pub use voter_roll::builder::RollBuilder;
/// # use voter_roll::RollErrors;
///
/// let header = vec![
///     "Name".to_string(),
///     "Door_No".to_string(),
///     "EPIC".to_string(),
///     "Sex".to_string(),
/// ];
/// let mut builder = RollBuilder::new(&header)?;
/// builder.add_row(&[
///     "John Smith".to_string(),
///     "12A".to_string(),
///     "ABC123".to_string(),
///     "M".to_string(),
/// ])?;
/// let roll = builder.build();
/// assert_eq!(roll.len(), 1);
///
/// # Ok::<(), RollErrors>(())
/// ```
pub struct RollBuilder {
    pub(crate) _layout: RollLayout,
    pub(crate) _records: Vec<VoterRecord>,
}

impl RollBuilder {
    /// Resolves the header into a layout.
    ///
    /// Fails if the header is empty or one of the required columns (name,
    /// door number, EPIC, sex) cannot be found under any of its known
    /// spellings.
    pub fn new(header: &[String]) -> Result<RollBuilder, RollErrors> {
        let layout = RollLayout::resolve(header)?;
        Ok(RollBuilder {
            _layout: layout,
            _records: Vec::new(),
        })
    }

    /// Adds one raw row of cells, in header order.
    ///
    /// Cells missing at the end of the row are treated as empty values and
    /// an unrecognized gender value falls back to [`Gender::Unknown`]; both
    /// are recovered locally, never reported as an error.
    pub fn add_row(&mut self, cells: &[String]) -> Result<(), RollErrors> {
        let record = self._layout.record_from_cells(cells);
        self._records.push(record);
        Ok(())
    }

    /// Consumes the builder into an immutable record set.
    pub fn build(self) -> RecordSet {
        RecordSet {
            layout: self._layout,
            records: self._records,
        }
    }
}
