use ft::input::{InputEvent, ValidInput};
use ft::Result;

use std::{
    fs::File,
    io::Read,
    path::PathBuf,
};

use csv::{Reader, ReaderBuilder, Trim};

#[derive(Debug, Default)]
pub struct ImportBatch {
    pub inputs: Vec<ValidInput>,
    pub skipped: usize,
}

pub fn build_csv_reader(filepath: PathBuf) -> Result<Reader<File>> {
    let reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(filepath)?;

    Ok(reader)
}

/// Deserializes every row through the validation gate. Invalid rows are logged and skipped.
pub fn read_import_batch<R: Read>(rdr: &mut Reader<R>) -> ImportBatch {
    let mut batch = ImportBatch::default();

    for record in rdr.deserialize::<InputEvent>() {
        log::debug!("Parsing record into InputEvent: {record:?}");
        let input_event = match record {
            Ok(input_event) => input_event,
            Err(e) => {
                log::warn!("{e}");
                batch.skipped += 1;
                continue;
            }
        };

        log::debug!("Validating input_event: {input_event:?}");
        match input_event.parse_input() {
            Ok(input) => batch.inputs.push(input),
            Err(e) => {
                log::warn!("{e}");
                batch.skipped += 1;
            }
        }
    }

    batch
}
