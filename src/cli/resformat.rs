use std::io::Write;

use crate::core::record::CosmisRecord;

const IO_ERROR: &str = "Failed to write results to the output TSV file.";

/// Write scored records as TSV with the unified 33-column header.
pub fn records(saveto: impl Write, records: &[CosmisRecord]) {
    let mut writer = csv::WriterBuilder::new().delimiter(b'\t').from_writer(saveto);
    for record in records {
        writer.serialize(record).expect(IO_ERROR);
    }
    writer.flush().expect(IO_ERROR);
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn header_and_rows() {
        let record = CosmisRecord::unresolved("P12345".into(), "ENST01".into(), 1, 'M', 4, 9, 2);
        let mut buffer = vec![];
        records(&mut buffer, &[record.clone(), record]);
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("uniprot_id\tenst_id\t"));
        assert_eq!(lines[1], lines[2]);
    }
}
