//! CSV export of irregularity scores.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;

/// Writes an `Index,Value` header followed by one row per score.
///
/// The index is the 0-based position of the score, i.e. its region's rank in ascending
/// label order.
pub fn write_scores_csv<W: Write>(mut writer: W, scores: &[f64]) -> Result<()> {
    writeln!(writer, "Index,Value")?;
    for (i, score) in scores.iter().enumerate() {
        writeln!(writer, "{i},{score}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Creates (or truncates) `path` and writes `scores` to it as CSV.
pub fn save_scores_csv<P: AsRef<Path>>(path: P, scores: &[f64]) -> Result<()> {
    let file = File::create(path)?;
    write_scores_csv(BufWriter::new(file), scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SegmentationError;

    #[test]
    fn test_csv_layout() {
        let mut out: Vec<u8> = Vec::new();
        write_scores_csv(&mut out, &[1.0, 1.25, 3.5]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Index,Value\n0,1\n1,1.25\n2,3.5\n"
        );
    }

    #[test]
    fn test_empty_scores_write_header_only() {
        let mut out: Vec<u8> = Vec::new();
        write_scores_csv(&mut out, &[]).unwrap();
        assert_eq!(out, b"Index,Value\n");
    }

    #[test]
    fn test_unwritable_path_is_an_io_error() {
        let dir = std::env::temp_dir().join("region-irregularity-missing-dir");
        let _ = std::fs::remove_dir_all(&dir);
        let result = save_scores_csv(dir.join("scores.csv"), &[1.0]);
        assert!(matches!(result, Err(SegmentationError::Io(_))));
    }

    #[test]
    fn test_save_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!(
            "region-irregularity-scores-{}.csv",
            std::process::id()
        ));
        save_scores_csv(&path, &[0.5]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(text, "Index,Value\n0,0.5\n");
    }
}
