//! Writer for `id<TAB>cluster` assignment lines.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{ClusterError, Result};

/// Write one `id<TAB>cluster` line per record, in input order.
pub fn write_assignments<W: Write>(
    mut writer: W,
    ids: &[String],
    assignments: &[usize],
) -> Result<()> {
    if ids.len() != assignments.len() {
        return Err(ClusterError::LengthMismatch {
            vectors: assignments.len(),
            ids: ids.len(),
        });
    }
    for (id, cluster) in ids.iter().zip(assignments) {
        writeln!(writer, "{id}\t{cluster}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write assignments to `path`, or to stdout when no path is given.
pub fn write_assignments_to(
    path: Option<&Path>,
    ids: &[String],
    assignments: &[usize],
) -> Result<()> {
    match path {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            write_assignments(writer, ids, assignments)
        }
        None => {
            let stdout = std::io::stdout();
            write_assignments(BufWriter::new(stdout.lock()), ids, assignments)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_tab_separated_lines() {
        let ids = vec!["a".to_string(), "b".to_string()];
        let mut buffer = Vec::new();
        write_assignments(&mut buffer, &ids, &[3, 0]).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "a\t3\nb\t0\n");
    }

    #[test]
    fn test_length_mismatch() {
        let ids = vec!["a".to_string()];
        let mut buffer = Vec::new();
        assert!(matches!(
            write_assignments(&mut buffer, &ids, &[0, 1]),
            Err(ClusterError::LengthMismatch { vectors: 2, ids: 1 })
        ));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tsv");
        let ids = vec!["x".to_string()];
        write_assignments_to(Some(&path), &ids, &[1]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "x\t1\n");
    }
}
