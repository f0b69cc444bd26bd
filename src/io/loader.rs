//! Parser for `id<TAB>index:weight,...` record files.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{ClusterError, Result};
use crate::vector::SparseVector;

/// Records loaded from an input file: identifiers and vectors in file order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub ids: Vec<String>,
    pub vectors: Vec<SparseVector>,
    /// Feature tokens dropped because they could not be parsed
    pub skipped_tokens: usize,
}

impl Dataset {
    /// Pair identifiers with vectors.
    pub fn new(ids: Vec<String>, vectors: Vec<SparseVector>) -> Result<Self> {
        if ids.len() != vectors.len() {
            return Err(ClusterError::LengthMismatch {
                vectors: vectors.len(),
                ids: ids.len(),
            });
        }
        Ok(Self {
            ids,
            vectors,
            skipped_tokens: 0,
        })
    }

    /// Load a dataset from a file.
    pub fn load<P: AsRef<Path>>(path: P, dimension: usize) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading records");
        let dataset = Self::parse(BufReader::new(File::open(path)?), dimension)?;
        info!(
            records = dataset.len(),
            skipped_tokens = dataset.skipped_tokens,
            "records loaded"
        );
        Ok(dataset)
    }

    /// Parse `id<TAB>index:weight,...` lines.
    ///
    /// Lines without a tab are ignored. Bytes that are not valid UTF-8 are
    /// replaced with U+FFFD and the line is parsed as usual. Feature tokens
    /// that do not parse are skipped and the record is kept with its
    /// remaining features. A parsed index outside `[0, dimension)` fails the
    /// whole load.
    pub fn parse<R: BufRead>(mut reader: R, dimension: usize) -> Result<Self> {
        let mut dataset = Self::default();
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;

            let bytes = buf
                .strip_suffix(b"\n")
                .map_or(&buf[..], |b| b.strip_suffix(b"\r").unwrap_or(b));
            let line = String::from_utf8_lossy(bytes);
            if matches!(line, Cow::Owned(_)) {
                debug!(line = line_no, "replacing invalid UTF-8");
            }
            let Some((id, features)) = line.split_once('\t') else {
                continue;
            };

            let record = dataset.vectors.len();
            let mut vector = SparseVector::with_capacity(features.matches(',').count() + 1);
            for token in features.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                match parse_feature(token) {
                    Some((index, _)) if index < 0 || index as u64 >= dimension as u64 => {
                        return Err(ClusterError::FeatureOutOfRange {
                            record,
                            index,
                            dimension,
                        });
                    }
                    Some((index, weight)) => vector.push(index as usize, weight),
                    None => {
                        debug!(line = line_no, token, "skipping malformed feature");
                        dataset.skipped_tokens += 1;
                    }
                }
            }

            dataset.ids.push(id.to_string());
            dataset.vectors.push(vector);
        }

        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

/// Parse one `index:weight` token.
fn parse_feature(token: &str) -> Option<(i64, f32)> {
    let (index, weight) = token.split_once(':')?;
    let index = index.trim().parse::<i64>().ok()?;
    let weight = weight.trim().parse::<f32>().ok()?;
    Some((index, weight))
}
