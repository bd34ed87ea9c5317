use crate::error::{Error, Result};
use crate::types::SizeRow;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

// Same defaults as the reference brotli encoder.
const BROTLI_QUALITY: u32 = 11;
const BROTLI_LGWIN: u32 = 22;
const BROTLI_BUFFER: usize = 4096;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub origin: u64,
    pub minified: u64,
    pub brotli: u64,
}

/// Size of `bytes` after brotli compression. The compressed data is discarded.
pub fn brotli_size(bytes: &[u8]) -> io::Result<u64> {
    let mut out = Vec::new();
    {
        let mut writer =
            brotli::CompressorWriter::new(&mut out, BROTLI_BUFFER, BROTLI_QUALITY, BROTLI_LGWIN);
        writer.write_all(bytes)?;
        writer.flush()?;
    }
    Ok(out.len() as u64)
}

/// Report phase: re-reads every processed file from both directories.
pub fn collect_rows(input: &Path, output: &Path, names: &[OsString]) -> Result<Vec<SizeRow>> {
    let read = |path: &Path| {
        fs::read(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })
    };

    let mut rows = Vec::with_capacity(names.len());
    for name in names {
        let origin = read(&input.join(name))?;
        let minified_path = output.join(name);
        let minified = read(&minified_path)?;
        let brotli = brotli_size(&minified).map_err(|source| Error::Compress {
            path: minified_path.clone(),
            source,
        })?;

        rows.push(SizeRow {
            name: name.to_string_lossy().into_owned(),
            origin: origin.len() as u64,
            minified: minified.len() as u64,
            brotli,
        });
    }

    Ok(rows)
}

#[must_use]
pub fn totals(rows: &[SizeRow]) -> Totals {
    rows.iter().fold(Totals::default(), |acc, row| Totals {
        origin: acc.origin + row.origin,
        minified: acc.minified + row.minified,
        brotli: acc.brotli + row.brotli,
    })
}

/// Fraction of `origin` removed by minification, in percent.
#[must_use]
pub fn saved_percent(origin: u64, minified: u64) -> f64 {
    if origin == 0 {
        return 0.0;
    }
    (1.0 - minified as f64 / origin as f64) * 100.0
}
