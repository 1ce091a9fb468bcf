//! Fixture file interop.
//! Adds functionality for writing fixtures to disk and reading them back.
use crate::*;
use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
};

pub mod fixture;

/// Create the parent directories of `path`, if any.
fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn create(path: &Path) -> Result<impl Write> {
    ensure_parent(path)?;
    Ok(BufWriter::new(fs::File::create(path)?))
}
