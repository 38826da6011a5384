//! Setup command: prepare the config file and open it for editing.

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::config::prepare_config_file;

/// Runs the setup command, handing the config path to `open`.
pub fn run<W: Write>(
    writer: &mut W,
    config_path: &Path,
    open: impl FnOnce(&std::ffi::OsStr) -> Result<()>,
) -> Result<()> {
    prepare_config_file(config_path)?;
    writeln!(writer, "Config file: {}", config_path.display())?;
    writeln!(
        writer,
        "Will now (try to) open the config file. Just edit and save the file."
    )?;
    writer.flush()?;
    open(config_path.as_os_str())
}
