pub mod dot;
pub mod json_compact;

pub use dot::DotFormatter;
pub use json_compact::JsonCompactFormatter;

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::core::DependencyGraph;
use crate::error::Result;

pub trait GraphFormatter {
    fn format_graph(&self, graph: &DependencyGraph) -> Result<String>;

    /// Renders the whole graph before touching `output_path`, then swaps it in
    /// with a rename so a failed run leaves no partial file behind.
    fn format_to_file(&self, graph: &DependencyGraph, output_path: &Path) -> Result<()> {
        let content = self.format_graph(graph)?;
        write_atomically(output_path, content.as_bytes())
    }

    fn format_to_writer(&self, graph: &DependencyGraph, writer: &mut dyn Write) -> Result<()> {
        let content = self.format_graph(graph)?;
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

pub fn write_atomically(output_path: &Path, content: &[u8]) -> Result<()> {
    let dir = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(content)?;
    staged.flush()?;
    staged.persist(output_path).map_err(|err| err.error)?;
    Ok(())
}
