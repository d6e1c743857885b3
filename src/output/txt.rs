use std::fmt::Write;

use anyhow::Result;

use super::{MapWriter, SheetMap};

/// Plain text map: one `name = x y width height` line per sprite
#[derive(Debug, Clone, Copy, Default)]
pub struct TxtMapWriter;

impl MapWriter for TxtMapWriter {
    fn extensions(&self) -> &[&'static str] {
        &["txt"]
    }

    fn render(&self, map: &SheetMap<'_>) -> Result<String> {
        let mut out = String::new();
        for e in map.entries {
            writeln!(out, "{} = {} {} {} {}", e.name, e.x, e.y, e.width, e.height)?;
        }
        Ok(out)
    }
}
