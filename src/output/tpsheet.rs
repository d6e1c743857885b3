use std::fmt::Write;

use anyhow::Result;

use super::{MapWriter, SheetMap};

/// Pivot written for every sprite (center)
const PIVOT: (f32, f32) = (0.5, 0.5);

/// TexturePacker text sheet, as read by the Unity TexturePacker importer
#[derive(Debug, Clone, Copy, Default)]
pub struct TpsheetMapWriter;

impl MapWriter for TpsheetMapWriter {
    fn extensions(&self) -> &[&'static str] {
        &["tpsheet"]
    }

    fn render(&self, map: &SheetMap<'_>) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "#")?;
        writeln!(out, "# Sprite sheet data for Unity.")?;
        writeln!(out, "#")?;
        writeln!(
            out,
            "# To import these sprites into your Unity project, download \"TexturePackerImporter\":"
        )?;
        writeln!(out, "# http://www.codeandweb.com/texturepacker/unity")?;
        writeln!(out, "#")?;
        writeln!(
            out,
            "# Sprite sheet: {}.png ({} x {})",
            map.image_name, map.width, map.height
        )?;
        writeln!(out, "#")?;
        writeln!(out)?;

        for e in map.entries {
            writeln!(
                out,
                "{};{};{};{};{};{};{}",
                e.name, e.x, e.y, e.width, e.height, PIVOT.0, PIVOT.1
            )?;
        }

        Ok(out)
    }
}
