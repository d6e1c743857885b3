use anyhow::Result;
use serde::Serialize;

use super::{MapWriter, SheetMap};

#[derive(Serialize)]
struct JsonOutput<'a> {
    meta: Meta,
    image: &'a str,
    size: Size,
    sprites: Vec<JsonSprite<'a>>,
}

#[derive(Serialize)]
struct Meta {
    app: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct Size {
    w: u32,
    h: u32,
}

#[derive(Serialize)]
struct JsonSprite<'a> {
    name: &'a str,
    frame: Frame,
}

#[derive(Serialize)]
struct Frame {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

/// JSON map with one frame per sprite
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMapWriter;

impl MapWriter for JsonMapWriter {
    fn extensions(&self) -> &[&'static str] {
        &["json"]
    }

    fn render(&self, map: &SheetMap<'_>) -> Result<String> {
        let output = JsonOutput {
            meta: Meta {
                app: "sheetpack",
                version: env!("CARGO_PKG_VERSION"),
            },
            image: map.image_name,
            size: Size {
                w: map.width,
                h: map.height,
            },
            sprites: map
                .entries
                .iter()
                .map(|e| JsonSprite {
                    name: &e.name,
                    frame: Frame {
                        x: e.x,
                        y: e.y,
                        w: e.width,
                        h: e.height,
                    },
                })
                .collect(),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}
