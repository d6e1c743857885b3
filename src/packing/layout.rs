use serde::Serialize;

use super::Rect;

/// Where one source image ended up on the sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementEntry {
    /// Identifier of the source image
    pub name: String,
    pub x: u32,
    pub y: u32,
    /// Unpadded width, equal to the source image width
    pub width: u32,
    /// Unpadded height, equal to the source image height
    pub height: u32,
}

impl PlacementEntry {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A finished placement: final sheet size plus one entry per input, in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    pub entries: Vec<PlacementEntry>,
}

impl Layout {
    /// Ratio of sprite area to sheet area (0.0 to 1.0)
    pub fn occupancy(&self) -> f64 {
        let total = u64::from(self.width) * u64::from(self.height);
        if total == 0 {
            return 0.0;
        }
        let used: u64 = self.entries.iter().map(|e| e.rect().area()).sum();
        used as f64 / total as f64
    }

    pub fn get(&self, name: &str) -> Option<&PlacementEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occupancy() {
        let layout = Layout {
            width: 20,
            height: 10,
            entries: vec![PlacementEntry {
                name: "a".to_string(),
                x: 0,
                y: 0,
                width: 10,
                height: 10,
            }],
        };

        assert!((layout.occupancy() - 0.5).abs() < f64::EPSILON);
        assert_eq!(layout.get("a").map(PlacementEntry::rect), Some(Rect::new(0, 0, 10, 10)));
        assert!(layout.get("b").is_none());
    }
}
