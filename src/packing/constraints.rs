/// Default maximum sheet width in pixels
pub const DEFAULT_MAX_WIDTH: u32 = 4096;
/// Default maximum sheet height in pixels
pub const DEFAULT_MAX_HEIGHT: u32 = 4096;
/// Default gap between packed images in pixels
pub const DEFAULT_PADDING: u32 = 1;

/// Sizing constraints for one packing run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackingConstraints {
    pub max_width: u32,
    pub max_height: u32,
    pub padding: u32,
    pub power_of_two: bool,
    pub square: bool,
}

impl Default for PackingConstraints {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WIDTH, DEFAULT_MAX_HEIGHT)
    }
}

impl PackingConstraints {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
            padding: DEFAULT_PADDING,
            power_of_two: false,
            square: false,
        }
    }

    pub fn padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    pub fn power_of_two(mut self, pot: bool) -> Self {
        self.power_of_two = pot;
        self
    }

    pub fn square(mut self, square: bool) -> Self {
        self.square = square;
        self
    }

    /// Round a canvas size up so it satisfies the power-of-two and square flags.
    ///
    /// Never shrinks either dimension.
    pub fn round_up(&self, width: u32, height: u32) -> (u32, u32) {
        let (mut w, mut h) = (width.max(1), height.max(1));
        if self.power_of_two {
            w = next_power_of_two(w);
            h = next_power_of_two(h);
        }
        if self.square {
            let side = w.max(h);
            w = side;
            h = side;
        }
        (w, h)
    }

    pub fn within_limits(&self, width: u32, height: u32) -> bool {
        width <= self.max_width && height <= self.max_height
    }
}

/// Smallest power of two >= `n`, saturating at `u32::MAX` when it does not fit
pub fn next_power_of_two(n: u32) -> u32 {
    n.max(1).checked_next_power_of_two().unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_power_of_two() {
        assert_eq!(next_power_of_two(0), 1);
        assert_eq!(next_power_of_two(1), 1);
        assert_eq!(next_power_of_two(2), 2);
        assert_eq!(next_power_of_two(3), 4);
        assert_eq!(next_power_of_two(5), 8);
        assert_eq!(next_power_of_two(100), 128);
        assert_eq!(next_power_of_two(1000), 1024);
        assert_eq!(next_power_of_two(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_round_up_flags() {
        let plain = PackingConstraints::default();
        assert_eq!(plain.round_up(130, 90), (130, 90));

        let pot = PackingConstraints::default().power_of_two(true);
        assert_eq!(pot.round_up(130, 90), (256, 128));

        let square = PackingConstraints::default().square(true);
        assert_eq!(square.round_up(130, 90), (130, 130));

        let both = PackingConstraints::default().power_of_two(true).square(true);
        assert_eq!(both.round_up(130, 90), (256, 256));
    }

    #[test]
    fn test_builder_defaults() {
        let c = PackingConstraints::new(512, 256).padding(3);
        assert_eq!(c.max_width, 512);
        assert_eq!(c.max_height, 256);
        assert_eq!(c.padding, 3);
        assert!(!c.power_of_two);
        assert!(!c.square);
        assert!(c.within_limits(512, 256));
        assert!(!c.within_limits(513, 256));
    }
}
