//! Aspect-preserving scale targets for sticker output.

/// Length of the longer output side accepted by the sticker platform.
pub const STICKER_LONG_SIDE: u32 = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleAxis {
    Width,
    Height,
}

impl ScaleAxis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalePlan {
    pub long_side: u32,
    pub axis: ScaleAxis,
}

impl ScalePlan {
    /// Fixes the longer source dimension to `long_side`; the scaler derives the
    /// other one. Square sources take the width branch.
    pub fn with_long_side(width: u32, height: u32, long_side: u32) -> Self {
        let axis = if width >= height {
            ScaleAxis::Width
        } else {
            ScaleAxis::Height
        };
        Self { long_side, axis }
    }

    pub fn filter(&self) -> String {
        match self.axis {
            ScaleAxis::Width => format!("scale={}:-1", self.long_side),
            ScaleAxis::Height => format!("scale=-1:{}", self.long_side),
        }
    }
}

pub fn plan(width: u32, height: u32) -> ScalePlan {
    ScalePlan::with_long_side(width, height, STICKER_LONG_SIDE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_fixes_width() {
        let plan = plan(1920, 1080);
        assert_eq!(plan.axis, ScaleAxis::Width);
        assert_eq!(plan.long_side, 512);
        assert_eq!(plan.filter(), "scale=512:-1");
    }

    #[test]
    fn test_portrait_fixes_height() {
        let plan = plan(720, 1280);
        assert_eq!(plan.axis, ScaleAxis::Height);
        assert_eq!(plan.filter(), "scale=-1:512");
    }

    #[test]
    fn test_square_takes_width_branch() {
        assert_eq!(plan(480, 480).axis, ScaleAxis::Width);
    }

    #[test]
    fn test_axis_follows_longer_side() {
        for (w, h) in [(1, 1), (2, 1), (513, 512), (100, 4000), (4000, 100), (3, 7)] {
            let expected = if w >= h { ScaleAxis::Width } else { ScaleAxis::Height };
            let plan = plan(w, h);
            assert_eq!(plan.axis, expected, "{}x{}", w, h);
            assert_eq!(plan.long_side, STICKER_LONG_SIDE);
        }
    }
}
