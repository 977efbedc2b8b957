//! Outlet and device box volumes, NEC 314.16.
//!
//! Table 314.16(A) lists standard metal box volumes; Table 314.16(B) gives
//! the free space required per conductor.

use serde::{Deserialize, Serialize};

use super::awg::WireGauge;

/// Free space within box for each conductor, Table 314.16(B) (in³)
pub fn volume_allowance_in3(gauge: WireGauge) -> Option<f64> {
    match gauge {
        WireGauge::Awg18 => Some(1.50),
        WireGauge::Awg16 => Some(1.75),
        WireGauge::Awg14 => Some(2.00),
        WireGauge::Awg12 => Some(2.25),
        WireGauge::Awg10 => Some(2.50),
        WireGauge::Awg8 => Some(3.00),
        WireGauge::Awg6 => Some(5.00),
        _ => None,
    }
}

/// Standard metal boxes from Table 314.16(A)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StandardBox {
    /// Use the custom volume entered by the user
    #[default]
    Custom,
    Round4x1_1_4,
    Round4x1_1_2,
    Round4x2_1_8,
    Square4x1_1_4,
    Square4x1_1_2,
    Square4x2_1_8,
    Square4_11_16x1_1_4,
    Square4_11_16x1_1_2,
    Square4_11_16x2_1_8,
    Device3x2x1_1_2,
    Device3x2x2,
    Device3x2x2_1_4,
    Device3x2x2_1_2,
    Device3x2x2_3_4,
    Device3x2x3_1_2,
    Device4x2_1_8x1_1_2,
    Device4x2_1_8x1_7_8,
    Device4x2_1_8x2_1_8,
    Masonry3_3_4x2x2_1_2,
    Masonry3_3_4x2x3_1_2,
}

impl StandardBox {
    /// All boxes for UI selection
    pub const ALL: [StandardBox; 21] = [
        StandardBox::Custom,
        StandardBox::Round4x1_1_4,
        StandardBox::Round4x1_1_2,
        StandardBox::Round4x2_1_8,
        StandardBox::Square4x1_1_4,
        StandardBox::Square4x1_1_2,
        StandardBox::Square4x2_1_8,
        StandardBox::Square4_11_16x1_1_4,
        StandardBox::Square4_11_16x1_1_2,
        StandardBox::Square4_11_16x2_1_8,
        StandardBox::Device3x2x1_1_2,
        StandardBox::Device3x2x2,
        StandardBox::Device3x2x2_1_4,
        StandardBox::Device3x2x2_1_2,
        StandardBox::Device3x2x2_3_4,
        StandardBox::Device3x2x3_1_2,
        StandardBox::Device4x2_1_8x1_1_2,
        StandardBox::Device4x2_1_8x1_7_8,
        StandardBox::Device4x2_1_8x2_1_8,
        StandardBox::Masonry3_3_4x2x2_1_2,
        StandardBox::Masonry3_3_4x2x3_1_2,
    ];

    /// Box volume in cubic inches; `None` for a custom box
    pub fn volume_in3(&self) -> Option<f64> {
        match self {
            StandardBox::Custom => None,
            StandardBox::Round4x1_1_4 => Some(12.5),
            StandardBox::Round4x1_1_2 => Some(15.5),
            StandardBox::Round4x2_1_8 => Some(21.5),
            StandardBox::Square4x1_1_4 => Some(18.0),
            StandardBox::Square4x1_1_2 => Some(21.0),
            StandardBox::Square4x2_1_8 => Some(30.3),
            StandardBox::Square4_11_16x1_1_4 => Some(25.5),
            StandardBox::Square4_11_16x1_1_2 => Some(29.5),
            StandardBox::Square4_11_16x2_1_8 => Some(42.0),
            StandardBox::Device3x2x1_1_2 => Some(7.5),
            StandardBox::Device3x2x2 => Some(10.0),
            StandardBox::Device3x2x2_1_4 => Some(10.5),
            StandardBox::Device3x2x2_1_2 => Some(12.5),
            StandardBox::Device3x2x2_3_4 => Some(14.0),
            StandardBox::Device3x2x3_1_2 => Some(18.0),
            StandardBox::Device4x2_1_8x1_1_2 => Some(10.3),
            StandardBox::Device4x2_1_8x1_7_8 => Some(13.0),
            StandardBox::Device4x2_1_8x2_1_8 => Some(14.5),
            StandardBox::Masonry3_3_4x2x2_1_2 => Some(14.0),
            StandardBox::Masonry3_3_4x2x3_1_2 => Some(21.0),
        }
    }

    /// Serialized key
    pub fn key(&self) -> &'static str {
        match self {
            StandardBox::Custom => "custom",
            StandardBox::Round4x1_1_4 => "round4x1_1_4",
            StandardBox::Round4x1_1_2 => "round4x1_1_2",
            StandardBox::Round4x2_1_8 => "round4x2_1_8",
            StandardBox::Square4x1_1_4 => "square4x1_1_4",
            StandardBox::Square4x1_1_2 => "square4x1_1_2",
            StandardBox::Square4x2_1_8 => "square4x2_1_8",
            StandardBox::Square4_11_16x1_1_4 => "square4_11_16x1_1_4",
            StandardBox::Square4_11_16x1_1_2 => "square4_11_16x1_1_2",
            StandardBox::Square4_11_16x2_1_8 => "square4_11_16x2_1_8",
            StandardBox::Device3x2x1_1_2 => "device3x2x1_1_2",
            StandardBox::Device3x2x2 => "device3x2x2",
            StandardBox::Device3x2x2_1_4 => "device3x2x2_1_4",
            StandardBox::Device3x2x2_1_2 => "device3x2x2_1_2",
            StandardBox::Device3x2x2_3_4 => "device3x2x2_3_4",
            StandardBox::Device3x2x3_1_2 => "device3x2x3_1_2",
            StandardBox::Device4x2_1_8x1_1_2 => "device4x2_1_8x1_1_2",
            StandardBox::Device4x2_1_8x1_7_8 => "device4x2_1_8x1_7_8",
            StandardBox::Device4x2_1_8x2_1_8 => "device4x2_1_8x2_1_8",
            StandardBox::Masonry3_3_4x2x2_1_2 => "masonry3_3_4x2x2_1_2",
            StandardBox::Masonry3_3_4x2x3_1_2 => "masonry3_3_4x2x3_1_2",
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            StandardBox::Custom => "Custom volume",
            StandardBox::Round4x1_1_4 => "4 x 1-1/4 round/octagonal",
            StandardBox::Round4x1_1_2 => "4 x 1-1/2 round/octagonal",
            StandardBox::Round4x2_1_8 => "4 x 2-1/8 round/octagonal",
            StandardBox::Square4x1_1_4 => "4 x 1-1/4 square",
            StandardBox::Square4x1_1_2 => "4 x 1-1/2 square",
            StandardBox::Square4x2_1_8 => "4 x 2-1/8 square",
            StandardBox::Square4_11_16x1_1_4 => "4-11/16 x 1-1/4 square",
            StandardBox::Square4_11_16x1_1_2 => "4-11/16 x 1-1/2 square",
            StandardBox::Square4_11_16x2_1_8 => "4-11/16 x 2-1/8 square",
            StandardBox::Device3x2x1_1_2 => "3 x 2 x 1-1/2 device",
            StandardBox::Device3x2x2 => "3 x 2 x 2 device",
            StandardBox::Device3x2x2_1_4 => "3 x 2 x 2-1/4 device",
            StandardBox::Device3x2x2_1_2 => "3 x 2 x 2-1/2 device",
            StandardBox::Device3x2x2_3_4 => "3 x 2 x 2-3/4 device",
            StandardBox::Device3x2x3_1_2 => "3 x 2 x 3-1/2 device",
            StandardBox::Device4x2_1_8x1_1_2 => "4 x 2-1/8 x 1-1/2 device",
            StandardBox::Device4x2_1_8x1_7_8 => "4 x 2-1/8 x 1-7/8 device",
            StandardBox::Device4x2_1_8x2_1_8 => "4 x 2-1/8 x 2-1/8 device",
            StandardBox::Masonry3_3_4x2x2_1_2 => "3-3/4 x 2 x 2-1/2 masonry",
            StandardBox::Masonry3_3_4x2x3_1_2 => "3-3/4 x 2 x 3-1/2 masonry",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowances() {
        assert_eq!(volume_allowance_in3(WireGauge::Awg14), Some(2.0));
        assert_eq!(volume_allowance_in3(WireGauge::Awg12), Some(2.25));
        assert_eq!(volume_allowance_in3(WireGauge::Awg4), None);
    }

    #[test]
    fn test_box_volumes() {
        assert_eq!(StandardBox::Square4x1_1_2.volume_in3(), Some(21.0));
        assert_eq!(StandardBox::Device3x2x3_1_2.volume_in3(), Some(18.0));
        assert_eq!(StandardBox::Custom.volume_in3(), None);
    }

    #[test]
    fn test_keys_match_serde() {
        for b in StandardBox::ALL {
            let json = serde_json::to_string(&b).unwrap();
            assert_eq!(json, format!("\"{}\"", b.key()));
        }
    }
}
