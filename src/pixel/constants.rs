/// Read-only arithmetic constants shared by every kernel.
///
/// There is exactly one set in a process; it is a `const` so kernels fold it
/// and nothing has to initialize or synchronize it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Constants {
    /// Rounding bias added before the `0x0101` multiply.
    pub bias: u16,
    pub channel_max: u16,
    /// Multiplier whose high 16 bits complete the divide by 255.
    pub unit: u16,
    pub alpha_mask: u32,
    pub red_565: u32,
    pub green_565: u32,
    pub blue_565: u32,
    /// Fractional bits used for bilinear weights.
    pub bilinear_bits: u32,
}

impl Constants {
    pub const STANDARD: Constants = Constants {
        bias: 0x0080,
        channel_max: 0x00ff,
        unit: 0x0101,
        alpha_mask: 0xff00_0000,
        red_565: 0xf800,
        green_565: 0x07e0,
        blue_565: 0x001f,
        bilinear_bits: 7,
    };

    /// Sum of the two bilinear weights along one axis.
    pub const fn bilinear_range(&self) -> u32 {
        1 << self.bilinear_bits
    }
}

impl Default for Constants {
    fn default() -> Self {
        Self::STANDARD
    }
}

pub(crate) const K: Constants = Constants::STANDARD;
