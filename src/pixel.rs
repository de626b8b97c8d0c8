/// Bit depths the codec reads and writes.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// 1 bit per pixel, 2-entry palette.
    One,
    /// 4 bits per pixel, 16-entry palette.
    Four,
    /// 8 bits per pixel, 256-entry palette.
    Eight,
    /// 24 bits per pixel, BGR byte order, no palette.
    TwentyFour,
}

impl BitDepth {
    /// Map a raw `bits_per_pixel` header value to a supported depth.
    pub fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            1 => Some(Self::One),
            4 => Some(Self::Four),
            8 => Some(Self::Eight),
            24 => Some(Self::TwentyFour),
            _ => None,
        }
    }

    /// Raw `bits_per_pixel` header value.
    pub fn bits(self) -> u16 {
        match self {
            Self::One => 1,
            Self::Four => 4,
            Self::Eight => 8,
            Self::TwentyFour => 24,
        }
    }

    /// Whether pixels are palette indices.
    pub fn is_indexed(self) -> bool {
        !matches!(self, Self::TwentyFour)
    }
}

impl core::fmt::Display for BitDepth {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}
