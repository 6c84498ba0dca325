//! Bit-field descriptors for 8-bit registers

/// A contiguous bit field inside an 8-bit register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    /// Position of the least significant bit
    pub offset: u8,
    /// Number of bits
    pub width: u8,
}

impl Field {
    /// Describe a field of `width` bits starting at `offset`
    pub const fn new(offset: u8, width: u8) -> Self {
        assert!(width >= 1 && offset + width <= 8, "field does not fit in 8 bits");
        Self { offset, width }
    }

    /// Single-bit field
    pub const fn bit(offset: u8) -> Self {
        Self::new(offset, 1)
    }

    /// Mask of the field bits in register position
    pub const fn mask(self) -> u8 {
        (((1u16 << self.width) - 1) << self.offset) as u8
    }

    /// Read the field value out of a register value
    pub const fn extract(self, reg: u8) -> u8 {
        (reg & self.mask()) >> self.offset
    }

    /// Replace the field in `reg` with `value`, keeping all other bits
    pub const fn insert(self, reg: u8, value: u8) -> u8 {
        (reg & !self.mask()) | ((value << self.offset) & self.mask())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks() {
        assert_eq!(Field::new(0, 2).mask(), 0b0000_0011);
        assert_eq!(Field::new(4, 2).mask(), 0b0011_0000);
        assert_eq!(Field::new(6, 2).mask(), 0b1100_0000);
        assert_eq!(Field::new(0, 8).mask(), 0xFF);
        assert_eq!(Field::bit(7).mask(), 0x80);
    }

    #[test]
    fn test_extract() {
        let usart3 = Field::new(6, 2);
        assert_eq!(usart3.extract(0b1100_0000), 3);
        assert_eq!(usart3.extract(0b0111_1111), 1);
    }

    #[test]
    fn test_insert_keeps_other_bits() {
        let twi = Field::new(4, 2);
        assert_eq!(twi.insert(0b1100_1111, 0b01), 0b1101_1111);
        assert_eq!(twi.insert(0xFF, 0), 0b1100_1111);
        // Values wider than the field are truncated
        assert_eq!(twi.insert(0, 0xFF), 0b0011_0000);
    }

    #[test]
    #[should_panic]
    fn test_field_out_of_range() {
        let _ = Field::new(7, 2);
    }

    proptest::proptest! {
        #[test]
        fn test_insert_then_extract(offset in 0u8..8, width in 1u8..=8, reg: u8, value: u8) {
            proptest::prop_assume!(offset + width <= 8);
            let field = Field::new(offset, width);
            let updated = field.insert(reg, value);
            proptest::prop_assert_eq!(field.extract(updated), value & (field.mask() >> offset));
            proptest::prop_assert_eq!(updated & !field.mask(), reg & !field.mask());
        }
    }
}
