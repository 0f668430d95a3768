//! Display list word encoders
//!
//! Every display list entry is one 32-bit word: an opcode in the top
//! bits and bit-packed operands below it. These encoders are pure and
//! `const`; the same words go either directly into display list RAM
//! through [`Eve::dl_add`] or into the command ring through
//! [`Eve::cmd_dl`].
//!
//! Operand widths follow the programming guide; out-of-range values are
//! masked, not rejected, exactly as the chip itself ignores the excess
//! bits.
//!
//! [`Eve::dl_add`]: crate::Eve::dl_add
//! [`Eve::cmd_dl`]: crate::Eve::cmd_dl

/// Pack `value` into the bit range `left..=right` of a word
///
/// Bit numbers are inclusive and given left (high) to right (low), the
/// way the programming guide draws them.
const fn field(value: u32, left: u32, right: u32) -> u32 {
    (value & ((1 << (left - right + 1)) - 1)) << right
}

/// Graphics primitive for [`begin`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Primitive {
    Bitmaps = 1,
    Points = 2,
    Lines = 3,
    LineStrip = 4,
    EdgeStripR = 5,
    EdgeStripL = 6,
    EdgeStripA = 7,
    EdgeStripB = 8,
    Rects = 9,
}

/// Comparison function for [`alpha_func`] and [`stencil_func`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TestFunc {
    Never = 0,
    Less = 1,
    LessEqual = 2,
    Greater = 3,
    GreaterEqual = 4,
    Equal = 5,
    NotEqual = 6,
    Always = 7,
}

/// Blending factor for [`blend_func`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Blend {
    Zero = 0,
    One = 1,
    SrcAlpha = 2,
    DstAlpha = 3,
    OneMinusSrcAlpha = 4,
    OneMinusDstAlpha = 5,
}

/// Stencil action for [`stencil_op`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StencilOp {
    Zero = 0,
    Keep = 1,
    Replace = 2,
    Incr = 3,
    Decr = 4,
    Invert = 5,
}

/// Bitmap sampling filter for [`bitmap_size`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Filter {
    Nearest = 0,
    Bilinear = 1,
}

/// Bitmap wrap mode for [`bitmap_size`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Wrap {
    Border = 0,
    Repeat = 1,
}

/// Bitmap pixel format for [`bitmap_layout`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitmapFormat {
    Argb1555 = 0,
    L1 = 1,
    L4 = 2,
    L8 = 3,
    Rgb332 = 4,
    Argb2 = 5,
    Argb4 = 6,
    Rgb565 = 7,
    Text8x8 = 9,
    TextVga = 10,
    BarGraph = 11,
    Paletted565 = 14,
    Paletted4444 = 15,
    Paletted8 = 16,
    L2 = 17,
}

/// End the display list
pub const fn display() -> u32 {
    0x0000_0000
}

/// Set the address of the current bitmap's data
pub const fn bitmap_source(addr: u32) -> u32 {
    0x0100_0000 | field(addr, 21, 0)
}

/// Set the clear color from separate channel values
pub const fn clear_color_rgb(red: u8, green: u8, blue: u8) -> u32 {
    0x0200_0000 | field(red as u32, 23, 16) | field(green as u32, 15, 8) | field(blue as u32, 7, 0)
}

/// Set the clear color from a packed 24-bit RGB value
pub const fn clear_color(rgb: u32) -> u32 {
    0x0200_0000 | field(rgb, 23, 0)
}

/// Attach a tag value to following drawn pixels
pub const fn tag(value: u8) -> u32 {
    0x0300_0000 | field(value as u32, 7, 0)
}

/// Set the draw color from separate channel values
pub const fn color_rgb(red: u8, green: u8, blue: u8) -> u32 {
    0x0400_0000 | field(red as u32, 23, 16) | field(green as u32, 15, 8) | field(blue as u32, 7, 0)
}

/// Set the draw color from a packed 24-bit RGB value
pub const fn color(rgb: u32) -> u32 {
    0x0400_0000 | field(rgb, 23, 0)
}

/// Select the current bitmap handle
pub const fn bitmap_handle(handle: u8) -> u32 {
    0x0500_0000 | field(handle as u32, 4, 0)
}

/// Select the bitmap cell for VERTEX2F
pub const fn cell(cell: u8) -> u32 {
    0x0600_0000 | field(cell as u32, 6, 0)
}

/// Set the current bitmap's format, line stride and height
pub const fn bitmap_layout(format: BitmapFormat, stride: u32, height: u32) -> u32 {
    0x0700_0000 | field(format as u32, 23, 19) | field(stride, 18, 9) | field(height, 8, 0)
}

/// Set how the current bitmap is drawn on screen
pub const fn bitmap_size(filter: Filter, wrap_x: Wrap, wrap_y: Wrap, width: u16, height: u16) -> u32 {
    0x0800_0000
        | field(filter as u32, 20, 20)
        | field(wrap_x as u32, 19, 19)
        | field(wrap_y as u32, 18, 18)
        | field(width as u32, 17, 9)
        | field(height as u32, 8, 0)
}

/// Set the alpha test function
pub const fn alpha_func(func: TestFunc, reference: u8) -> u32 {
    0x0900_0000 | field(func as u32, 10, 8) | field(reference as u32, 7, 0)
}

/// Set function, reference and mask for stencil testing
pub const fn stencil_func(func: TestFunc, reference: u8, mask: u8) -> u32 {
    0x0A00_0000 | field(func as u32, 19, 16) | field(reference as u32, 15, 8) | field(mask as u32, 7, 0)
}

/// Set source and destination blending factors
pub const fn blend_func(src: Blend, dst: Blend) -> u32 {
    0x0B00_0000 | field(src as u32, 5, 3) | field(dst as u32, 2, 0)
}

/// Set the stencil actions for fail and pass
pub const fn stencil_op(fail: StencilOp, pass: StencilOp) -> u32 {
    0x0C00_0000 | field(fail as u32, 5, 3) | field(pass as u32, 2, 0)
}

/// Set the point radius in 1/16 pixel units
pub const fn point_size(size: u16) -> u32 {
    0x0D00_0000 | field(size as u32, 12, 0)
}

/// Set the line width in 1/16 pixel units
pub const fn line_width(width: u16) -> u32 {
    0x0E00_0000 | field(width as u32, 11, 0)
}

/// Set the clear value for the alpha channel
pub const fn clear_color_a(alpha: u8) -> u32 {
    0x0F00_0000 | field(alpha as u32, 7, 0)
}

/// Set the draw alpha
pub const fn color_a(alpha: u8) -> u32 {
    0x1000_0000 | field(alpha as u32, 7, 0)
}

/// Set the clear value for the stencil buffer
pub const fn clear_stencil(value: u8) -> u32 {
    0x1100_0000 | field(value as u32, 7, 0)
}

/// Set the clear value for the tag buffer
pub const fn clear_tag(value: u8) -> u32 {
    0x1200_0000 | field(value as u32, 7, 0)
}

/// Control writing of individual stencil bits
pub const fn stencil_mask(mask: u8) -> u32 {
    0x1300_0000 | field(mask as u32, 7, 0)
}

/// Enable or disable writing of the tag buffer
pub const fn tag_mask(enable: bool) -> u32 {
    0x1400_0000 | field(enable as u32, 0, 0)
}

/// Set the top-left corner of the scissor rectangle
pub const fn scissor_xy(x: u16, y: u16) -> u32 {
    0x1B00_0000 | field(x as u32, 21, 11) | field(y as u32, 10, 0)
}

/// Set the size of the scissor rectangle
pub const fn scissor_size(width: u16, height: u16) -> u32 {
    0x1C00_0000 | field(width as u32, 23, 12) | field(height as u32, 11, 0)
}

/// Call a subroutine at another display list location
pub const fn call(dest: u16) -> u32 {
    0x1D00_0000 | field(dest as u32, 15, 0)
}

/// Jump to another display list location
pub const fn jump(dest: u16) -> u32 {
    0x1E00_0000 | field(dest as u32, 15, 0)
}

/// Begin drawing a graphics primitive
pub const fn begin(primitive: Primitive) -> u32 {
    0x1F00_0000 | field(primitive as u32, 3, 0)
}

/// Enable or disable writing of each color channel
pub const fn color_mask(red: bool, green: bool, blue: bool, alpha: bool) -> u32 {
    0x2000_0000
        | field(red as u32, 3, 3)
        | field(green as u32, 2, 2)
        | field(blue as u32, 1, 1)
        | field(alpha as u32, 0, 0)
}

/// End the current graphics primitive
pub const fn end() -> u32 {
    0x2100_0000
}

/// Push the graphics context
pub const fn save_context() -> u32 {
    0x2200_0000
}

/// Pop the graphics context
pub const fn restore_context() -> u32 {
    0x2300_0000
}

/// Return from a display list subroutine
pub const fn return_call() -> u32 {
    0x2400_0000
}

/// Execute the display list word in a macro register
pub const fn dl_macro(slot: u8) -> u32 {
    0x2500_0000 | field(slot as u32, 0, 0)
}

/// Clear the selected buffers
pub const fn clear(color: bool, stencil: bool, tag: bool) -> u32 {
    0x2600_0000 | field(color as u32, 2, 2) | field(stencil as u32, 1, 1) | field(tag as u32, 0, 0)
}

/// Set the fractional bits used by VERTEX2F coordinates
pub const fn vertex_format(frac: u8) -> u32 {
    0x2700_0000 | field(frac as u32, 2, 0)
}

/// Upper bits of bitmap stride and height
pub const fn bitmap_layout_h(stride: u32, height: u32) -> u32 {
    0x2800_0000 | field(stride, 3, 2) | field(height, 1, 0)
}

/// Upper bits of bitmap on-screen dimensions
pub const fn bitmap_size_h(width: u16, height: u16) -> u32 {
    0x2900_0000 | field(width as u32, 3, 2) | field(height as u32, 1, 0)
}

/// Set the base address of the color palette
pub const fn palette_source(addr: u32) -> u32 {
    0x2A00_0000 | field(addr, 21, 0)
}

/// Set the vertex X translation in 1/16 pixel units
pub const fn vertex_translate_x(x: u32) -> u32 {
    0x2B00_0000 | field(x, 16, 0)
}

/// Set the vertex Y translation in 1/16 pixel units
pub const fn vertex_translate_y(y: u32) -> u32 {
    0x2C00_0000 | field(y, 16, 0)
}

/// No operation
pub const fn nop() -> u32 {
    0x2D00_0000
}

/// Place a vertex in VERTEX_FORMAT units
pub const fn vertex2f(x: i16, y: i16) -> u32 {
    0x4000_0000 | field(x as u32, 29, 15) | field(y as u32, 14, 0)
}

/// Place a vertex in pixel units with bitmap handle and cell
pub const fn vertex2ii(x: u16, y: u16, handle: u8, cell: u8) -> u32 {
    0x8000_0000
        | field(x as u32, 29, 21)
        | field(y as u32, 20, 12)
        | field(handle as u32, 11, 7)
        | field(cell as u32, 6, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_masks_and_shifts() {
        assert_eq!(field(0xFF, 10, 8), 0x700);
        assert_eq!(field(3, 1, 0), 3);
        assert_eq!(field(0, 23, 0), 0);
    }

    #[test]
    fn clear_packs_three_flags() {
        assert_eq!(clear(true, true, true), 0x2600_0007);
        assert_eq!(clear(true, false, false), 0x2600_0004);
        assert_eq!(clear(false, false, true), 0x2600_0001);
    }

    #[test]
    fn colors_pack_as_rgb24() {
        assert_eq!(clear_color_rgb(0x11, 0x22, 0x33), 0x0211_2233);
        assert_eq!(color_rgb(0xFF, 0x00, 0x80), 0x04FF_0080);
        assert_eq!(color(0x0012_3456), 0x0412_3456);
    }

    #[test]
    fn begin_encodes_primitive() {
        assert_eq!(begin(Primitive::Points), 0x1F00_0002);
        assert_eq!(begin(Primitive::Rects), 0x1F00_0009);
    }

    #[test]
    fn vertex2ii_packs_four_fields() {
        assert_eq!(vertex2ii(100, 200, 31, 0x41), 0x8C8C_8FC1);
    }

    #[test]
    fn vertex2f_masks_negative_coordinates() {
        // -1 in a 15-bit field is all ones, no sign extension spillover.
        assert_eq!(vertex2f(-1, -1), 0x4000_0000 | 0x3FFF_FFFF);
    }

    #[test]
    fn bitmap_layout_matches_guide_example() {
        let word = bitmap_layout(BitmapFormat::Rgb565, 128, 64);
        assert_eq!(word, 0x0700_0000 | (7 << 19) | (128 << 9) | 64);
    }
}
