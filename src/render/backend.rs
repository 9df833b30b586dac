use crate::compose::card::Card;
use crate::foundation::error::PoemcardResult;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Rendered card pixels.
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major premultiplied RGBA8 bytes.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Solid frame filled with one premultiplied pixel value.
    pub fn filled(width: u32, height: u32, premul_rgba: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity((width as usize) * (height as usize) * 4);
        for _ in 0..(width as usize) * (height as usize) {
            data.extend_from_slice(&premul_rgba);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Straight-alpha copy of the pixel data, as PNG encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        unpremultiply_in_place(&mut out);
        out
    }
}

/// Turns a composed [`Card`] into pixels at the card's nominal size.
///
/// Output dimensions never depend on any preview scale; a renderer always produces
/// `card_width x card_height` pixels.
pub trait CardRenderer {
    /// Rasterize one card. Failures are reported as rasterization errors.
    fn render_card(&mut self, card: &Card) -> PoemcardResult<FrameRGBA>;
}

impl<R: CardRenderer + ?Sized> CardRenderer for Box<R> {
    fn render_card(&mut self, card: &Card) -> PoemcardResult<FrameRGBA> {
        (**self).render_card(card)
    }
}

fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
