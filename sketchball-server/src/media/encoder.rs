use super::Frame;
use super::FrameEncoder;
use sketchball_base::anyhow::Result;

/// PNG encoder for the outgoing stream, one still per frame packet.
#[derive(Default)]
pub struct PngFrameEncoder;

impl FrameEncoder for PngFrameEncoder {
    fn encode(&mut self, frame: &Frame) -> Result<Vec<u8>> {
        let mut output = Vec::new();

        let mut encoder = png::Encoder::new(&mut output, frame.width, frame.height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&frame.data)?;
        writer.finish()?;

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_frame_is_a_png() {
        let mut encoder = PngFrameEncoder;
        let data = encoder.encode(&Frame::new(8, 8)).unwrap();

        assert_eq!(&data[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }
}
