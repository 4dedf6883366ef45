//! PNG encoding of frames and exported page regions.

use crate::fonts::FontBook;
use crate::renderer::{RenderResult, RendererError};
use crate::scene::region_scene;
use crate::skia_impl::{new_pixmap, pixel_size, rasterize};
use inkboard_core::hit_test::RegionExport;
use peniko::Color;
use tiny_skia::Pixmap;

/// Encode a pixmap as an 8-bit RGBA PNG.
pub fn encode_png(pixmap: &Pixmap) -> RenderResult<Vec<u8>> {
    let rgba_data: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();

    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header().map_err(|e| {
            log::error!("Failed to write PNG header: {:?}", e);
            RendererError::Encode(e.to_string())
        })?;
        writer.write_image_data(&rgba_data).map_err(|e| {
            log::error!("Failed to write PNG data: {:?}", e);
            RendererError::Encode(e.to_string())
        })?;
    }
    Ok(png_data)
}

/// Rasterize an exported region on white at `scale` pixels per world unit.
pub fn render_region(region: &RegionExport, scale: f64, fonts: &FontBook) -> RenderResult<Pixmap> {
    let scene = region_scene(region, scale, Color::BLACK);
    let (width, height) = pixel_size(scene.size);
    let mut pixmap = new_pixmap(width, height)?;
    rasterize(&scene, fonts, &mut pixmap);
    Ok(pixmap)
}

/// Rasterize and encode an exported region.
pub fn export_region_png(region: &RegionExport, scale: f64, fonts: &FontBook) -> RenderResult<Vec<u8>> {
    let png_data = encode_png(&render_region(region, scale, fonts)?)?;
    log::info!(
        "Exported region {:.0}x{:.0} as {} PNG bytes",
        region.world_bounds.width,
        region.world_bounds.height,
        png_data.len()
    );
    Ok(png_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkboard_core::document::{Page, Stroke};
    use inkboard_core::geometry::Bounds;
    use inkboard_core::hit_test::extract_region;
    use inkboard_core::style::SerializableColor;
    use kurbo::Point;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn page_with_stroke() -> Page {
        let mut page = Page::new();
        page.strokes.push(Stroke::new(
            1,
            vec![Point::new(100.0, 100.0), Point::new(160.0, 100.0)],
            4.0,
            SerializableColor::black(),
        ));
        page
    }

    #[test]
    fn test_region_is_cropped_and_reorigined() {
        let page = page_with_stroke();
        let region = extract_region(&page, &Bounds::new(100.0, 98.0, 60.0, 4.0), 20.0);
        let pixmap = render_region(&region, 1.0, &FontBook::new()).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (100, 44));

        // The stroke now runs along y = 22 in the local frame.
        let ink = pixmap.pixel(50, 22).unwrap().demultiply();
        assert_eq!((ink.red(), ink.alpha()), (0, 255));
        let paper = pixmap.pixel(50, 2).unwrap().demultiply();
        assert_eq!((paper.red(), paper.alpha()), (255, 255));
    }

    #[test]
    fn test_export_png_signature_and_size() {
        let page = page_with_stroke();
        let region = extract_region(&page, &Bounds::new(100.0, 98.0, 60.0, 4.0), 20.0);
        let png_data = export_region_png(&region, 2.0, &FontBook::new()).unwrap();
        assert_eq!(png_data[..8], PNG_SIGNATURE);

        let decoder = png::Decoder::new(png_data.as_slice());
        let reader = decoder.read_info().unwrap();
        assert_eq!(reader.info().width, 200);
        assert_eq!(reader.info().height, 88);
    }
}
