use image::{DynamicImage, GenericImageView};

/// Height that preserves the image's aspect ratio at the given width.
pub fn target_height(width: u32, image: &DynamicImage) -> u32 {
    scaled_height(width, image.dimensions())
}

/// Same aspect-ratio math over a bare dimension pair, for callers that
/// only probed the image header.
pub fn scaled_height(width: u32, (w, h): (u32, u32)) -> u32 {
    if w == 0 {
        return 0;
    }
    (h as f64 * (width as f64 / w as f64)).round() as u32
}

/// Scale the image to exactly `base_width` wide, preserving aspect
/// ratio. A `base_width` of 0 (or a computed height of 0) is a no-op,
/// not an error. Callers decide whether downsizing applies; this
/// function scales to whatever width it is asked for.
pub fn resize(image: DynamicImage, base_width: u32) -> DynamicImage {
    if base_width == 0 {
        return image;
    }
    let height = target_height(base_width, &image);
    if height == 0 {
        return image;
    }
    image.resize_exact(base_width, height, image::imageops::FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_height_preserves_ratio() {
        let img = DynamicImage::new_rgb8(2000, 1500);
        assert_eq!(target_height(800, &img), 600);

        let img = DynamicImage::new_rgb8(400, 300);
        assert_eq!(target_height(200, &img), 150);
    }

    #[test]
    fn test_target_height_rounds() {
        // 1000 * (333 / 999) = 333.33.. -> 333
        let img = DynamicImage::new_rgb8(999, 1000);
        assert_eq!(target_height(333, &img), 333);

        // 100 * (50 / 75) = 66.67 -> 67
        let img = DynamicImage::new_rgb8(75, 100);
        assert_eq!(target_height(50, &img), 67);
    }

    #[test]
    fn test_resize_scales_to_base_width() {
        let img = DynamicImage::new_rgb8(2000, 1500);
        let out = resize(img, 800);
        assert_eq!(out.dimensions(), (800, 600));
    }

    #[test]
    fn test_resize_zero_width_is_noop() {
        let img = DynamicImage::new_rgb8(2000, 1500);
        let out = resize(img, 0);
        assert_eq!(out.dimensions(), (2000, 1500));
    }

    #[test]
    fn test_resize_degenerate_height_is_noop() {
        // 1 px target width on an extreme panorama rounds to height 0.
        let img = DynamicImage::new_rgb8(10_000, 3);
        let out = resize(img, 1);
        assert_eq!(out.dimensions(), (10_000, 3));
    }

    #[test]
    fn test_resize_upscales_when_asked() {
        let img = DynamicImage::new_rgb8(400, 300);
        let out = resize(img, 800);
        assert_eq!(out.dimensions(), (800, 600));
    }
}
