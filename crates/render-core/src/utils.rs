use folio_types::PhysicalPageSize;

/// Convert layout Y coordinate to PDF Y coordinate (flip origin)
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    page_height - y
}

/// Page dimensions in PDF points.
pub fn page_size_pt(size: PhysicalPageSize) -> (f32, f32) {
    let pt = size.to_points();
    (pt.width as f32, pt.height as f32)
}

/// Scales `(width, height)` to fit inside `(max_w, max_h)`, keeping aspect ratio.
pub fn fit_within(width: f32, height: f32, max_w: f32, max_h: f32) -> (f32, f32) {
    if width <= 0.0 || height <= 0.0 {
        return (0.0, 0.0);
    }
    let scale = (max_w / width).min(max_h / height);
    (width * scale, height * scale)
}
