#[derive(Clone)]
pub struct PreviewImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

/// Decodes `bytes` and scales the result to fit a `max_px` square.
pub fn decode_thumbnail(bytes: &[u8], max_px: u32) -> Result<PreviewImage, String> {
    let dynamic = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let resized = if dynamic.width().max(dynamic.height()) > max_px {
        dynamic.thumbnail(max_px, max_px).to_rgba8()
    } else {
        dynamic.to_rgba8()
    };
    let width = resized.width() as usize;
    let height = resized.height() as usize;
    Ok(PreviewImage {
        width,
        height,
        rgba: resized.into_raw(),
    })
}
