use std::{fs::File, io::BufWriter, path::Path};

use anyhow::{Context, Result};
use image::{codecs::jpeg::JpegEncoder, ColorType};
use tracer::output::OutputImage;

fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
}

/// Encode `image` to `path`, the format being guessed from the extension.
/// `quality` is only used for JPEG.
pub fn save_image(image: &OutputImage, path: &Path, quality: u8) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("can't create directory {}", parent.display()))?;
    }

    if is_jpeg(path) {
        let file = File::create(path).with_context(|| format!("can't create {}", path.display()))?;
        let mut encoder = JpegEncoder::new_with_quality(BufWriter::new(file), quality);
        encoder
            .encode(image.data(), image.width(), image.height(), ColorType::Rgb8)
            .with_context(|| format!("can't encode {}", path.display()))?;
    } else {
        image::save_buffer(path, image.data(), image.width(), image.height(), ColorType::Rgb8)
            .with_context(|| format!("can't save {}", path.display()))?;
    }

    log::info!("Image saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tracer::output::OutputImage;

    use super::{is_jpeg, save_image};

    #[test]
    fn jpeg_extensions() {
        assert!(is_jpeg(Path::new("out.jpg")));
        assert!(is_jpeg(Path::new("dir/out.JPEG")));
        assert!(!is_jpeg(Path::new("out.png")));
        assert!(!is_jpeg(Path::new("out")));
    }

    #[test]
    fn writes_png_and_jpeg() {
        let dir = std::env::temp_dir().join(format!("tracer-cli-output-{}", std::process::id()));
        let image = OutputImage::new(4, 3);
        for name in ["a.png", "b.jpg"] {
            let path = dir.join(name);
            save_image(&image, &path, 80).unwrap();
            assert!(path.metadata().unwrap().len() > 0);
        }
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn unknown_extension_fails() {
        let dir = std::env::temp_dir();
        assert!(save_image(&OutputImage::new(2, 2), &dir.join("out.unknown-format"), 80).is_err());
    }
}
