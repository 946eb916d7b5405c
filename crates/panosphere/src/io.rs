//! Image file helpers built on the `image` crate.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use panosphere_core::{Face, RgbImage, RgbImageView};
use panosphere_cubemap::CubeFaces;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::PanosphereIoError;

/// Extensions [`find_image_paths`] accepts, compared case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "webp", "bmp", "tif", "tiff"];

/// Borrow an `image::RgbImage` as a core view.
pub fn rgb_view(img: &::image::RgbImage) -> RgbImageView<'_> {
    RgbImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Convert an `image::RgbImage` into an owned core buffer.
pub fn from_image_rgb(img: ::image::RgbImage) -> RgbImage {
    let (width, height) = (img.width() as usize, img.height() as usize);
    RgbImage {
        width,
        height,
        data: img.into_raw(),
    }
}

/// Decode any supported format to 8-bit RGB.
pub fn load_rgb(path: impl AsRef<Path>) -> Result<RgbImage, PanosphereIoError> {
    let path = path.as_ref();
    let img = ::image::open(path)?.to_rgb8();
    log::debug!(
        "loaded {} ({}x{})",
        path.display(),
        img.width(),
        img.height()
    );
    Ok(from_image_rgb(img))
}

/// Encode `img`, picking the format from the path's extension.
pub fn save_rgb(path: impl AsRef<Path>, img: &RgbImage) -> Result<(), PanosphereIoError> {
    img.view().validate("image to save")?;
    let too_large = || PanosphereIoError::TooLarge {
        width: img.width,
        height: img.height,
    };
    let w = u32::try_from(img.width).map_err(|_| too_large())?;
    let h = u32::try_from(img.height).map_err(|_| too_large())?;
    ::image::save_buffer(path.as_ref(), &img.data, w, h, ::image::ColorType::Rgb8)?;
    log::debug!("saved {}", path.as_ref().display());
    Ok(())
}

/// `<base>_<face>.jpg`
pub fn face_file_name(base: &str, face: Face) -> String {
    format!("{base}_{face}.jpg")
}

/// Write all six faces into `dir` (created if missing).
#[cfg_attr(feature = "tracing", instrument(level = "info", skip(faces, dir)))]
pub fn save_faces(
    faces: &CubeFaces,
    dir: impl AsRef<Path>,
    base: &str,
) -> Result<BTreeMap<Face, PathBuf>, PanosphereIoError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let mut written = BTreeMap::new();
    for (face, img) in faces.iter() {
        let path = dir.join(face_file_name(base, face));
        save_rgb(&path, img)?;
        written.insert(face, path);
    }
    log::info!(
        "wrote six {}px faces to {}",
        faces.size(),
        dir.display()
    );
    Ok(written)
}

/// Read the six `<base>_<face>.jpg` files from `dir`.
pub fn load_faces(dir: impl AsRef<Path>, base: &str) -> Result<CubeFaces, PanosphereIoError> {
    let dir = dir.as_ref();
    let mut named = Vec::with_capacity(Face::ALL.len());
    for face in Face::ALL {
        named.push((face.name(), load_rgb(dir.join(face_file_name(base, face)))?));
    }
    Ok(CubeFaces::from_named(named)?)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.iter().any(|x| x.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// Supported image files directly inside `dir`, sorted by name.
pub fn find_image_paths(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, PanosphereIoError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_image_extension(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// First run of ASCII digits in the file name.
fn embedded_number(path: &Path) -> Option<u64> {
    let name = path.file_name()?.to_str()?;
    let start = name.find(|c: char| c.is_ascii_digit())?;
    let digits: String = name[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Order captures by the first number in their file name (`IMG_2` before
/// `IMG_10`). Names without a number come first; ties fall back to the name.
pub fn sort_by_embedded_number(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| {
        embedded_number(a)
            .cmp(&embedded_number(b))
            .then_with(|| a.file_name().cmp(&b.file_name()))
    });
}
