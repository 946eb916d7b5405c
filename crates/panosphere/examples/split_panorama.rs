//! Split an equirectangular panorama into cube faces and compose them back.
//!
//! Usage: `cargo run --example split_panorama -- <panorama> [out_dir]`

use std::path::PathBuf;

use panosphere::core::init_with_level;
use panosphere::cubemap::{CubemapCodec, CubemapParams, FaceInterpolation};
use panosphere::io::{load_rgb, save_faces, save_rgb};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_with_level(log::LevelFilter::Info)?;

    let mut args = std::env::args().skip(1);
    let input = PathBuf::from(args.next().ok_or("usage: split_panorama <panorama> [out_dir]")?);
    let out_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("faces"));

    let pano = load_rgb(&input)?;
    let mut codec = CubemapCodec::new(CubemapParams {
        face_size: None,
        interpolation: FaceInterpolation::Bilinear,
    });
    let faces = codec.split(&pano.view())?;
    let written = save_faces(&faces, &out_dir, "pano")?;
    for (face, path) in &written {
        println!("{face:>6}: {}", path.display());
    }

    let back = codec.merge(&faces, pano.width, pano.height)?;
    let merged = out_dir.join("pano_merged.png");
    save_rgb(&merged, &back)?;
    println!("merged: {}", merged.display());
    Ok(())
}
