use std::collections::{BTreeMap, HashMap};

use panosphere_core::{Face, ProjectionError, RgbImage};

/// Six square faces of equal size, indexed by [`Face`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CubeFaces {
    size: usize,
    faces: [RgbImage; 6],
}

fn check_face(face: Face, img: &RgbImage, size: usize) -> Result<(), ProjectionError> {
    let context = format!("cube face `{face}`");
    img.view().validate(&context)?;
    if img.width != size || img.height != size {
        return Err(ProjectionError::mismatch(
            context,
            img.width,
            img.height,
            format!("{size}x{size}"),
        ));
    }
    Ok(())
}

impl CubeFaces {
    /// Build from faces given in [`Face::ALL`] order.
    ///
    /// Every face must be square and share the size of the front face.
    pub fn new(faces: [RgbImage; 6]) -> Result<Self, ProjectionError> {
        let size = faces[Face::Front.index()].width;
        for face in Face::ALL {
            check_face(face, &faces[face.index()], size)?;
        }
        Ok(Self { size, faces })
    }

    /// Build from a face-keyed map; all six faces must be present.
    pub fn from_map(mut map: HashMap<Face, RgbImage>) -> Result<Self, ProjectionError> {
        let mut take = |face: Face| {
            map.remove(&face)
                .ok_or_else(|| ProjectionError::empty(format!("missing cube face `{face}`")))
        };
        let faces = [
            take(Face::Front)?,
            take(Face::Back)?,
            take(Face::Left)?,
            take(Face::Right)?,
            take(Face::Top)?,
            take(Face::Bottom)?,
        ];
        Self::new(faces)
    }

    /// Build from `(name, image)` pairs such as those read back from disk.
    ///
    /// Unknown names fail with [`ProjectionError::InvalidFace`].
    pub fn from_named<S, I>(named: I) -> Result<Self, ProjectionError>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (S, RgbImage)>,
    {
        let mut map = HashMap::new();
        for (name, img) in named {
            let face: Face = name.as_ref().parse()?;
            map.insert(face, img);
        }
        Self::from_map(map)
    }

    /// Side length in pixels shared by all faces.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, face: Face) -> &RgbImage {
        &self.faces[face.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Face, &RgbImage)> {
        Face::ALL.into_iter().zip(self.faces.iter())
    }

    pub fn into_map(self) -> BTreeMap<Face, RgbImage> {
        Face::ALL.into_iter().zip(self.faces).collect()
    }
}
