use std::collections::HashMap;
use std::sync::Arc;

use panosphere_core::sphere::{angles_from_direction, equirect_pixel_from_angles, face_plane_coord};
use panosphere_core::Face;

/// Dense per-pixel source coordinates for one cube face.
///
/// Entry `j * size + i` holds the equirectangular `(u, v)` sampled by face
/// pixel `(i, j)`.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceSamplingMap {
    pub face: Face,
    pub size: usize,
    pub coords: Vec<[f32; 2]>,
}

impl FaceSamplingMap {
    /// Build the map for `face` at `size x size` against a `width x height`
    /// equirectangular source.
    pub fn build(face: Face, size: usize, width: usize, height: usize) -> Self {
        let basis = face.basis();
        let mut coords = Vec::with_capacity(size * size);
        for j in 0..size {
            let b = face_plane_coord(j, size);
            for i in 0..size {
                let a = face_plane_coord(i, size);
                let ll = angles_from_direction(basis.direction(a, b));
                let p = equirect_pixel_from_angles(ll.lon, ll.lat, width, height);
                let mut u = p.x as f32;
                if u >= width as f32 {
                    // narrowing to f32 can round up onto the seam
                    u -= width as f32;
                }
                coords.push([u, p.y as f32]);
            }
        }
        Self { face, size, coords }
    }

    #[inline]
    pub fn row(&self, j: usize) -> &[[f32; 2]] {
        &self.coords[j * self.size..(j + 1) * self.size]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct MapKey {
    face: Face,
    size: usize,
    width: usize,
    height: usize,
}

/// Cache of sampling maps keyed by `(face, size, width, height)`.
///
/// Useful when splitting many panoramas of the same resolution.
#[derive(Debug, Default)]
pub struct SamplingMapCache {
    maps: HashMap<MapKey, Arc<FaceSamplingMap>>,
}

impl SamplingMapCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(
        &mut self,
        face: Face,
        size: usize,
        width: usize,
        height: usize,
    ) -> Arc<FaceSamplingMap> {
        let key = MapKey {
            face,
            size,
            width,
            height,
        };
        self.maps
            .entry(key)
            .or_insert_with(|| {
                log::debug!("building sampling map for {face} at {size}px from {width}x{height}");
                Arc::new(FaceSamplingMap::build(face, size, width, height))
            })
            .clone()
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    pub fn clear(&mut self) {
        self.maps.clear();
    }
}
