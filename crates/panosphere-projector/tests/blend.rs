use panosphere_core::{Face, Rgb, RgbImage};
use panosphere_cubemap::equirect_to_faces;
use panosphere_projector::{
    project_panorama, ring_orientations, OrientedImage, Orientation, PanoramaProjector,
    ProjectorParams,
};

const RED: Rgb = [200, 0, 0];
const BLUE: Rgb = [0, 0, 200];

fn two_shot_params() -> ProjectorParams {
    ProjectorParams {
        h_fov_deg: 60.0,
        v_fov_deg: 40.0,
        output_width: 400,
        output_height: 200,
        feather_width: 50,
        post_filter: None,
    }
}

fn two_shots() -> RgbImage {
    let a = RgbImage::filled(200, 150, RED);
    let b = RgbImage::filled(200, 150, BLUE);
    let images = [
        OrientedImage::new(a.view(), Orientation::new(0.0, 0.0)),
        OrientedImage::new(b.view(), Orientation::new(18.0, 0.0)),
    ];
    project_panorama(&images, &two_shot_params()).expect("projection")
}

#[test]
fn overlap_is_blended_not_cut() {
    let pano = two_shots();
    // canvas column 210 is 9 degrees right of centre: inside both captures
    // at full weight
    let mid = pano.pixel(210, 100);
    assert!((60..=140).contains(&mid[0]), "red {mid:?}");
    assert!((60..=140).contains(&mid[2]), "blue {mid:?}");

    // closer to the left capture's centre, the right one only contributes
    // through its feathered edge
    let left = pano.pixel(190, 100);
    assert!(left[0] > left[2] && left[2] > 0, "{left:?}");
    let right = pano.pixel(230, 100);
    assert!(right[2] > right[0] && right[0] > 0, "{right:?}");
}

#[test]
fn single_coverage_keeps_source_colour() {
    let pano = two_shots();
    // 22.5 degrees left of centre only the first capture reaches
    assert_eq!(pano.pixel(175, 100), RED);
    assert_eq!(pano.pixel(245, 100)[0], 0);
}

#[test]
fn uncovered_canvas_is_black() {
    let pano = two_shots();
    assert_eq!(pano.pixel(10, 10), [0, 0, 0]);
    assert_eq!(pano.pixel(200, 20), [0, 0, 0]);
    assert_eq!(pano.pixel(399, 199), [0, 0, 0]);
}

#[test]
fn vertical_orientation_is_preserved() {
    // top half red, bottom half blue
    let img = RgbImage::from_fn(120, 80, |_, y| if y < 40 { RED } else { BLUE });
    let params = ProjectorParams {
        output_width: 360,
        output_height: 180,
        feather_width: 0,
        ..ProjectorParams::default()
    };
    let level = project_panorama(
        &[OrientedImage::new(img.view(), Orientation::new(0.0, 0.0))],
        &params,
    )
    .unwrap();
    assert_eq!(level.pixel(180, 80), RED);
    assert_eq!(level.pixel(180, 100), BLUE);

    // looking up moves the capture towards the top of the canvas
    let up = project_panorama(
        &[OrientedImage::new(img.view(), Orientation::new(0.0, 30.0))],
        &params,
    )
    .unwrap();
    assert_eq!(up.pixel(180, 55), RED);
    assert_eq!(up.pixel(180, 75), BLUE);
    assert_eq!(up.pixel(180, 100), [0, 0, 0]);
}

#[test]
fn projected_capture_appears_on_front_face() {
    // under one canvas pixel per source pixel so the footprint has no gaps
    let img = RgbImage::filled(240, 240, [30, 160, 90]);
    let params = ProjectorParams {
        h_fov_deg: 100.0,
        v_fov_deg: 100.0,
        output_width: 720,
        output_height: 360,
        feather_width: 10,
        post_filter: None,
    };
    let pano = project_panorama(
        &[OrientedImage::new(img.view(), Orientation::default())],
        &params,
    )
    .unwrap();
    let faces = equirect_to_faces(&pano.view(), Some(64)).unwrap();
    let front = faces.get(Face::Front);
    assert_eq!(front.pixel(32, 32), [30, 160, 90]);
    assert_eq!(faces.get(Face::Back).pixel(32, 32), [0, 0, 0]);
}

#[test]
fn ring_covers_the_horizon() {
    let img = RgbImage::filled(120, 80, [100, 100, 100]);
    let ring = ring_orientations(20, 18.0, 0.0);
    let images: Vec<_> = ring
        .iter()
        .map(|&o| OrientedImage::new(img.view(), o))
        .collect();
    let projector = PanoramaProjector::new(ProjectorParams {
        output_width: 360,
        output_height: 180,
        feather_width: 10,
        ..ProjectorParams::default()
    });
    let acc = projector.accumulate_all(&images).unwrap();
    for x in 0..360 {
        assert!(acc.weight_at(x, 90) > 0.0, "column {x} uncovered");
    }
    let pano = projector.project(&images).unwrap();
    assert!((0..360).all(|x| pano.pixel(x, 90) == [100, 100, 100]));
}
