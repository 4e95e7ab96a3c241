//! End-to-end pass over the public surface: decode a plain-text image,
//! draw on it, transform it, and encode it back.

use pnm_raster::pnm::{self, Image};
use pnm_raster::{Point, RasterizerShapes, RendererPrimitives, Rgb8};

fn blank_pixmap_text(width: u32, height: u32) -> String {
    let mut text = format!("P3\n{} {}\n255\n", width, height);
    for _ in 0..height {
        text.push_str(&"0 0 0 ".repeat(width as usize));
        text.push('\n');
    }
    text
}

#[test]
fn decode_draw_encode() {
    let img = pnm::decode(&blank_pixmap_text(8, 8)).unwrap();
    let mut canvas = match img {
        Image::Pixmap(c) => c,
        other => panic!("expected a pixmap, got {other:?}"),
    };

    let red = Rgb8::new(255, 0, 0);
    let blue = Rgb8::new(0, 0, 255);

    RendererPrimitives::new(&mut canvas).line(Point::new(0, 0), Point::new(7, 0), red);
    RasterizerShapes::new(&mut canvas)
        .solid_polygon(
            &[
                Point::new(2, 2),
                Point::new(5, 2),
                Point::new(5, 5),
                Point::new(2, 5),
            ],
            blue,
        )
        .unwrap();

    assert_eq!(canvas.at(3, 0).unwrap(), red);
    assert_eq!(canvas.at(3, 3).unwrap(), blue);
    assert_eq!(canvas.at(6, 6).unwrap(), Rgb8::default());

    let text = pnm::encode_pixmap(&canvas);
    let reparsed = match pnm::decode(&text).unwrap() {
        Image::Pixmap(c) => c,
        other => panic!("expected a pixmap, got {other:?}"),
    };
    assert_eq!(reparsed, canvas);
}

#[test]
fn transforms_survive_the_codec() {
    let mut canvas = match pnm::decode(&blank_pixmap_text(5, 3)).unwrap() {
        Image::Pixmap(c) => c,
        other => panic!("expected a pixmap, got {other:?}"),
    };
    canvas.set(0, 0, Rgb8::new(9, 9, 9)).unwrap();

    let original = canvas.clone();
    canvas.flip_horizontal();
    assert_eq!(canvas.at(4, 0).unwrap(), Rgb8::new(9, 9, 9));
    canvas.flip_horizontal();
    assert_eq!(canvas, original);

    canvas.rotate_90_clockwise();
    assert_eq!(canvas.size(), (3, 5));
    // (0, 0) moves to (height - 1, 0) = (2, 0)
    assert_eq!(canvas.at(2, 0).unwrap(), Rgb8::new(9, 9, 9));

    let round_trip = pnm::decode(&pnm::encode_pixmap(&canvas)).unwrap();
    assert_eq!(round_trip, Image::Pixmap(canvas));
}

#[test]
fn graymap_threshold_to_bitmap_via_codec() {
    let gray = match pnm::decode("P2\n2 2\n10\n5 6\n0 10\n").unwrap() {
        Image::Graymap(c) => c,
        other => panic!("expected a graymap, got {other:?}"),
    };
    let bitmap = gray.to_bitmap();
    assert_eq!(
        pnm::encode_bitmap(&bitmap),
        "P1\n2 2\n0 1 \n0 1 \n"
    );
}
