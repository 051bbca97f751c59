//! Test fixtures: search payloads, generated images and multipart bodies.

use image::{ImageFormat, Rgba, RgbaImage};
use serde_json::{json, Value};
use std::io::Cursor;

pub const BOUNDARY: &str = "backdrop-test-boundary";

/// One search result entry
pub fn movie(title: &str, poster: Option<&str>, backdrop: Option<&str>) -> Value {
    json!({
        "title": title,
        "poster_path": poster,
        "backdrop_path": backdrop,
    })
}

/// A search response body wrapping the given entries
pub fn search_response(results: Vec<Value>) -> Value {
    json!({
        "page": 1,
        "results": results,
        "total_pages": 1,
        "total_results": 0,
    })
}

/// `count` movies that all have a backdrop
pub fn many_movies(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            movie(
                &format!("Movie {i}"),
                Some(&format!("/poster{i}.jpg")),
                Some(&format!("/backdrop{i}.jpg")),
            )
        })
        .collect()
}

/// PNG of a single color
pub fn solid_png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    encode_png(&RgbaImage::from_pixel(
        width,
        height,
        Rgba([rgb[0], rgb[1], rgb[2], 255]),
    ))
}

/// PNG split into a saturated blue and a dark red half
pub fn two_tone_png() -> Vec<u8> {
    encode_png(&RgbaImage::from_fn(64, 64, |x, _| {
        if x < 32 {
            Rgba([20, 40, 200, 255])
        } else {
            Rgba([110, 15, 10, 255])
        }
    }))
}

pub fn encode_png(img: &RgbaImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .expect("Failed to encode PNG");
    out.into_inner()
}

/// Build a multipart/form-data body with one file field.
/// Returns `(content_type_header, body)`.
pub fn multipart_file(
    field: &str,
    filename: &str,
    content_type: &str,
    bytes: &[u8],
) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}
