//! Minimal Hilbert index example: map a point to an index and back.

use std::error::Error;

use hilbertspace::{HilbertPoint, hilbert_coordinates};

fn main() -> Result<(), Box<dyn Error>> {
    // 3D points with 4 bits per axis (a 16x16x16 cube)
    let mut points = HilbertPoint::transform(&[[15, 0, 3], [1, 2, 3], [0, 0, 1]], Some(4))?;
    HilbertPoint::sort_by_hilbert_index(&mut points);
    for p in &points {
        println!("{p}");
    }

    let first = &points[0];
    let back = hilbert_coordinates(first.hilbert_index(), 3, 4)?;
    println!("Coordinates for {}: {:?}", first.hilbert_index(), back.as_slice());

    assert_eq!(back.as_slice(), first.coordinates());

    Ok(())
}
