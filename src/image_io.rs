use std::io::{self, Write};

/// Writes an interleaved 8-bit RGB buffer as a binary (P6) PPM file.
pub fn write_ppm(path: &str, width: u32, height: u32, rgb8: &[u8]) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write!(file, "P6\n{width} {height}\n255\n")?;
    file.write_all(rgb8)?;
    file.flush()
}

/// Drops the alpha byte from an interleaved RGBA buffer (as produced by
/// `Engine::read_ldr`), yielding the RGB triples the PPM P6 format expects.
pub fn rgba_to_rgb(rgba8: &[u8]) -> Vec<u8> {
    rgba8
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect()
}

/// Writes an interleaved linear-radiance float buffer as a minimal raw
/// binary dump: a `width`/`height` header followed by little-endian `f32`
/// triples, row-major top to bottom. There is no standard HDR container in
/// scope here (EXR/Radiance encoding is explicitly out of scope) — this is
/// just enough structure for a reader to reinterpret the bytes.
pub fn write_hdr(path: &str, width: u32, height: u32, rgb_f32: &[f32]) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    file.write_all(&width.to_le_bytes())?;
    file.write_all(&height.to_le_bytes())?;
    for v in rgb_f32 {
        file.write_all(&v.to_le_bytes())?;
    }
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ppm_round_trips_header_and_pixel_bytes() {
        let dir = std::env::temp_dir();
        let path = dir.join("photon_rs_test_output.ppm");
        let rgb = vec![255u8, 0, 0, 0, 255, 0, 0, 0, 255, 10, 10, 10];
        write_ppm(path.to_str().unwrap(), 2, 2, &rgb).expect("write should succeed");
        let contents = std::fs::read(&path).expect("file should exist");
        let header = b"P6\n2 2\n255\n";
        assert_eq!(&contents[..header.len()], header);
        assert_eq!(&contents[header.len()..], &rgb[..]);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn rgba_to_rgb_drops_every_fourth_byte() {
        let rgba = vec![1u8, 2, 3, 255, 4, 5, 6, 255];
        assert_eq!(rgba_to_rgb(&rgba), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn hdr_dump_preserves_float_values() {
        let dir = std::env::temp_dir();
        let path = dir.join("photon_rs_test_output.hdr-raw");
        let values = vec![1.5f32, 2.25, -0.0, 3.0];
        write_hdr(path.to_str().unwrap(), 2, 1, &values).expect("write should succeed");
        let contents = std::fs::read(&path).expect("file should exist");
        assert_eq!(u32::from_le_bytes(contents[0..4].try_into().unwrap()), 2);
        assert_eq!(u32::from_le_bytes(contents[4..8].try_into().unwrap()), 1);
        let first = f32::from_le_bytes(contents[8..12].try_into().unwrap());
        assert_eq!(first, 1.5);
        let _ = std::fs::remove_file(path);
    }
}
