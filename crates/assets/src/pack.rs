/// Map `value` in `[0, 1]` to an unsigned integer in `[0, scale]`.
pub fn to_unorm(value: f32, scale: f32) -> u32 {
    (value.clamp(0.0, 1.0) * scale).round() as u32
}

/// Pack four `[0, 1]` floats into RGBA8, `src[0]` in the lowest-addressed byte.
pub fn pack_rgba8(src: [f32; 4]) -> u32 {
    let bytes = src.map(|v| to_unorm(v, 255.0) as u8);
    u32::from_ne_bytes(bytes)
}

/// Pack a signed unit vector (`[-1, 1]` per component) into RGBA8.
pub fn encode_normal_rgba8(x: f32, y: f32, z: f32, w: f32) -> u32 {
    pack_rgba8([x, y, z, w].map(|v| v * 0.5 + 0.5))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unorm_clamps() {
        assert_eq!(to_unorm(-1.0, 255.0), 0);
        assert_eq!(to_unorm(2.0, 255.0), 255);
        assert_eq!(to_unorm(0.5, 255.0), 128);
    }

    #[test]
    fn pack_byte_order() {
        let packed = pack_rgba8([1.0, 0.0, 0.0, 1.0]);
        assert_eq!(packed.to_ne_bytes(), [255, 0, 0, 255]);
    }

    #[test]
    fn encode_axis_normals() {
        assert_eq!(
            encode_normal_rgba8(1.0, 0.0, 0.0, 0.0).to_ne_bytes(),
            [255, 128, 128, 128]
        );
        assert_eq!(
            encode_normal_rgba8(0.0, -1.0, 0.0, 0.0).to_ne_bytes(),
            [128, 0, 128, 128]
        );
    }
}
