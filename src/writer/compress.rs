//! LZ4 block compression of encoded payloads.
//!
//! The service expects a bare LZ4 block with no frame or checksum; the
//! uncompressed size travels separately in `x-log-bodyrawsize`.

use lz4_flex::block::{CompressError, compress_into, get_maximum_output_size};

/// Literal lengths at or above this value spill into continuation bytes.
const RUN_MASK: usize = 0x0F;

/// Worst-case size of a compressed block for `len` input bytes.
pub fn compress_bound(len: usize) -> usize {
    len + len / 255 + 16
}

/// Compress `data` into a single LZ4 block.
///
/// When the block compressor produces no output the payload is emitted as one
/// literal run instead (see [`copy_incompressible`]).
///
/// # Errors
///
/// Returns [`CompressError`] when the block compressor fails. The literal-run
/// fallback never fails.
pub fn compress(data: &[u8]) -> Result<Vec<u8>, CompressError> {
    let mut out = vec![0u8; get_maximum_output_size(data.len()).max(compress_bound(data.len()))];
    let mut n = compress_into(data, &mut out)?;
    if n == 0 {
        n = copy_incompressible(data, &mut out);
    }
    out.truncate(n);
    Ok(out)
}

/// Write `src` to `dst` as a literal-only LZ4 sequence and return the number
/// of bytes written.
///
/// The token's high nibble carries the run length when it is below 15;
/// otherwise it holds 15 and the remainder follows as `0xFF` bytes plus a final
/// byte. If `dst` runs out the bytes written so far are returned.
pub(crate) fn copy_incompressible(src: &[u8], dst: &mut [u8]) -> usize {
    let Some(token) = dst.first_mut() else {
        return 0;
    };
    let mut di = 1;
    if src.len() < RUN_MASK {
        // Guarded above: fits in the high nibble.
        *token = (src.len() as u8) << 4;
    } else {
        *token = (RUN_MASK as u8) << 4;
        let mut remaining = src.len() - RUN_MASK;
        while remaining >= 0xFF {
            if di == dst.len() {
                return di;
            }
            dst[di] = 0xFF;
            di += 1;
            remaining -= 0xFF;
        }
        if di == dst.len() {
            return di;
        }
        dst[di] = remaining as u8;
        di += 1;
    }
    let end = di + src.len();
    if end > dst.len() {
        return di;
    }
    dst[di..end].copy_from_slice(src);
    end
}

#[cfg(test)]
mod tests {
    use super::*;
    use lz4_flex::block::decompress;
    use rstest::rstest;

    fn literal_run(len: usize) -> (Vec<u8>, Vec<u8>) {
        let src: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
        let mut dst = vec![0u8; compress_bound(len)];
        let n = copy_incompressible(&src, &mut dst);
        dst.truncate(n);
        (src, dst)
    }

    #[rstest]
    #[case(0, &[0x00])]
    #[case(5, &[0x50])]
    #[case(14, &[0xE0])]
    #[case(15, &[0xF0, 0x00])]
    #[case(269, &[0xF0, 0xFE])]
    #[case(270, &[0xF0, 0xFF, 0x00])]
    #[case(600, &[0xF0, 0xFF, 0xFF, 0x4B])]
    fn literal_run_header(#[case] len: usize, #[case] header: &[u8]) {
        let (src, dst) = literal_run(len);
        assert_eq!(&dst[..header.len()], header);
        assert_eq!(&dst[header.len()..], src.as_slice());
    }

    #[rstest]
    #[case(0)]
    #[case(14)]
    #[case(15)]
    #[case(1000)]
    fn literal_run_is_a_valid_block(#[case] len: usize) {
        let (src, dst) = literal_run(len);
        let restored = decompress(&dst, len).expect("decompress");
        assert_eq!(restored, src);
    }

    #[test]
    fn literal_run_stops_when_destination_is_exhausted() {
        let src = [7u8; 600];
        assert_eq!(copy_incompressible(&src, &mut []), 0);

        let mut dst = [0u8; 2];
        assert_eq!(copy_incompressible(&src, &mut dst), 2);
        assert_eq!(dst, [0xF0, 0xFF]);

        // Header fits, literals do not.
        let mut dst = [0u8; 10];
        assert_eq!(copy_incompressible(&src, &mut dst), 4);
    }

    #[test]
    fn compress_round_trips_through_lz4() {
        let data = b"key1key1key1key1value2value2value2value2value2".repeat(20);
        let compressed = compress(&data).expect("compress");
        assert!(compressed.len() < data.len());
        assert_eq!(decompress(&compressed, data.len()).expect("decompress"), data);
    }

    #[test]
    fn compress_respects_worst_case_bound() {
        // Poorly compressible input.
        let data: Vec<u8> = (0..4096u32)
            .map(|i| (i.wrapping_mul(2_654_435_761) >> 13) as u8)
            .collect();
        let compressed = compress(&data).expect("compress");
        assert!(compressed.len() <= compress_bound(data.len()));
    }
}
