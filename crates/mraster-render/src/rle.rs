#![forbid(unsafe_code)]

//! Run-length codec for bitmaps.
//!
//! The stream is a sequence of run lengths over the pixels in row-major
//! order, alternating between the active and inactive state. The starting
//! state is agreed out of band and not stored. A run of 0 switches state
//! without covering any pixel. Runs are capped at 255 pixels; a 255 run that
//! the same state continues past is followed by a 0.

use mraster_core::logging::target;
use mraster_core::{trace, warn};

use crate::bitmap::Bitmap;
use crate::error::{RasterError, Result};

/// Longest run a single byte carries before the encoder has to split it.
const MAX_RUN: u8 = 255;

/// Encode `bitmap` into run lengths, starting in the `starts_active` state.
#[must_use]
pub fn encode(starts_active: bool, bitmap: &Bitmap) -> Vec<u8> {
    let mut runs = Vec::new();
    let mut active = starts_active;
    let mut count: u8 = 0;

    for index in 0..bitmap.pixel_count() {
        if bitmap.bit(index) == active {
            if count < MAX_RUN - 1 {
                count += 1;
            } else {
                runs.push(MAX_RUN);
                active = !active;
                count = 0;
            }
        } else {
            runs.push(count);
            active = !active;
            count = 1;
        }
    }
    runs.push(count);

    trace!(target: target::RLE, pixels = bitmap.pixel_count(), bytes = runs.len(), "rle encode");
    runs
}

/// Decode `runs` into `bitmap`, starting in the `starts_active` state.
///
/// Every pixel is overwritten. Runs left over once the bitmap is full are
/// ignored.
///
/// # Errors
///
/// Returns [`RasterError::TruncatedData`] if the runs cover fewer pixels than
/// the bitmap holds. Pixels decoded up to that point are kept.
pub fn decode(starts_active: bool, runs: &[u8], bitmap: &mut Bitmap) -> Result<()> {
    let total = bitmap.pixel_count();
    let mut active = starts_active;
    let mut pos = 0;

    for &run in runs {
        if pos == total {
            break;
        }
        let end = (pos + run as usize).min(total);
        bitmap.fill_linear(pos, end, active);
        pos = end;
        active = !active;
    }

    if pos < total {
        warn!(
            target: target::RLE,
            decoded = pos,
            total,
            "rle stream ended before the bitmap was full"
        );
        return Err(RasterError::TruncatedData {
            decoded: pos,
            total,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_runs() {
        let bitmap = Bitmap::from_pattern(&["##..", ".###"]);
        assert_eq!(encode(true, &bitmap), vec![2, 3, 3]);
        assert_eq!(encode(false, &bitmap), vec![0, 2, 3, 3]);
    }

    #[test]
    fn decode_overwrites_every_pixel() {
        let mut bitmap = Bitmap::new(4, 2, true);
        decode(false, &[3, 1, 4], &mut bitmap).unwrap();
        assert_eq!(bitmap.to_string(), "...#\n....\n");
    }

    #[test]
    fn zero_run_toggles_without_advancing() {
        let mut bitmap = Bitmap::new(4, 1, false);
        decode(true, &[2, 0, 2], &mut bitmap).unwrap();
        assert_eq!(bitmap.to_string(), "####\n");
    }

    #[test]
    fn long_runs_use_escape() {
        let bitmap = Bitmap::new(600, 1, true);
        let runs = encode(true, &bitmap);
        assert_eq!(runs, vec![255, 0, 255, 0, 90]);

        let mut decoded = Bitmap::new(600, 1, false);
        decode(true, &runs, &mut decoded).unwrap();
        assert_eq!(decoded, bitmap);
    }

    #[test]
    fn escape_followed_by_state_change() {
        let mut bitmap = Bitmap::new(300, 1, false);
        bitmap.fill_span(0, 254, 0, true);
        let runs = encode(true, &bitmap);
        assert_eq!(runs, vec![255, 45]);

        let mut decoded = Bitmap::new(300, 1, true);
        decode(true, &runs, &mut decoded).unwrap();
        assert_eq!(decoded, bitmap);
    }

    #[test]
    fn truncated_runs_are_reported() {
        let mut bitmap = Bitmap::new(4, 4, false);
        assert_eq!(
            decode(true, &[3, 4], &mut bitmap),
            Err(RasterError::TruncatedData {
                decoded: 7,
                total: 16
            })
        );
        assert_eq!(
            decode(true, &[], &mut bitmap),
            Err(RasterError::TruncatedData {
                decoded: 0,
                total: 16
            })
        );
    }

    #[test]
    fn trailing_runs_are_ignored() {
        let mut bitmap = Bitmap::new(2, 1, false);
        decode(true, &[2, 9, 9], &mut bitmap).unwrap();
        assert_eq!(bitmap.to_string(), "##\n");
    }
}
