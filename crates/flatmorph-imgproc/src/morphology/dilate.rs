use flatmorph_image::Image;

use super::element::{Anchor, StructuringElement};
use super::MorphologyError;
use crate::parallel::{for_each_row, ExecutionStrategy};

/// What to write when no active element cell overlaps the image.
///
/// This only happens near the borders, for anchors that are off-center or inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyWindow {
    /// Write the zero value of the sample type.
    #[default]
    Zero,
    /// Keep the source sample.
    Source,
}

/// Options shared by all the morphological transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MorphOptions {
    /// Result for pixels whose window holds no in-bounds active cell.
    pub empty_window: EmptyWindow,
    /// How output rows are scheduled.
    pub strategy: ExecutionStrategy,
}

/// Dilate an image with a flat structuring element.
///
/// Dilation expands bright regions. Each sample is replaced by the maximum of the samples under
/// the active cells of the reflected element, i.e. `(f ⊕ b)(x) = max { f(x - s) : s in b }`
/// with `s` measured from the anchor. Out-of-bounds positions are left out of the maximum.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `element` - The structuring element.
/// * `anchor` - The origin of the structuring element.
///
/// # Errors
///
/// Returns [`MorphologyError::AnchorOutOfBounds`] if `anchor` lies outside `element`.
///
/// # Example
///
/// ```rust
/// use flatmorph_image::{Image, ImageSize};
/// use flatmorph_imgproc::morphology::{dilate, Anchor, StructuringElement};
///
/// let mut data = vec![0u8; 25];
/// data[12] = 200;
/// let image = Image::<u8, 1>::new(ImageSize { width: 5, height: 5 }, data).unwrap();
/// let element = StructuringElement::square(3).unwrap();
///
/// let dilated = dilate(&image, &element, Anchor::new(1, 1)).unwrap();
/// assert_eq!(dilated.get([1, 1, 0]), Some(&200));
/// assert_eq!(dilated.get([0, 0, 0]), Some(&0));
/// ```
pub fn dilate<T, const C: usize>(
    src: &Image<T, C>,
    element: &StructuringElement,
    anchor: Anchor,
) -> Result<Image<T, C>, MorphologyError>
where
    T: Copy + Ord + Default + Send + Sync,
{
    dilate_with_options(src, element, anchor, &MorphOptions::default())
}

/// Dilate an image with a flat structuring element and explicit [`MorphOptions`].
///
/// This is the only place where the element is reflected: the scan slides the reflected element
/// so that its reflected anchor sits on the output pixel.
pub fn dilate_with_options<T, const C: usize>(
    src: &Image<T, C>,
    element: &StructuringElement,
    anchor: Anchor,
    options: &MorphOptions,
) -> Result<Image<T, C>, MorphologyError>
where
    T: Copy + Ord + Default + Send + Sync,
{
    let reflected = element.reflect();
    let offsets = window_offsets(&reflected, anchor.reflect(element)?);

    let (rows, cols) = (src.rows(), src.cols());
    let src_data = src.as_slice();
    let empty_window = options.empty_window;

    let mut dst = Image::from_size_val(src.size(), T::default())?;

    for_each_row(dst.as_slice_mut(), cols * C, options.strategy, |i, row| {
        for (j, out) in row.chunks_exact_mut(C).enumerate() {
            let mut acc = [None::<T>; C];

            for &(dy, dx) in offsets.iter() {
                let (Some(y), Some(x)) = (i.checked_add_signed(dy), j.checked_add_signed(dx))
                else {
                    continue;
                };
                if y >= rows || x >= cols {
                    continue;
                }

                let base = (y * cols + x) * C;
                for (slot, &v) in acc.iter_mut().zip(&src_data[base..base + C]) {
                    *slot = Some(slot.map_or(v, |m| m.max(v)));
                }
            }

            let center = (i * cols + j) * C;
            for (k, (px, slot)) in out.iter_mut().zip(acc).enumerate() {
                *px = match (slot, empty_window) {
                    (Some(v), _) => v,
                    (None, EmptyWindow::Zero) => T::default(),
                    (None, EmptyWindow::Source) => src_data[center + k],
                };
            }
        }
    });

    log::trace!(
        "dilated {} image with {}x{} element, {} active cells",
        src.size(),
        element.cols(),
        element.rows(),
        offsets.len()
    );

    Ok(dst)
}

/// Offsets `(dy, dx)` of the active cells relative to `origin`.
fn window_offsets(element: &StructuringElement, origin: Anchor) -> Vec<(isize, isize)> {
    element
        .active_cells()
        .map(|(r, c)| {
            (
                r as isize - origin.y as isize,
                c as isize - origin.x as isize,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatmorph_image::ImageSize;

    fn single_spot() -> Result<Image<u8, 1>, MorphologyError> {
        let mut data = vec![0u8; 25];
        data[12] = 200;
        Ok(Image::new(
            ImageSize {
                width: 5,
                height: 5,
            },
            data,
        )?)
    }

    #[test]
    fn test_dilate_uniform() -> Result<(), MorphologyError> {
        let image = Image::<u8, 1>::from_size_val([5, 5].into(), 100)?;
        let element = StructuringElement::square(3)?;
        let dilated = dilate(&image, &element, Anchor::new(1, 1))?;
        assert_eq!(dilated, image);
        Ok(())
    }

    #[test]
    fn test_dilate_single_spot() -> Result<(), MorphologyError> {
        let image = single_spot()?;
        let element = StructuringElement::square(3)?;
        let dilated = dilate(&image, &element, Anchor::new(1, 1))?;

        #[rustfmt::skip]
        let expected = vec![
            0, 0, 0, 0, 0,
            0, 200, 200, 200, 0,
            0, 200, 200, 200, 0,
            0, 200, 200, 200, 0,
            0, 0, 0, 0, 0,
        ];
        assert_eq!(dilated.as_slice(), expected.as_slice());
        Ok(())
    }

    #[test]
    fn test_dilate_identity() -> Result<(), MorphologyError> {
        let image = Image::<u8, 3>::new([3, 2].into(), (0..18).collect())?;
        let element = StructuringElement::square(1)?;
        assert_eq!(dilate(&image, &element, Anchor::new(0, 0))?, image);
        Ok(())
    }

    #[test]
    fn test_dilate_translates_with_anchor() -> Result<(), MorphologyError> {
        // 1x2 element anchored on the left cell: max of f(x) and f(x - 1)
        let image = Image::<u8, 1>::new([4, 1].into(), vec![0, 9, 0, 0])?;
        let element = StructuringElement::from_vec(1, 2, vec![1, 1])?;

        let dilated = dilate(&image, &element, Anchor::new(0, 0))?;
        assert_eq!(dilated.as_slice(), &[0, 9, 9, 0]);

        // anchored on the right cell: max of f(x) and f(x + 1)
        let dilated = dilate(&image, &element, Anchor::new(1, 0))?;
        assert_eq!(dilated.as_slice(), &[9, 9, 0, 0]);
        Ok(())
    }

    #[test]
    fn test_dilate_per_channel() -> Result<(), MorphologyError> {
        let image = Image::<u8, 2>::new([2, 1].into(), vec![10, 50, 40, 20])?;
        let element = StructuringElement::square(3)?;
        let dilated = dilate(&image, &element, Anchor::new(1, 1))?;
        assert_eq!(dilated.as_slice(), &[40, 50, 40, 50]);
        Ok(())
    }

    #[test]
    fn test_dilate_empty_window() -> Result<(), MorphologyError> {
        // the single active cell sits two columns left of the anchor, so the
        // window of column j only holds column j + 2
        let image = Image::<u8, 1>::new([3, 1].into(), vec![7, 8, 9])?;
        let element = StructuringElement::from_vec(1, 3, vec![1, 0, 0])?;
        let anchor = Anchor::new(2, 0);

        let zero = dilate(&image, &element, anchor)?;
        assert_eq!(zero.as_slice(), &[9, 0, 0]);

        let options = MorphOptions {
            empty_window: EmptyWindow::Source,
            ..Default::default()
        };
        let source = dilate_with_options(&image, &element, anchor, &options)?;
        assert_eq!(source.as_slice(), &[9, 8, 9]);
        Ok(())
    }

    #[test]
    fn test_dilate_parallel_matches_serial() -> Result<(), MorphologyError> {
        let data = (0..(17 * 11 * 3)).map(|v| (v * 37 % 251) as u8).collect();
        let image = Image::<u8, 3>::new([17, 11].into(), data)?;
        let element = StructuringElement::from_rows(&[vec![1, 0, 1], vec![0, 1, 1]])?;

        let serial = dilate(&image, &element, Anchor::new(2, 1))?;
        let options = MorphOptions {
            strategy: ExecutionStrategy::ParallelRows,
            ..Default::default()
        };
        let parallel = dilate_with_options(&image, &element, Anchor::new(2, 1), &options)?;
        assert_eq!(serial, parallel);
        Ok(())
    }

    #[test]
    fn test_dilate_anchor_out_of_bounds() -> Result<(), MorphologyError> {
        let image = single_spot()?;
        let element = StructuringElement::square(3)?;
        let result = dilate(&image, &element, Anchor::new(1, 3));
        assert!(matches!(
            result,
            Err(MorphologyError::AnchorOutOfBounds { x: 1, y: 3, .. })
        ));
        Ok(())
    }

    #[test]
    fn test_dilate_empty_image() -> Result<(), MorphologyError> {
        let image = Image::<u8, 1>::new([0, 0].into(), vec![])?;
        let dilated = dilate(&image, &StructuringElement::default(), Anchor::new(2, 2))?;
        assert!(dilated.as_slice().is_empty());
        Ok(())
    }
}
