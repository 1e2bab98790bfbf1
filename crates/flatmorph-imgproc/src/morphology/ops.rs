use flatmorph_image::Image;

use super::complement::complement;
use super::dilate::{dilate_with_options, MorphOptions};
use super::element::{Anchor, StructuringElement};
use super::{MorphologyError, Sample};

/// Erode an image with a flat structuring element.
///
/// Erosion shrinks bright regions. Each sample is replaced by the minimum of the samples under
/// the active cells of the element: `(f ⊖ b)(x) = min { f(x + s) : s in b }` with `s` measured
/// from the anchor. Out-of-bounds positions are left out of the minimum.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `element` - The structuring element.
/// * `anchor` - The origin of the structuring element.
///
/// # Example
///
/// ```rust
/// use flatmorph_image::Image;
/// use flatmorph_imgproc::morphology::{erode, Anchor, StructuringElement};
///
/// let image = Image::<u8, 1>::new([4, 1].into(), vec![9, 9, 0, 9]).unwrap();
/// let element = StructuringElement::from_vec(1, 3, vec![1, 1, 1]).unwrap();
///
/// let eroded = erode(&image, &element, Anchor::new(1, 0)).unwrap();
/// assert_eq!(eroded.as_slice(), &[9, 0, 0, 0]);
/// ```
pub fn erode<T: Sample, const C: usize>(
    src: &Image<T, C>,
    element: &StructuringElement,
    anchor: Anchor,
) -> Result<Image<T, C>, MorphologyError> {
    erode_with_options(src, element, anchor, &MorphOptions::default())
}

/// Erode an image with explicit [`MorphOptions`].
///
/// Computed through the duality `f ⊖ b = (f^c ⊕ b^r)^c`, where `^c` is the [`complement`] and
/// `b^r` the reflected element with its reflected anchor. The dilation reflects its element once
/// more, so the scan walks the cells of `b` itself.
pub fn erode_with_options<T: Sample, const C: usize>(
    src: &Image<T, C>,
    element: &StructuringElement,
    anchor: Anchor,
    options: &MorphOptions,
) -> Result<Image<T, C>, MorphologyError> {
    element.check_anchor(anchor)?;

    let inverted = complement(src);
    let dilated = dilate_with_options(
        &inverted,
        &element.reflect(),
        anchor.reflect(element)?,
        options,
    )?;

    Ok(complement(&dilated))
}

/// Opening: erosion followed by dilation with the same element and anchor.
///
/// Removes bright details smaller than the element. When the anchor cell is active the result
/// never exceeds the source.
pub fn open<T: Sample, const C: usize>(
    src: &Image<T, C>,
    element: &StructuringElement,
    anchor: Anchor,
) -> Result<Image<T, C>, MorphologyError> {
    open_with_options(src, element, anchor, &MorphOptions::default())
}

/// Opening with explicit [`MorphOptions`].
pub fn open_with_options<T: Sample, const C: usize>(
    src: &Image<T, C>,
    element: &StructuringElement,
    anchor: Anchor,
    options: &MorphOptions,
) -> Result<Image<T, C>, MorphologyError> {
    let eroded = erode_with_options(src, element, anchor, options)?;
    dilate_with_options(&eroded, element, anchor, options)
}

/// Closing: dilation followed by erosion with the same element and anchor.
///
/// Fills dark details smaller than the element. When the anchor cell is active the result is
/// never below the source.
pub fn close<T: Sample, const C: usize>(
    src: &Image<T, C>,
    element: &StructuringElement,
    anchor: Anchor,
) -> Result<Image<T, C>, MorphologyError> {
    close_with_options(src, element, anchor, &MorphOptions::default())
}

/// Closing with explicit [`MorphOptions`].
pub fn close_with_options<T: Sample, const C: usize>(
    src: &Image<T, C>,
    element: &StructuringElement,
    anchor: Anchor,
    options: &MorphOptions,
) -> Result<Image<T, C>, MorphologyError> {
    let dilated = dilate_with_options(src, element, anchor, options)?;
    erode_with_options(&dilated, element, anchor, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::dilate::{dilate, EmptyWindow};

    fn single_spot() -> Result<Image<u8, 1>, MorphologyError> {
        let mut data = vec![0u8; 25];
        data[12] = 200;
        Ok(Image::new([5, 5].into(), data)?)
    }

    #[test]
    fn test_erode_identity() -> Result<(), MorphologyError> {
        let image = Image::<u8, 3>::new([2, 3].into(), (10..28).collect())?;
        let element = StructuringElement::square(1)?;
        assert_eq!(erode(&image, &element, Anchor::new(0, 0))?, image);
        Ok(())
    }

    #[test]
    fn test_erode_translates_with_anchor() -> Result<(), MorphologyError> {
        // min of f(x) and f(x + 1)
        let image = Image::<u8, 1>::new([4, 1].into(), vec![5, 1, 5, 5])?;
        let element = StructuringElement::from_vec(1, 2, vec![1, 1])?;
        let eroded = erode(&image, &element, Anchor::new(0, 0))?;
        assert_eq!(eroded.as_slice(), &[1, 1, 5, 5]);

        // min of f(x) and f(x - 1)
        let eroded = erode(&image, &element, Anchor::new(1, 0))?;
        assert_eq!(eroded.as_slice(), &[5, 1, 1, 5]);
        Ok(())
    }

    #[test]
    fn test_erode_duality() -> Result<(), MorphologyError> {
        let data = (0..(6 * 5)).map(|v| (v * 53 % 256) as u8).collect();
        let image = Image::<u8, 1>::new([6, 5].into(), data)?;
        let element = StructuringElement::from_rows(&[vec![1, 1, 0], vec![0, 1, 1]])?;
        let anchor = Anchor::new(1, 0);

        let eroded = erode(&image, &element, anchor)?;
        let dual = complement(&dilate(
            &complement(&image),
            &element.reflect(),
            anchor.reflect(&element)?,
        )?);
        assert_eq!(eroded, dual);
        Ok(())
    }

    #[test]
    fn test_erode_empty_window() -> Result<(), MorphologyError> {
        // the window of column j only holds column j - 2
        let image = Image::<u8, 1>::new([3, 1].into(), vec![7, 8, 9])?;
        let element = StructuringElement::from_vec(1, 3, vec![1, 0, 0])?;
        let anchor = Anchor::new(2, 0);

        // an empty window under the zero policy comes back as the maximum after the complement
        let eroded = erode(&image, &element, anchor)?;
        assert_eq!(eroded.as_slice(), &[255, 255, 7]);

        let options = MorphOptions {
            empty_window: EmptyWindow::Source,
            ..Default::default()
        };
        let eroded = erode_with_options(&image, &element, anchor, &options)?;
        assert_eq!(eroded.as_slice(), &[7, 8, 7]);
        Ok(())
    }

    #[test]
    fn test_open_removes_spot() -> Result<(), MorphologyError> {
        let image = single_spot()?;
        let element = StructuringElement::square(3)?;
        let opened = open(&image, &element, Anchor::new(1, 1))?;
        assert!(opened.as_slice().iter().all(|&v| v == 0));
        Ok(())
    }

    #[test]
    fn test_close_keeps_spot() -> Result<(), MorphologyError> {
        let image = single_spot()?;
        let element = StructuringElement::square(3)?;
        let closed = close(&image, &element, Anchor::new(1, 1))?;
        assert_eq!(closed, image);
        Ok(())
    }

    #[test]
    fn test_close_fills_hole() -> Result<(), MorphologyError> {
        let mut data = vec![200u8; 25];
        data[12] = 0;
        let image = Image::<u8, 1>::new([5, 5].into(), data)?;
        let element = StructuringElement::square(3)?;
        let closed = close(&image, &element, Anchor::new(1, 1))?;
        assert!(closed.as_slice().iter().all(|&v| v == 200));
        Ok(())
    }

    #[test]
    fn test_uniform_invariance() -> Result<(), MorphologyError> {
        let image = Image::<u8, 3>::from_size_val([7, 6].into(), 42)?;
        let element = StructuringElement::square(3)?;
        let anchor = element.center();
        assert_eq!(dilate(&image, &element, anchor)?, image);
        assert_eq!(erode(&image, &element, anchor)?, image);
        assert_eq!(open(&image, &element, anchor)?, image);
        assert_eq!(close(&image, &element, anchor)?, image);
        Ok(())
    }

    #[test]
    fn test_rejects_bad_anchor() -> Result<(), MorphologyError> {
        let image = single_spot()?;
        let element = StructuringElement::square(3)?;
        let anchor = Anchor::new(5, 0);
        assert!(erode(&image, &element, anchor).is_err());
        assert!(open(&image, &element, anchor).is_err());
        assert!(close(&image, &element, anchor).is_err());
        Ok(())
    }
}
