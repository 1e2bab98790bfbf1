use super::MorphologyError;

/// Side length of the square element used when none is given.
pub const DEFAULT_ELEMENT_SIZE: usize = 5;

/// Shapes of flat structuring elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementShape {
    /// A square structuring element with every cell active.
    Box {
        /// The side length of the square (size x size).
        size: usize,
    },

    /// A rectangular structuring element with every cell active.
    Rect {
        /// Number of columns.
        width: usize,
        /// Number of rows.
        height: usize,
    },

    /// A cross (plus) shaped structuring element.
    ///
    /// Only cells along the horizontal and vertical center lines are active.
    Cross {
        /// The side length of the square cross (size x size).
        size: usize,
    },

    /// An ellipse (or circle) shaped structuring element.
    ///
    /// Cells inside the boundary `(x^2 / rx^2) + (y^2 / ry^2) <= 1` are active, with `x` and
    /// `y` measured from the geometric center of the grid.
    Ellipse {
        /// Number of columns.
        width: usize,
        /// Number of rows.
        height: usize,
    },
}

/// The origin of a structuring element.
///
/// `x` is a column and `y` a row of the element grid. When the element is aligned to an output
/// pixel, the anchor cell sits on top of that pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anchor {
    /// Column of the anchor cell.
    pub x: usize,
    /// Row of the anchor cell.
    pub y: usize,
}

impl Anchor {
    /// Create an anchor at column `x` and row `y`.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The anchor position after rotating `element` by 180 degrees.
    ///
    /// Computed against the dimensions of the unreflected element, so that
    /// `anchor.reflect(&element)` points at the same cell of `element.reflect()`.
    ///
    /// # Errors
    ///
    /// Returns [`MorphologyError::AnchorOutOfBounds`] if the anchor lies outside `element`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flatmorph_imgproc::morphology::{Anchor, StructuringElement};
    ///
    /// let element = StructuringElement::from_vec(2, 3, vec![1; 6]).unwrap();
    /// let anchor = Anchor::new(0, 0);
    ///
    /// let reflected = anchor.reflect(&element).unwrap();
    /// assert_eq!(reflected, Anchor::new(2, 1));
    /// assert_eq!(reflected.reflect(&element.reflect()).unwrap(), anchor);
    /// ```
    pub fn reflect(&self, element: &StructuringElement) -> Result<Anchor, MorphologyError> {
        element.check_anchor(*self)?;
        Ok(Anchor {
            x: element.cols - 1 - self.x,
            y: element.rows - 1 - self.y,
        })
    }
}

/// A flat (binary) structuring element.
///
/// Stores a row-major mask where 1 marks an active cell and 0 an inactive one. Any nonzero input
/// value is normalized to 1. Elements are immutable once built and always have at least one row
/// and one column.
///
/// # Example
///
/// ```rust
/// use flatmorph_imgproc::morphology::{Anchor, ElementShape, StructuringElement};
///
/// let element = StructuringElement::new(ElementShape::Box { size: 3 }).unwrap();
/// assert_eq!(element.rows(), 3);
/// assert_eq!(element.cols(), 3);
/// assert_eq!(element.center(), Anchor::new(1, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuringElement {
    data: Vec<u8>,
    rows: usize,
    cols: usize,
}

impl Default for StructuringElement {
    /// A 5x5 square with every cell active.
    fn default() -> Self {
        Self {
            data: vec![1; DEFAULT_ELEMENT_SIZE * DEFAULT_ELEMENT_SIZE],
            rows: DEFAULT_ELEMENT_SIZE,
            cols: DEFAULT_ELEMENT_SIZE,
        }
    }
}

impl StructuringElement {
    /// Create a structuring element from a shape.
    ///
    /// # Errors
    ///
    /// Returns [`MorphologyError::EmptyElement`] when any dimension of the shape is zero.
    pub fn new(shape: ElementShape) -> Result<Self, MorphologyError> {
        match shape {
            ElementShape::Box { size } => rect_element(size, size),
            ElementShape::Rect { width, height } => rect_element(width, height),
            ElementShape::Cross { size } => cross_element(size),
            ElementShape::Ellipse { width, height } => ellipse_element(width, height),
        }
    }

    /// Create a `size x size` element with every cell active.
    pub fn square(size: usize) -> Result<Self, MorphologyError> {
        rect_element(size, size)
    }

    /// Create an element from a flat row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns an error when the element would be empty or when `data` does not hold exactly
    /// `rows * cols` values.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<u8>) -> Result<Self, MorphologyError> {
        if rows == 0 || cols == 0 {
            return Err(MorphologyError::EmptyElement);
        }
        if data.len() != rows * cols {
            return Err(MorphologyError::InvalidElementData {
                expected: rows * cols,
                actual: data.len(),
            });
        }

        let data = data.into_iter().map(|v| u8::from(v != 0)).collect();
        Ok(Self { data, rows, cols })
    }

    /// Create an element from a list of rows.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flatmorph_imgproc::morphology::StructuringElement;
    ///
    /// let element = StructuringElement::from_rows(&[vec![0, 1, 0], vec![1, 7, 1]]).unwrap();
    /// assert_eq!(element.data(), &[0, 1, 0, 1, 1, 1]);
    /// ```
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, MorphologyError> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != cols) {
            return Err(MorphologyError::NonRectangularElement);
        }
        Self::from_vec(rows.len(), cols, rows.concat())
    }

    /// Get the mask values, row-major, each 0 or 1.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the number of rows of the element.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Get the number of columns of the element.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the cell at `(row, col)` is active. Out-of-range cells are inactive.
    pub fn is_active(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.data[row * self.cols + col] != 0
    }

    /// Iterate over the `(row, col)` coordinates of the active cells.
    pub fn active_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.data
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0)
            .map(move |(idx, _)| (idx / cols, idx % cols))
    }

    /// The geometric center `((cols - 1) / 2, (rows - 1) / 2)`, used as the default anchor.
    pub fn center(&self) -> Anchor {
        Anchor {
            x: (self.cols - 1) / 2,
            y: (self.rows - 1) / 2,
        }
    }

    /// Whether `anchor` refers to a cell inside the element bounds.
    pub fn contains(&self, anchor: Anchor) -> bool {
        anchor.x < self.cols && anchor.y < self.rows
    }

    /// Return the element rotated by 180 degrees: `m'[i][j] = m[rows-1-i][cols-1-j]`.
    pub fn reflect(&self) -> Self {
        // row-major storage, so a 180 degree rotation is a plain reversal
        let data = self.data.iter().rev().copied().collect();
        Self {
            data,
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub(crate) fn check_anchor(&self, anchor: Anchor) -> Result<(), MorphologyError> {
        if !self.contains(anchor) {
            return Err(MorphologyError::AnchorOutOfBounds {
                x: anchor.x,
                y: anchor.y,
                cols: self.cols,
                rows: self.rows,
            });
        }
        Ok(())
    }
}

fn rect_element(width: usize, height: usize) -> Result<StructuringElement, MorphologyError> {
    StructuringElement::from_vec(height, width, vec![1u8; width * height])
}

fn cross_element(size: usize) -> Result<StructuringElement, MorphologyError> {
    let mut data = vec![0u8; size * size];
    let mid = size / 2;

    // fill horizontal line
    for j in 0..size {
        data[mid * size + j] = 1;
    }

    // fill vertical line
    for i in 0..size {
        data[i * size + mid] = 1;
    }

    StructuringElement::from_vec(size, size, data)
}

fn ellipse_element(width: usize, height: usize) -> Result<StructuringElement, MorphologyError> {
    let mut data = vec![0u8; width * height];
    let cx = (width as f32 - 1.0) / 2.0;
    let cy = (height as f32 - 1.0) / 2.0;
    let rx = width as f32 / 2.0;
    let ry = height as f32 / 2.0;

    for i in 0..height {
        for j in 0..width {
            let x = j as f32 - cx;
            let y = i as f32 - cy;
            if (x * x) / (rx * rx) + (y * y) / (ry * ry) <= 1.0 {
                data[i * width + j] = 1;
            }
        }
    }

    StructuringElement::from_vec(height, width, data)
}
