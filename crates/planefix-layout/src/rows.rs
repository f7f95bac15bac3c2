use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::error::LayoutError;

/// Maximum last-row height, in multiples of the target row height, before the
/// row is shrunk back to the target height.
const LAST_ROW_MAX_SCALE: f64 = 1.5;

/// One image to place, identified by an opaque handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutItem<H> {
    /// Width divided by height, strictly positive.
    pub aspect_ratio: f64,
    /// Caller handle identifying the image.
    pub source: H,
}

impl<H> LayoutItem<H> {
    /// Create a new item from its aspect ratio.
    pub fn new(aspect_ratio: f64, source: H) -> Self {
        Self {
            aspect_ratio,
            source,
        }
    }

    /// Create a new item from the pixel size of the image.
    ///
    /// Returns `None` if either dimension is zero.
    pub fn from_size(width: usize, height: usize, source: H) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self::new(width as f64 / height as f64, source))
    }
}

/// Where an item is drawn on the canvas, in canvas pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRect<H> {
    /// Handle of the placed item.
    pub item: H,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width of the drawn image.
    pub width: f64,
    /// Height of the drawn image.
    pub height: f64,
}

// Items waiting to be finalized into the current row.
struct PendingRow<'a, H> {
    items: Vec<&'a LayoutItem<H>>,
    aspect_sum: f64,
}

impl<'a, H: Clone> PendingRow<'a, H> {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            aspect_sum: 0.0,
        }
    }

    fn push(&mut self, item: &'a LayoutItem<H>) {
        self.items.push(item);
        self.aspect_sum += item.aspect_ratio;
    }

    fn gap_width(&self, gap: f64) -> f64 {
        (self.items.len() + 1) as f64 * gap
    }

    fn width_at(&self, row_height: f64, gap: f64) -> f64 {
        row_height * self.aspect_sum + self.gap_width(gap)
    }

    // Places the pending items at `y` and empties the row. Returns the row height.
    fn finalize(
        &mut self,
        y: f64,
        config: &LayoutConfig,
        is_last: bool,
        out: &mut Vec<PlacementRect<H>>,
    ) -> f64 {
        let canvas_width = f64::from(config.canvas_size);
        let target_height = config.target_row_height();

        let available_width = canvas_width - self.gap_width(config.gap);
        let mut row_height = (available_width / self.aspect_sum).max(0.0);
        if is_last && row_height > LAST_ROW_MAX_SCALE * target_height {
            row_height = target_height;
        }

        let mut x = config.gap;
        for item in self.items.drain(..) {
            let width = row_height * item.aspect_ratio;
            out.push(PlacementRect {
                item: item.source.clone(),
                x,
                y,
                width,
                height: row_height,
            });
            x += width + config.gap;
        }
        self.aspect_sum = 0.0;

        row_height
    }
}

/// Pack items into justified rows of a fixed-width canvas.
///
/// Items are appended one at a time to the current row. As soon as the row,
/// rendered at the target height, reaches the canvas width it is closed and
/// scaled so that it fills the canvas width exactly. There is no look-ahead:
/// row membership only depends on the items seen so far, so a very wide image
/// simply closes the row it lands in.
///
/// The trailing row is scaled the same way unless that would make it taller
/// than 1.5 times the target height, in which case it keeps the target height
/// and does not fill the canvas width.
///
/// # Arguments
///
/// * `items` - The items to place, in drawing order.
/// * `config` - The canvas width, gap and target row height.
///
/// # Returns
///
/// One placement per item, in input order.
///
/// # Errors
///
/// * [`LayoutError::InvalidConfig`] if `config` does not validate.
/// * [`LayoutError::InvalidItem`] if an aspect ratio is not a positive number.
///
/// # Example
///
/// ```
/// use planefix_layout::{layout_rows, LayoutConfig, LayoutItem};
///
/// let items: Vec<_> = (0..4).map(|i| LayoutItem::new(1.0, i)).collect();
/// let config = LayoutConfig {
///     canvas_size: 400,
///     gap: 0.0,
///     target_row_height_ratio: 0.5,
/// };
///
/// let placements = layout_rows(&items, &config).unwrap();
///
/// assert_eq!(placements.len(), 4);
/// assert_eq!(placements[2].y, 200.0);
/// assert_eq!(placements[3].x, 200.0);
/// ```
pub fn layout_rows<H: Clone>(
    items: &[LayoutItem<H>],
    config: &LayoutConfig,
) -> Result<Vec<PlacementRect<H>>, LayoutError> {
    config.validate()?;

    if let Some((index, item)) = items
        .iter()
        .enumerate()
        .find(|(_, item)| !(item.aspect_ratio.is_finite() && item.aspect_ratio > 0.0))
    {
        return Err(LayoutError::InvalidItem {
            index,
            aspect_ratio: item.aspect_ratio,
        });
    }

    let canvas_width = f64::from(config.canvas_size);
    let target_height = config.target_row_height();

    let mut placements = Vec::with_capacity(items.len());
    let mut row = PendingRow::new();
    let mut current_y = config.gap;
    let mut num_rows = 0usize;

    for item in items {
        row.push(item);
        if row.width_at(target_height, config.gap) >= canvas_width {
            let row_height = row.finalize(current_y, config, false, &mut placements);
            current_y += row_height + config.gap;
            num_rows += 1;
        }
    }

    if !row.items.is_empty() {
        row.finalize(current_y, config, true, &mut placements);
        num_rows += 1;
    }

    log::debug!(
        "laid out {} items in {} rows on a {}px canvas",
        placements.len(),
        num_rows,
        config.canvas_size
    );

    Ok(placements)
}

/// Height of the canvas needed to hold every placement plus the bottom gap.
///
/// Returns 0 for an empty layout.
pub fn canvas_height<H>(placements: &[PlacementRect<H>], gap: f64) -> f64 {
    placements
        .iter()
        .map(|p| p.y + p.height)
        .reduce(f64::max)
        .map_or(0.0, |bottom| bottom + gap)
}
