//! Spatial hash grid over a borrowed point set.
//!
//! Space is cut into cubic cells whose side equals the search radius. Each
//! cell is hashed into one of `table_size` slots, and the point indices are
//! laid out slot by slot in a single arena (counting sort), with
//! `slot_splits[s]..slot_splits[s + 1]` delimiting slot `s`. Distinct cells
//! may share a slot; the exact distance test downstream filters them out.

use crate::compute::validation::{validate_point_count, validate_radius};
use crate::error::{Result, SearchError};
use radius_search_types::{Point3, Scalar};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use rustc_hash::FxHasher;
use smallvec::SmallVec;
use std::hash::{Hash, Hasher};

/// Integer coordinate of a grid cell.
pub type CellCoord = [i64; 3];

/// Slot ids touched by one query. A query usually touches 27 cells.
pub type CandidateSlots = SmallVec<[u32; 27]>;

/// Padding of the per-axis search extent, in units of `epsilon * cell_size`.
/// Covers the rounding of the L1 sum and the L2 squares in the exact test.
const REACH_ULPS: f64 = 8.0;

/// Largest slot count a grid may use; slot ids are stored as `u32`.
pub const MAX_TABLE_SIZE: usize = u32::MAX as usize;

/// Number of hash slots for `num_points` points.
///
/// `floor(num_points * factor)`, clamped to `[1, max_table_size]`.
///
/// ```
/// use radius_search::compute::grid::table_size_for;
///
/// assert_eq!(table_size_for(345, 1.0 / 8.0, 1 << 25), 43);
/// assert_eq!(table_size_for(10, 1.0 / 64.0, 1 << 25), 1);
/// assert_eq!(table_size_for(1_000_000, 1.0, 1024), 1024);
/// ```
pub fn table_size_for(num_points: usize, factor: f64, max_table_size: usize) -> usize {
    let scaled = (num_points as f64 * factor).floor();
    let cap = max_table_size.clamp(1, MAX_TABLE_SIZE);
    if scaled >= cap as f64 {
        cap
    } else {
        (scaled as usize).max(1)
    }
}

/// Cell containing `point` for cubic cells of side `cell_size`.
#[inline]
pub fn cell_of<T: Scalar>(point: &Point3<T>, cell_size: T) -> CellCoord {
    [
        floor_cell(point.x, cell_size),
        floor_cell(point.y, cell_size),
        floor_cell(point.z, cell_size),
    ]
}

#[inline]
fn floor_cell<T: Scalar>(coord: T, cell_size: T) -> i64 {
    // `as` saturates for coordinates beyond the i64 cell range
    (coord / cell_size).floor().as_f64() as i64
}

/// Hash slot of `cell` in a table of `table_size` slots.
#[inline]
pub fn slot_of_cell(cell: CellCoord, table_size: usize) -> usize {
    let mut hasher = FxHasher::default();
    cell.hash(&mut hasher);
    (hasher.finish() % table_size as u64) as usize
}

/// Immutable spatial hash grid built for a single search call.
#[derive(Debug)]
pub struct HashGrid<'a, T> {
    points: &'a [Point3<T>],
    cell_size: T,
    /// Per-axis extent scanned around a query: `cell_size` plus a few ulps.
    reach: T,
    table_size: usize,
    /// Offsets into `slot_points`, length `table_size + 1`.
    slot_splits: Vec<u32>,
    /// Point indices grouped by slot, increasing index order within a slot.
    slot_points: Vec<u32>,
}

impl<'a, T: Scalar> HashGrid<'a, T> {
    /// Bucket every point of `points` into a table of `table_size` slots.
    ///
    /// An empty point set yields a grid whose slots are all empty.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `cell_size` is not a positive finite number,
    ///   `table_size` is outside `[1, MAX_TABLE_SIZE]` or there are more
    ///   points than `u32` can index.
    /// - `ResourceExhausted` if the slot arrays cannot be allocated.
    pub fn build(points: &'a [Point3<T>], cell_size: T, table_size: usize) -> Result<Self> {
        validate_radius(cell_size)?;
        validate_point_count(points.len())?;
        if table_size == 0 || table_size > MAX_TABLE_SIZE {
            return Err(SearchError::InvalidArgument(format!(
                "Hash table size must be in [1, {}], got: {}",
                MAX_TABLE_SIZE, table_size
            )));
        }

        let num_points = points.len();

        // Hash every point to its slot.
        let mut point_slots: Vec<u32> = Vec::new();
        point_slots.try_reserve_exact(num_points)?;
        let slots = maybe_par_iter!(points)
            .map(|p| slot_of_cell(cell_of(p, cell_size), table_size) as u32);
        #[cfg(feature = "parallel")]
        point_slots.par_extend(slots);
        #[cfg(not(feature = "parallel"))]
        point_slots.extend(slots);

        // Count per slot, shifted by one so the running sum yields start offsets.
        let mut slot_splits: Vec<u32> = Vec::new();
        slot_splits.try_reserve_exact(table_size + 1)?;
        slot_splits.resize(table_size + 1, 0);
        for &slot in &point_slots {
            slot_splits[slot as usize + 1] += 1;
        }
        let mut running = 0u32;
        for split in slot_splits.iter_mut() {
            running += *split;
            *split = running;
        }
        debug_assert_eq!(slot_splits[table_size] as usize, num_points);

        // Stable scatter: indices land in increasing order within each slot.
        let mut fill: Vec<u32> = Vec::new();
        fill.try_reserve_exact(table_size)?;
        fill.extend_from_slice(&slot_splits[..table_size]);
        let mut slot_points: Vec<u32> = Vec::new();
        slot_points.try_reserve_exact(num_points)?;
        slot_points.resize(num_points, 0);
        for (idx, &slot) in point_slots.iter().enumerate() {
            let pos = &mut fill[slot as usize];
            slot_points[*pos as usize] = idx as u32;
            *pos += 1;
        }

        let reach = cell_size + cell_size * T::epsilon() * T::from_f64(REACH_ULPS);
        let grid = Self {
            points,
            cell_size,
            reach,
            table_size,
            slot_splits,
            slot_points,
        };

        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "Built hash grid: {} points, cell size {}, {} slots ({} occupied, largest holds {})",
                num_points,
                cell_size,
                table_size,
                grid.occupied_slots(),
                grid.max_slot_len()
            );
        }

        Ok(grid)
    }

    /// The indexed point set.
    pub fn points(&self) -> &'a [Point3<T>] {
        self.points
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn cell_size(&self) -> T {
        self.cell_size
    }

    pub fn table_size(&self) -> usize {
        self.table_size
    }

    /// Cell containing `point`.
    #[inline]
    pub fn cell_of(&self, point: &Point3<T>) -> CellCoord {
        cell_of(point, self.cell_size)
    }

    /// Slot that `cell` hashes to.
    #[inline]
    pub fn slot_of_cell(&self, cell: CellCoord) -> usize {
        slot_of_cell(cell, self.table_size)
    }

    /// Point indices stored in `slot`, in increasing order.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= self.table_size()`.
    #[inline]
    pub fn slot(&self, slot: usize) -> &[u32] {
        let start = self.slot_splits[slot] as usize;
        let end = self.slot_splits[slot + 1] as usize;
        &self.slot_points[start..end]
    }

    /// Distinct slots that may hold a neighbor of `query`, in increasing
    /// slot order.
    ///
    /// Along each axis the scan covers every cell from `cell_of(q - reach)`
    /// to `cell_of(q + reach)`. `floor` and division by the cell size are
    /// monotonic, so any point the exact distance test can accept lies in
    /// one of these cells, even when rounding puts the query just below a
    /// cell face. That is the 3×3×3 block around the query's cell, or one
    /// more layer on an axis where the query sits on a face. When the block
    /// has at least as many cells as the table has slots, every slot is
    /// returned. Empty for an empty grid.
    pub fn candidate_slots(&self, query: &Point3<T>) -> CandidateSlots {
        let mut slots = CandidateSlots::new();
        if self.is_empty() {
            return slots;
        }

        let (x, y, z) = (
            self.axis_cells(query.x),
            self.axis_cells(query.y),
            self.axis_cells(query.z),
        );
        let num_cells = [x, y, z]
            .iter()
            .map(|&(lo, hi)| i128::from(hi) - i128::from(lo) + 1)
            .fold(1_i128, i128::saturating_mul);
        if num_cells >= self.table_size as i128 {
            slots.extend(0..self.table_size as u32);
            return slots;
        }

        for cx in x.0..=x.1 {
            for cy in y.0..=y.1 {
                for cz in z.0..=z.1 {
                    slots.push(self.slot_of_cell([cx, cy, cz]) as u32);
                }
            }
        }
        slots.sort_unstable();
        slots.dedup();
        slots
    }

    /// Inclusive range of cells along one axis within `reach` of `coord`.
    #[inline]
    fn axis_cells(&self, coord: T) -> (i64, i64) {
        (
            floor_cell(coord - self.reach, self.cell_size),
            floor_cell(coord + self.reach, self.cell_size),
        )
    }

    /// Number of slots holding at least one point.
    pub fn occupied_slots(&self) -> usize {
        self.slot_splits.windows(2).filter(|w| w[1] > w[0]).count()
    }

    /// Size of the fullest slot.
    pub fn max_slot_len(&self) -> usize {
        self.slot_splits
            .windows(2)
            .map(|w| (w[1] - w[0]) as usize)
            .max()
            .unwrap_or(0)
    }
}
