//! A library for tiling a bounded extent
//!
//! ## Regular grids
//!
//! ```rust
//! use tile_grid::{Extent, TileSpec};
//!
//! let spec = TileSpec::square(50.0, 0.0, true).unwrap();
//! let ids: Vec<String> = spec
//!     .tiles(&Extent::new(0.0, 0.0, 100.0, 100.0))
//!     .map(|tile| tile.id)
//!     .collect();
//! assert_eq!(
//!     ids,
//!     vec![
//!         "0.0-0.0-50.0-50.0",
//!         "0.0-50.0-50.0-100.0",
//!         "50.0-0.0-100.0-50.0",
//!         "50.0-50.0-100.0-100.0",
//!     ]
//! );
//! ```
//!
//! ## Quad trees
//!
//! ```rust
//! use tile_grid::{Criterion, CriterionValue, Extent, QuadTree};
//!
//! let criterion = Criterion::parse("max_sample", CriterionValue::Int(3)).unwrap();
//! let tree = QuadTree::build(&Extent::new(0.0, 0.0, 100.0, 100.0), &criterion, 2154);
//! assert_eq!(tree.last_level(), 1);
//! assert_eq!(tree.level(1).unwrap().ids(), vec!["00", "01", "02", "03"]);
//! ```

mod grid;
mod grid_iterator;
#[cfg(test)]
mod grid_test;
mod quadtree;
#[cfg(test)]
mod quadtree_test;

pub use grid::{Extent, GridError, Tile, TileSpec, TiledLayer};
pub use grid_iterator::TileIterator;
pub use quadtree::{quadrants, Criterion, CriterionValue, QuadTree, ROOT_TILE_ID};
