#![doc = include_str!("../README.md")]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]
#![allow(clippy::len_without_is_empty)]

pub(crate) type Kbn<T> = compensated_summation::KahanBabuskaNeumaier<T>;

mod utils;
pub(crate) use utils::helper;

mod error;
pub use error::{ColumnError, Error, Result};

mod dataset;
pub use dataset::{Dataset, Record, SortedView};

mod params;
pub use params::{WindowBounds, WindowParams};

mod selector;
pub use selector::{Selection, compute_window};

mod cache;
pub use cache::WindowCache;

pub mod table;
pub use table::{Table, TableOptions, read_table, read_table_path, write_selection, write_selection_path};

mod report;
pub use report::{FileStatus, Summary, describe};
