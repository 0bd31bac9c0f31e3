//! Output generation: RSS rendering and feed files.
//!
//! # Submodules
//!
//! - [`rss`]: Renders channel metadata and items as an RSS 2.0 document
//! - [`files`]: Writes rendered feeds into the output directory
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── latest-judgments.xml
//! └── future-judgments.xml
//! ```

pub mod files;
pub mod rss;
