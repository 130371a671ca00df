pub mod page_raster;
pub mod pipeline;
pub mod sink;
