pub mod blur;
pub mod compositor;
pub mod painter;
pub mod plan;
pub mod raster;
