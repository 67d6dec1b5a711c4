pub mod composite;
pub mod consts;
pub mod error;
pub mod geometry;
pub mod io;
pub mod layer;
pub mod project;
pub mod raster;
pub mod session;
pub mod text;
pub mod transform;
pub mod viewport;
