pub mod align;
pub mod consts;
pub mod crop;
pub mod error;
pub mod frame;
pub mod hypercube;
pub mod io;
pub mod pipeline;
pub mod table;
