pub mod interpolant;
pub mod rectilinear;
