pub mod area;

pub use area::AreaMethod;
