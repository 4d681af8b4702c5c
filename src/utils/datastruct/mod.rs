pub mod arena;
pub mod heap;
pub mod list;
pub mod map;
pub mod set;
