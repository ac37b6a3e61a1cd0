mod ccid;
mod region;
mod region_type;

pub use ccid::Ccid;
pub use region::{Region, RegionFragment};
pub use region_type::RegionType;
