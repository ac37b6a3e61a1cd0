mod counties;
mod irregular;
mod names;
mod source;
mod states;

pub use counties::CountyTable;
pub use irregular::{table_name, IrregularStore, IrregularTable};
pub use names::name_variants;
pub use source::{DiskTables, MemTables, TableSource};
pub use states::{lookup_state, State, StateInput, STATES};
