pub mod assemble;
pub mod storage;
pub mod synthetic;
pub mod types;

pub use assemble::{assemble_catalog, exclude_failed, filter_by_area, find_molecule, score_record};
pub use storage::{load_catalog, save_catalog, save_scored_catalog, validate_catalog, CatalogFormat};
pub use synthetic::generate_catalog;
pub use types::{MoleculeRecord, ScoredMolecule};
