//! Background dataset loading.

mod loader;

pub use loader::load_dataset_worker;
