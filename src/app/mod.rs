// Application layer - Use case interactors

pub mod cut_interactor;
pub mod export_interactor;

// Re-export interactors
pub use cut_interactor::{CutInteractor, CutReport};
pub use export_interactor::{ExportInteractor, PickOptions};
