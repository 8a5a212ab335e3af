// Application layer - Use case interactors

pub mod concat_interactor;
pub mod container;
pub mod inspect_interactor;
pub mod locks;

pub use concat_interactor::{ConcatInteractor, ProbeBatch, ProbeSettings};
pub use container::{AppContainer, DefaultAppContainer};
pub use inspect_interactor::{InspectInteractor, InspectReport};
pub use locks::OutputLocks;
