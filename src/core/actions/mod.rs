//! The pipeline's build actions.
//!
//! Each action binds its parameters and collaborators at construction and
//! exposes the uniform `Action` contract. Composition into a pipeline is the
//! caller's job (see `workflow`).

pub mod install;
pub mod pack;
pub mod script;

pub use install::InstallAction;
pub use pack::PackAction;
pub use script::RunScriptAction;
