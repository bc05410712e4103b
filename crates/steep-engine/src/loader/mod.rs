//! Run-time discovery of driver entry points.
//!
//! Name lookup goes through a [`SymbolSource`] (the platform driver module, a
//! caller-supplied proc-address function, or the in-process matrix emulation).
//! Results land in a [`ProcTable`] indexed by [`ProcTag`].

mod library;
mod symbol;
mod table;
mod tag;

pub use library::DriverLibrary;
pub use symbol::{LoaderFn, Proc, ProcAddr, SymbolSource, resolve};
pub use table::{FillPolicy, ProcTable};
pub use tag::{DRIVER_PROCS, MATRIX_TAGS, ProcEntry, ProcTag};
