//! What the loaded driver can do.
//!
//! Capabilities are read once from the procedure table after the first fill
//! pass and drive two decisions: the vertex binding tier and whether matrix
//! operations run on the driver or in-process.

mod detect;
mod version;

pub use detect::{BindingTier, Capabilities, MatrixBackend};
pub use version::DriverVersion;
