mod algorithm;
mod assignment;
mod callback;
mod distance;
mod errors;
mod hyperparams;
mod init;
mod update;

pub use algorithm::*;
pub use assignment::*;
pub use callback::*;
pub use distance::*;
pub use errors::*;
pub use hyperparams::*;
pub use init::*;
pub use update::*;
