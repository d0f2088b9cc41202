mod arbiter;

pub use arbiter::{Arbitration, OwnershipArbiter};
