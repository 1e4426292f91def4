//! Testing utilities and harness for the paged grid engine

pub mod fake_host;
pub mod test_rule;

pub use fake_host::*;
pub use test_rule::*;

pub mod prelude {
    pub use crate::fake_host::*;
    pub use crate::test_rule::*;
    pub use pagegrid_foundation::prelude::*;
}
