//! The two concrete schema instances: individual and organization
//! support-request forms.

mod individual;
mod organization;

pub use individual::individual;
pub use organization::organization;
