//! Request handlers, one module per resource.

pub mod adoptions;
pub mod campaigns;
pub mod donations;
pub mod payments;
pub mod pets;
pub mod users;
