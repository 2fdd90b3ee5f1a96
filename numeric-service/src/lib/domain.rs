pub mod identity;
pub mod numeric;
