pub mod distribute;
pub mod layout;
