pub mod error;
pub mod member;
pub mod member_id;
pub mod member_id_sequence;
pub mod name;
pub mod registry;
