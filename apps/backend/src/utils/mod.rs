pub mod anonymous_name;
pub mod group_code;
