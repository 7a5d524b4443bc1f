//! Typed records built from raw records or raw text lines
//!
//! Constructors never fail on missing fields: absent numbers become `-1` and
//! absent strings stay empty.

pub mod change_summary;
pub mod client_record;
pub mod describe_record;
pub mod file_record;
pub mod info_record;
pub mod stream_record;
pub mod where_record;
