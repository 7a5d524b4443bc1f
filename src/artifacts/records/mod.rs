//! Flat records shared by the text and binary output modes
//!
//! - `raw_record`: ordered string map that every mapper consumes
//! - `tag_parser`: record boundary recovery for `-ztag` output
//! - `marshal`: decoder for `-G` output

pub mod marshal;
pub mod raw_record;
pub mod tag_parser;
