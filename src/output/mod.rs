//! Files handed to ffmpeg alongside the inputs

pub mod concat_list;
pub mod ffmetadata;
