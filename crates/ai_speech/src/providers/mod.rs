//! Speech-to-text provider adapters

pub mod whisper_cpp;
