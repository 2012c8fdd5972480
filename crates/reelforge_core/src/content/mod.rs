//! Topic selection and deterministic content generation.

mod generator;
pub mod topics;

pub use generator::{
    generate_caption, generate_hashtags, generate_script, generate_text_segments,
    generate_video_content,
};
pub use topics::{topic_for_day, topics_by_niche, TOPIC_DATABASE};
