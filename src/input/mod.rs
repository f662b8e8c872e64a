mod reader;

pub use reader::{MAX_TOPIC_SIZE, TopicReader};
