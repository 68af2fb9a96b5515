//! Configuration section definitions.
//!
//! Each module corresponds to a section in `json2rss.toml`:
//!
//! | Module    | TOML Section  | Purpose                                   |
//! |-----------|---------------|-------------------------------------------|
//! | `feed`    | `[feed]`      | Retention: item cap and age window        |
//! | `channel` | `[channel]`   | Channel metadata for a freshly made feed  |
//! | `input`   | `[input]`     | Where rewritten-article records live      |
//! | `output`  | `[output]`    | Where the feed document is written        |
//! | `labels`  | `[labels]`    | Placeholder and label text in items       |

mod channel;
mod feed;
mod input;
mod labels;
mod output;

pub use channel::ChannelConfig;
pub use feed::RetentionConfig;
pub use input::InputConfig;
pub use labels::LabelsConfig;
pub use output::OutputConfig;
