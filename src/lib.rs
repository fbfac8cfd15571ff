pub mod host;
pub mod memory;
pub mod options;
pub mod pattern;
pub mod rewrite;
pub mod split;
pub mod state;
pub mod utils;
pub mod wrap;

// 重新导出主要结构
pub use host::{
    Adapter, Container, Containers, Controller, EventEmitter, Identified, Lifecycle, Listener,
    LocaleSettable, SaveArgs, Wrap,
};
pub use options::{WrapLocaleOptions, DEFAULT_ATTRIBUTE};
pub use pattern::{match_leading_locale, LocalePattern, DEFAULT_LOCALE_PATTERN};
pub use rewrite::prefix_identifier;
pub use split::{split_locale_fields, Payload, SaveEvent};
pub use state::{Attachment, SharedLocale};
pub use utils::WrapLocaleError;
pub use wrap::LocalizedWrap;
