//! i18n-store
//!
//! 構造化ドキュメントから翻訳文字列を解決するストア。ネストしたキーパス、
//! フォールバック言語、プレースホルダー置換、言語間の欠落キー生成をサポートする。

pub mod config;
pub mod error;
pub mod fs;
pub mod generator;
pub mod i18n;
pub mod input;
pub mod store;
pub mod template;
pub mod types;

mod test_utils;

pub use error::{
    Error,
    PersistError,
};
pub use generator::{
    MemorySink,
    Persist,
};
pub use i18n::I18n;
pub use types::{
    GenerationMeta,
    GroupId,
    LanguageCode,
    Origin,
    Tree,
    TranslationValue,
};
