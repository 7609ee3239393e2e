//! 翻訳ディレクトリと設定を束ね、ストアを組み立てる

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    StoreSettings,
    loader,
};
use crate::error::Error;
use crate::fs;
use crate::i18n::I18n;

/// 検証済みの設定と、翻訳ファイルを読むルートディレクトリ
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 検証済みの設定
    settings: StoreSettings,

    /// 翻訳ファイルのルートディレクトリ（なければ何も読み込まない）
    root: Option<PathBuf>,
}

impl ConfigManager {
    /// デフォルト設定、ルートなしで作成
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `root` の設定ファイルを読み込み、検証して作成
    ///
    /// 設定ファイルがなければデフォルト設定を使う。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let root = root.into();
        let settings = loader::read_settings(&root)?.unwrap_or_default();
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        tracing::debug!(
            root = %root.display(),
            file_pattern = %settings.translation_files.file_pattern,
            "Opened translation root"
        );
        Ok(Self { settings, root: Some(root) })
    }

    /// 設定を差し替える
    ///
    /// # Errors
    /// バリデーションエラー（現在の設定は変更されない）
    pub fn update_settings(&mut self, settings: StoreSettings) -> Result<(), ConfigError> {
        settings.validate().map_err(ConfigError::ValidationErrors)?;
        self.settings = settings;
        Ok(())
    }

    #[must_use]
    pub const fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    #[must_use]
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// 設定から [`I18n`] を作り、ルート配下で `translationFiles.filePattern` に
    /// 一致するファイルをすべて読み込む
    ///
    /// # Errors
    /// - プレースホルダーパターンが使えない
    /// - 翻訳ファイルの走査・読み込みエラー
    pub fn build(&self) -> Result<I18n, Error> {
        let mut i18n = I18n::from_settings(&self.settings)?;

        if let Some(root) = &self.root {
            let count =
                fs::load_dir(&mut i18n, root, &self.settings.translation_files.file_pattern)?;
            tracing::info!(root = %root.display(), count, "Loaded translation files");
        }

        Ok(i18n)
    }
}
