//! 設定ファイルの読み込み

use std::io::ErrorKind;
use std::path::Path;

use super::{
    ConfigError,
    StoreSettings,
};

/// 設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".i18n-store.json";

/// 翻訳ディレクトリ直下の設定ファイルを読む
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルあり
/// - `Ok(None)`: 設定ファイルなし
///
/// # Errors
/// - 読み込みエラー（存在しない場合を除く）
/// - JSON パースエラー
pub(super) fn read_settings(root: &Path) -> Result<Option<StoreSettings>, ConfigError> {
    let config_path = root.join(CONFIG_FILE_NAME);

    let content = match std::fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %config_path.display(), "No store configuration file");
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };

    let settings = serde_json::from_str(&content)?;
    tracing::debug!(path = %config_path.display(), "Read store configuration");
    Ok(Some(settings))
}
