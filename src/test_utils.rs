//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use serde_json::Value;

use crate::input::RawRecord;
use crate::store::Store;
use crate::types::{
    Origin,
    Tree,
    TranslationValue,
};

/// JSON オブジェクトから Tree を作成する
///
/// オブジェクト以外の値は `{"value": ...}` に包まれる
pub(crate) fn tree(value: Value) -> Tree {
    match TranslationValue::from(value) {
        TranslationValue::Tree(tree) => tree,
        other => Tree::from([("value".to_string(), other)]),
    }
}

/// テスト用のドキュメントをパースして Store に取り込む
///
/// # Arguments
/// * `store` - 取り込み先の Store
/// * `document` - `{ "<言語コード>": { ... } }` 形式のドキュメント
pub(crate) fn ingest_json(store: &mut Store, document: Value) {
    let origin = Origin::from(format!("{}.json", store.records().len()));
    let record = RawRecord::parse(document, origin).unwrap_or_else(|e| panic!("{e}"));
    store.ingest_record(record);
}
