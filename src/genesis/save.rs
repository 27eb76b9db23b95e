//! Cosmic Genesis セーブ/ロード機能。
//!
//! ## フォーマット
//!
//! ```json
//! { "matter": 123.4, "generators": [{ "id": "star_forge", "count": 3 }], "language": "en" }
//! ```
//!
//! - バージョンはストレージキー (`cosmic_genesis_save_v1`) 側で管理する。
//! - 未知のトップレベルフィールドは無視する。
//! - 各フィールドは個別に寛容にデコードし、壊れている項目だけデフォルト値に落とす。
//! - ジェネレーターは ID でカタログと突き合わせる。セーブに無い ID は 0 個、
//!   カタログに無い ID は無視（カタログの追加・削除に前方互換）。
//!
//! 書き込み・読み込みの失敗はすべてログ出力のみで握りつぶし、ゲームを止めない。

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::log;

use super::state::{fresh_generators, GenesisState, Locale};

/// ストレージ操作のエラー。
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("storage is not available")]
    Unavailable,
    #[error("storage full")]
    QuotaExceeded,
    #[error("storage error: {0}")]
    Storage(String),
    #[error("failed to serialize save data: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// キー単位で文字列を保存する永続ストア。
pub trait SaveStore {
    fn read(&self, key: &str) -> Result<Option<String>, SaveError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), SaveError>;
    fn remove(&mut self, key: &str) -> Result<(), SaveError>;
}

/// ブラウザの localStorage。取得できない環境ではすべての操作が
/// `SaveError::Unavailable` になる。
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn("Cosmic Genesis: localStorage が利用できません。進行状況は保存されません。");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&web_sys::Storage, SaveError> {
        self.storage.as_ref().ok_or(SaveError::Unavailable)
    }
}

impl SaveStore for LocalStore {
    fn read(&self, key: &str) -> Result<Option<String>, SaveError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| SaveError::Storage(format!("{e:?}")))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SaveError> {
        self.storage()?.set_item(key, value).map_err(|e| {
            let detail = format!("{e:?}");
            if detail.contains("QuotaExceededError") || detail.contains("quota") {
                SaveError::QuotaExceeded
            } else {
                SaveError::Storage(detail)
            }
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), SaveError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| SaveError::Storage(format!("{e:?}")))
    }
}

/// プロセス内のストア。テストとブラウザ以外のホスト用。
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, SaveError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SaveError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SaveError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// シリアライズ用のセーブデータ構造体。
/// GenesisState の一時的なUI状態（フローター、確認ダイアログ等）は含まない。
#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub struct SaveData {
    #[serde(deserialize_with = "lenient_matter")]
    pub matter: f64,
    /// `None` は「セーブに generators が無い」= カタログ初期値。
    #[serde(deserialize_with = "lenient_generators")]
    pub generators: Option<Vec<SavedGenerator>>,
    #[serde(deserialize_with = "lenient_language")]
    pub language: Locale,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SavedGenerator {
    pub id: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub count: u32,
}

/// 数値以外・負数・非有限値は 0。
fn lenient_matter<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(value
        .as_f64()
        .filter(|m| m.is_finite() && *m >= 0.0)
        .unwrap_or(0.0))
}

/// 配列以外は `None`。要素ごとに解釈できないものだけ捨てる。
fn lenient_generators<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<Vec<SavedGenerator>>, D::Error> {
    let value = Value::deserialize(d)?;
    let Value::Array(entries) = value else {
        return Ok(None);
    };
    Ok(Some(
        entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect(),
    ))
}

/// 整数でなければ 0、u32 を超える値は飽和。
fn lenient_count<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(value
        .as_u64()
        .map(|c| u32::try_from(c).unwrap_or(u32::MAX))
        .unwrap_or(0))
}

/// 未知の言語コードはデフォルトロケール。
fn lenient_language<'de, D: Deserializer<'de>>(d: D) -> Result<Locale, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(value
        .as_str()
        .and_then(Locale::from_code)
        .unwrap_or_default())
}

/// GenesisState からセーブ用データを抽出する。
pub fn extract_save(state: &GenesisState) -> SaveData {
    SaveData {
        matter: state.matter,
        generators: Some(
            state
                .generators
                .iter()
                .map(|g| SavedGenerator {
                    id: g.def.id.to_string(),
                    count: g.count,
                })
                .collect(),
        ),
        language: state.locale,
    }
}

/// セーブデータを GenesisState に復元する。
/// カタログ側を基準に ID で突き合わせ、セーブに無いものは 0 個のまま。
pub fn apply_save(state: &mut GenesisState, save: &SaveData) {
    state.matter = save.matter;
    state.locale = save.language;
    state.generators = fresh_generators();

    let Some(saved) = &save.generators else {
        return;
    };
    for generator in &mut state.generators {
        if let Some(entry) = saved.iter().find(|s| s.id == generator.def.id) {
            generator.count = entry.count;
        }
    }
}

/// JSON 文字列からデコードする。構造的に壊れている場合は Err。
/// ルートはオブジェクトに限る（配列からの構造体デコードは受け付けない）。
pub fn parse_save(json: &str) -> Result<SaveData, serde_json::Error> {
    let value: Value = serde_json::from_str(json)?;
    if !value.is_object() {
        return Err(serde::de::Error::custom("save root is not a JSON object"));
    }
    serde_json::from_value(value)
}

/// ゲーム状態をストアに保存する。
/// 失敗時はサイレントに無視（コンソールにログ出力）。
pub fn save_game(store: &mut impl SaveStore, key: &str, state: &GenesisState) {
    let json = match serde_json::to_string(&extract_save(state)) {
        Ok(j) => j,
        Err(e) => {
            log::warn(&format!("Cosmic Genesis: {}", SaveError::from(e)));
            return;
        }
    };

    if let Err(e) = store.write(key, &json) {
        log::warn(&format!("Cosmic Genesis: セーブに失敗: {e}"));
    }
}

/// ストアからゲーム状態を復元する。
/// セーブが無い・読めない・壊れている場合は新規ゲームを返す。
pub fn load_game(store: &mut impl SaveStore, key: &str) -> GenesisState {
    let mut state = GenesisState::new();

    let json = match store.read(key) {
        Ok(Some(j)) => j,
        Ok(None) => return state,
        Err(e) => {
            log::warn(&format!("Cosmic Genesis: セーブの読み込みに失敗: {e}"));
            return state;
        }
    };

    let save = match parse_save(&json) {
        Ok(s) => s,
        Err(e) => {
            log::warn(&format!(
                "Cosmic Genesis: セーブデータのパースに失敗（破棄します）: {e}"
            ));
            // 壊れたデータを削除
            delete_save(store, key);
            return state;
        }
    };

    apply_save(&mut state, &save);
    log::info(&format!(
        "Cosmic Genesis: セーブを復元しました (matter={}, generators={})",
        state.matter,
        state.total_generators()
    ));
    state
}

/// セーブデータを削除する。
pub fn delete_save(store: &mut impl SaveStore, key: &str) {
    if let Err(e) = store.remove(key) {
        log::warn(&format!("Cosmic Genesis: セーブの削除に失敗: {e}"));
    }
}
