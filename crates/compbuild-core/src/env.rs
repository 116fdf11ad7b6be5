use crate::error::{CoreError, Result};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// デフォルトの環境変数ファイル名（プロジェクトルートからの相対）
pub const DEFAULT_ENV_FILE: &str = ".env";

/// `.env` ファイルから読み込んだ変数
///
/// 同じキーが複数回現れた場合は後の行が優先されます。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    path: Option<PathBuf>,
    vars: BTreeMap<String, String>,
}

impl EnvFile {
    /// ファイルを読み込む。存在しない場合は空の `EnvFile` を返す
    #[tracing::instrument]
    pub fn load_optional(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(env_file = %path.display(), "Env file not found, skipping");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| CoreError::EnvFileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let mut env_file = Self::parse(&content);
        env_file.path = Some(path.to_path_buf());

        info!(
            env_file = %path.display(),
            var_count = env_file.vars.len(),
            "Loaded variables from env file"
        );

        Ok(env_file)
    }

    /// `KEY=VALUE` 形式の内容をパース
    pub fn parse(content: &str) -> Self {
        let mut vars = BTreeMap::new();

        for (index, line) in content.lines().enumerate() {
            let line = line.trim();

            // 空行とコメント行をスキップ
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line = line.strip_prefix("export ").unwrap_or(line);

            let Some((key, value)) = line.split_once('=') else {
                warn!(line = index + 1, "Skipping env line without '='");
                continue;
            };

            let key = key.trim();
            if key.is_empty() {
                warn!(line = index + 1, "Skipping env line with empty key");
                continue;
            }

            let value = strip_quotes(value.trim());
            debug!(key = %key, "Adding variable from env file");
            vars.insert(key.to_string(), value.to_string());
        }

        Self { path: None, vars }
    }

    /// 読み込み元のパス（ファイルが存在しなかった場合は `None`）
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// クォートを除去（"value" や 'value' の場合）
fn strip_quotes(s: &str) -> &str {
    if s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')))
    {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

/// プロセス環境変数と `.env` ファイルを重ねた変数ビュー
///
/// 優先順位: プロセス環境変数 > `.env` ファイル。
/// 空文字の値は未設定として扱います。
#[derive(Debug, Clone, Default)]
pub struct Environment {
    ambient: HashMap<String, String>,
    file: EnvFile,
}

impl Environment {
    pub fn new(ambient: HashMap<String, String>, file: EnvFile) -> Self {
        Self { ambient, file }
    }

    /// 現在のプロセス環境変数の上に `.env` の内容を重ねる
    pub fn from_process(file: EnvFile) -> Self {
        Self::new(std::env::vars().collect(), file)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.ambient
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
            .or_else(|| self.file.get(key).filter(|v| !v.is_empty()))
    }

    /// ビルドプロセスに追加で渡す変数
    ///
    /// プロセス環境変数に存在しない（または空の）`.env` の変数のみを返します。
    pub fn exported(&self) -> Vec<(String, String)> {
        self.file
            .iter()
            .filter(|(key, _)| self.ambient.get(*key).is_none_or(|v| v.is_empty()))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}
